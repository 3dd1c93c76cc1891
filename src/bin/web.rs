//! Single binary web server: JSON API for players, drafts, rounds, matches and standings.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080). Log level via RUST_LOG.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use mtg_draft_web::{
    bye_for_round, calculate_results, populate_draft, DraftError, DraftId, DraftPlayerEdit,
    MatchId, MatchResult, NewDraft, Page, PlayerId, Store, StoreError,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// In-memory state shared by all workers.
type AppState = Data<RwLock<Store>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PlayerBody {
    name: String,
}

/// `{"score": "2-1"}` records a result, `{"score": null}` clears it.
#[derive(Deserialize)]
struct MatchScoreBody {
    score: Option<String>,
}

#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct DraftPath {
    id: DraftId,
}

#[derive(Deserialize)]
struct DraftRoundPath {
    id: DraftId,
    number: u32,
}

#[derive(Deserialize)]
struct DraftMatchPath {
    id: DraftId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct DraftPlayerPath {
    id: DraftId,
    player_id: PlayerId,
}

fn error_response(e: &StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        StoreError::PlayerNotFound(_)
        | StoreError::DraftNotFound(_)
        | StoreError::Draft(DraftError::MatchNotFound(_))
        | StoreError::Draft(DraftError::RoundNotFound(_))
        | StoreError::Draft(DraftError::PlayerNotInDraft(_)) => HttpResponse::NotFound().json(body),
        StoreError::Draft(DraftError::AlreadyGenerated)
        | StoreError::DuplicatePlayerName(_)
        | StoreError::DuplicateDraftName(_)
        | StoreError::PlayerInDrafts { .. } => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn respond<T: Serialize>(result: Result<T, StoreError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => {
            log::warn!("Request failed: {}", e);
            error_response(&e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "mtg-draft-web",
    })
}

/// Register a player (names are unique).
#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<PlayerBody>) -> HttpResponse {
    let mut store = state.write().await;
    respond(store.create_player(&body.name))
}

/// Bulk-create players from a CSV body (one name per line, optional `name` header).
#[post("/api/players/import")]
async fn api_import_players(state: AppState, body: String) -> HttpResponse {
    let mut store = state.write().await;
    respond(store.import_players_csv(&body))
}

#[get("/api/players")]
async fn api_list_players(state: AppState, page: Query<Page>) -> HttpResponse {
    let store = state.read().await;
    HttpResponse::Ok().json(store.list_players(page.into_inner()))
}

#[get("/api/players/{player_id}")]
async fn api_get_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let store = state.read().await;
    respond(store.player(path.player_id))
}

#[put("/api/players/{player_id}")]
async fn api_rename_player(state: AppState, path: Path<PlayerPath>, body: Json<PlayerBody>) -> HttpResponse {
    let mut store = state.write().await;
    respond(store.rename_player(path.player_id, &body.name))
}

/// Delete a player (refused while they take part in any draft).
#[delete("/api/players/{player_id}")]
async fn api_delete_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut store = state.write().await;
    respond(store.delete_player(path.player_id))
}

/// Count of finishes per place across all drafts.
#[get("/api/players/{player_id}/placements")]
async fn api_player_placements(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let store = state.read().await;
    respond(store.placements(path.player_id))
}

/// Create a draft. Order of `player_ids` is the first-round seating: 1v2, 3v4, 5v6, ...
/// The round-robin pairing is generated right away.
#[post("/api/drafts")]
async fn api_create_draft(state: AppState, body: Json<NewDraft>) -> HttpResponse {
    let mut store = state.write().await;
    respond(store.create_draft(body.into_inner()))
}

#[get("/api/drafts")]
async fn api_list_drafts(state: AppState, page: Query<Page>) -> HttpResponse {
    let store = state.read().await;
    HttpResponse::Ok().json(store.list_drafts(page.into_inner()))
}

#[get("/api/drafts/{id}")]
async fn api_get_draft(state: AppState, path: Path<DraftPath>) -> HttpResponse {
    let store = state.read().await;
    respond(store.draft(path.id))
}

#[delete("/api/drafts/{id}")]
async fn api_delete_draft(state: AppState, path: Path<DraftPath>) -> HttpResponse {
    let mut store = state.write().await;
    respond(store.delete_draft(path.id).map(|_| serde_json::json!({ "message": "Draft deleted" })))
}

/// Generate rounds and matches (409 if they already exist).
#[post("/api/drafts/{id}/pairing")]
async fn api_generate_pairing(state: AppState, path: Path<DraftPath>) -> HttpResponse {
    let mut store = state.write().await;
    let result = store.draft_mut(path.id).and_then(|draft| {
        populate_draft(draft)?;
        Ok(&*draft)
    });
    respond(result)
}

/// Recalculate points and final places from the current match results.
#[post("/api/drafts/{id}/results")]
async fn api_calculate_results(state: AppState, path: Path<DraftPath>) -> HttpResponse {
    let mut store = state.write().await;
    let result = store.draft_mut(path.id).and_then(|draft| {
        calculate_results(draft)?;
        Ok(draft.standings())
    });
    respond(result)
}

/// Current standings as last calculated.
#[get("/api/drafts/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<DraftPath>) -> HttpResponse {
    let store = state.read().await;
    respond(store.draft(path.id).map(|draft| draft.standings()))
}

/// A round with its matches and the player on a bye (if any).
#[get("/api/drafts/{id}/rounds/{number}")]
async fn api_get_round(state: AppState, path: Path<DraftRoundPath>) -> HttpResponse {
    let store = state.read().await;
    let result = store.draft(path.id).and_then(|draft| {
        let round = draft.round(path.number)?;
        let bye = bye_for_round(draft, path.number)?;
        Ok(serde_json::json!({
            "id": round.id,
            "number": round.number,
            "matches": round.matches,
            "bye": bye,
        }))
    });
    respond(result)
}

#[get("/api/drafts/{id}/rounds/{number}/matches")]
async fn api_list_round_matches(
    state: AppState,
    path: Path<DraftRoundPath>,
    page: Query<Page>,
) -> HttpResponse {
    let store = state.read().await;
    let result = store.draft(path.id).and_then(|draft| {
        let round = draft.round(path.number)?;
        Ok(page.into_inner().apply(&round.matches))
    });
    respond(result)
}

/// Record or clear a match score ("2-0", "2-1", "1-2", "0-2" or null).
#[put("/api/drafts/{id}/matches/{match_id}")]
async fn api_set_match_score(
    state: AppState,
    path: Path<DraftMatchPath>,
    body: Json<MatchScoreBody>,
) -> HttpResponse {
    let mut store = state.write().await;
    let result = store.draft_mut(path.id).and_then(|draft| {
        let score = body
            .score
            .as_deref()
            .map(str::parse::<MatchResult>)
            .transpose()?;
        draft.set_match_result(path.match_id, score)?;
        Ok(draft.match_mut(path.match_id)?.clone())
    });
    respond(result)
}

/// Edit a draft player's deck colors or seed order.
#[put("/api/drafts/{id}/players/{player_id}")]
async fn api_update_draft_player(
    state: AppState,
    path: Path<DraftPlayerPath>,
    body: Json<DraftPlayerEdit>,
) -> HttpResponse {
    let mut store = state.write().await;
    let result = store.draft_mut(path.id).and_then(|draft| {
        let dp = draft.update_draft_player(path.player_id, body.into_inner())?;
        Ok(dp.clone())
    });
    respond(result)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Store::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_player)
            .service(api_import_players)
            .service(api_list_players)
            .service(api_get_player)
            .service(api_rename_player)
            .service(api_delete_player)
            .service(api_player_placements)
            .service(api_create_draft)
            .service(api_list_drafts)
            .service(api_get_draft)
            .service(api_delete_draft)
            .service(api_generate_pairing)
            .service(api_calculate_results)
            .service(api_get_standings)
            .service(api_get_round)
            .service(api_list_round_matches)
            .service(api_set_match_score)
            .service(api_update_draft_player)
    })
    .bind(bind)?
    .run()
    .await
}

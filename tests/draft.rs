//! Integration tests for draft roster, results and draft player edits.

use chrono::NaiveDate;
use mtg_draft_web::{
    calculate_results, populate_draft, DeckColor, Draft, DraftError, DraftPlayerEdit, GameMatch,
    MatchResult,
};
use uuid::Uuid;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
}

#[test]
fn new_draft_assigns_seed_order() {
    let draft = Draft::new("  Modern Horizons  ", date(), &[5, 3, 9]).unwrap();
    assert_eq!(draft.name, "Modern Horizons");
    let orders: Vec<(u32, u32)> = draft
        .draft_players
        .iter()
        .map(|dp| (dp.player_id, dp.order))
        .collect();
    assert_eq!(orders, vec![(5, 1), (3, 2), (9, 3)]);
    assert!(draft.rounds.is_empty());
    assert!(draft.draft_players.iter().all(|dp| dp.final_place.is_none()));
}

#[test]
fn duplicate_player_in_roster_is_rejected() {
    assert_eq!(
        Draft::new("Dupes", date(), &[1, 2, 1]).unwrap_err(),
        DraftError::DuplicatePlayer(1)
    );
}

#[test]
fn match_needs_two_different_players() {
    assert_eq!(GameMatch::new(4, 4).unwrap_err(), DraftError::SamePlayer(4));
}

#[test]
fn winner_is_the_player_with_full_points() {
    let mut m = GameMatch::new(1, 2).unwrap();
    assert_eq!(m.winner(), None);
    m.result = Some(MatchResult::PlayerTwoWin);
    assert_eq!(m.winner(), Some(2));
    m.result = Some(MatchResult::PlayerOneFullWin);
    assert_eq!(m.winner(), Some(1));
}

#[test]
fn set_match_result_requires_known_match() {
    let mut draft = Draft::new("Results", date(), &[1, 2, 3, 4]).unwrap();
    populate_draft(&mut draft).unwrap();
    let missing = Uuid::new_v4();
    assert_eq!(
        draft.set_match_result(missing, Some(MatchResult::PlayerOneWin)),
        Err(DraftError::MatchNotFound(missing))
    );

    let id = draft.rounds[1].matches[0].id;
    draft.set_match_result(id, Some(MatchResult::PlayerOneWin)).unwrap();
    assert_eq!(draft.match_mut(id).unwrap().result, Some(MatchResult::PlayerOneWin));
}

#[test]
fn deck_colors_are_sorted_and_deduplicated() {
    let mut draft = Draft::new("Colors", date(), &[1, 2]).unwrap();
    let edit = DraftPlayerEdit {
        deck_colors: Some(vec![DeckColor::Green, DeckColor::Red, DeckColor::Green]),
        order: None,
    };
    let dp = draft.update_draft_player(2, edit).unwrap();
    assert_eq!(dp.deck_colors, vec![DeckColor::Red, DeckColor::Green]);

    assert_eq!(
        draft.update_draft_player(7, DraftPlayerEdit::default()).unwrap_err(),
        DraftError::PlayerNotInDraft(7)
    );
}

#[test]
fn seed_order_is_locked_once_paired() {
    let mut draft = Draft::new("Seats", date(), &[1, 2, 3, 4]).unwrap();
    let swap = DraftPlayerEdit {
        deck_colors: None,
        order: Some(9),
    };
    draft.update_draft_player(1, swap.clone()).unwrap();
    assert_eq!(draft.seeded_player_ids(), vec![2, 3, 4, 1]);

    populate_draft(&mut draft).unwrap();
    assert_eq!(
        draft.update_draft_player(1, swap).unwrap_err(),
        DraftError::AlreadyGenerated
    );
}

#[test]
fn standings_list_players_by_place() {
    let mut draft = Draft::new("Standings", date(), &[1, 2, 3]).unwrap();
    populate_draft(&mut draft).unwrap();
    let ids: Vec<_> = draft.matches().map(|m| (m.id, m.player_1, m.player_2)).collect();
    for (id, p1, p2) in ids {
        // Higher id always wins.
        let result = if p1 > p2 {
            MatchResult::PlayerOneFullWin
        } else {
            MatchResult::PlayerTwoFullWin
        };
        draft.set_match_result(id, Some(result)).unwrap();
    }
    calculate_results(&mut draft).unwrap();

    let ranked: Vec<(u32, Option<u32>, u32)> = draft
        .standings()
        .into_iter()
        .map(|dp| (dp.player_id, dp.final_place, dp.points))
        .collect();
    assert_eq!(ranked, vec![(3, Some(1), 6), (2, Some(2), 3), (1, Some(3), 0)]);
}

#[test]
fn draft_serializes_results_as_tokens() {
    let mut draft = Draft::new("Json", date(), &[1, 2]).unwrap();
    populate_draft(&mut draft).unwrap();
    let id = draft.rounds[0].matches[0].id;
    draft.set_match_result(id, Some(MatchResult::PlayerOneWin)).unwrap();

    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["rounds"][0]["matches"][0]["result"], "2-1");
    assert_eq!(json["date"], "2024-05-04");
    assert!(json["draft_players"][0]["final_place"].is_null());
}

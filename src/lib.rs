//! MTG draft tracker: library with models, pairing/standings logic and the in-memory store.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    bye_for_round, calculate_results, generate_pairing, head_to_head_wins, inside_out,
    populate_draft, resolve_standings, rotate, tally_points, RoundPairing,
};
pub use models::{
    DeckColor, Draft, DraftError, DraftId, DraftPlayer, DraftPlayerEdit, GameMatch, MatchId,
    MatchResult, Player, PlayerId, Round, RoundId, WIN_POINTS,
};
pub use store::{NewDraft, Page, Store, StoreError};

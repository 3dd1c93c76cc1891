//! Draft business logic: round-robin pairing and standings.

mod pairing;
mod standings;

pub use pairing::{bye_for_round, generate_pairing, inside_out, populate_draft, rotate, RoundPairing};
pub use standings::{calculate_results, head_to_head_wins, resolve_standings, tally_points};

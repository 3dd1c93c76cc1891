//! Data structures for the draft tracker: players, drafts, rounds, matches.

mod draft;
mod game;
mod player;

pub use draft::{Draft, DraftError, DraftId};
pub use game::{GameMatch, MatchId, MatchResult, Round, RoundId, WIN_POINTS};
pub use player::{DeckColor, DraftPlayer, DraftPlayerEdit, Player, PlayerId};

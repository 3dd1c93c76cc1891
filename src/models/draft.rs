//! Draft and DraftError.

use crate::models::game::{GameMatch, MatchId, MatchResult, Round};
use crate::models::player::{DraftPlayer, DraftPlayerEdit, PlayerId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during draft operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DraftError {
    /// Rounds and matches were already generated for this draft.
    AlreadyGenerated,
    /// The same player was listed twice in a draft roster.
    DuplicatePlayer(PlayerId),
    /// Player is not part of this draft.
    PlayerNotInDraft(PlayerId),
    /// No match with this id in the draft.
    MatchNotFound(MatchId),
    /// No round with this number in the draft.
    RoundNotFound(u32),
    /// Result token is not one of "2-0", "2-1", "1-2", "0-2".
    InvalidResult(String),
    /// A match must be between two different players.
    SamePlayer(PlayerId),
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::AlreadyGenerated => write!(f, "Pairing has already been generated for this draft"),
            DraftError::DuplicatePlayer(id) => write!(f, "Player {} is listed more than once", id),
            DraftError::PlayerNotInDraft(id) => write!(f, "Player {} is not part of this draft", id),
            DraftError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            DraftError::RoundNotFound(n) => write!(f, "Round {} not found", n),
            DraftError::InvalidResult(token) => {
                write!(f, "Invalid match result {:?} (expected 2-0, 2-1, 1-2 or 0-2)", token)
            }
            DraftError::SamePlayer(id) => write!(f, "Player {} cannot play against themselves", id),
        }
    }
}

impl std::error::Error for DraftError {}

/// Unique identifier for a draft.
pub type DraftId = Uuid;

/// A draft event: seeded roster, generated rounds, recorded results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Draft {
    pub id: DraftId,
    pub name: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Participants, kept in seed order.
    pub draft_players: Vec<DraftPlayer>,
    /// Empty until the pairing is generated.
    pub rounds: Vec<Round>,
}

impl Draft {
    /// Create a draft. The order of `player_ids` is the seed order (1v2, 3v4, ... in round 1).
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        player_ids: &[PlayerId],
    ) -> Result<Self, DraftError> {
        let mut seen = HashSet::new();
        let mut draft_players = Vec::with_capacity(player_ids.len());
        for (index, &player_id) in player_ids.iter().enumerate() {
            if !seen.insert(player_id) {
                return Err(DraftError::DuplicatePlayer(player_id));
            }
            draft_players.push(DraftPlayer::new(player_id, index as u32 + 1));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            date,
            created_at: Utc::now(),
            draft_players,
            rounds: Vec::new(),
        })
    }

    /// Roster ids sorted by seed order.
    pub fn seeded_player_ids(&self) -> Vec<PlayerId> {
        let mut seeded: Vec<&DraftPlayer> = self.draft_players.iter().collect();
        seeded.sort_by_key(|dp| (dp.order, dp.player_id));
        seeded.into_iter().map(|dp| dp.player_id).collect()
    }

    pub fn contains_player(&self, player_id: PlayerId) -> bool {
        self.draft_players.iter().any(|dp| dp.player_id == player_id)
    }

    pub fn has_matches(&self) -> bool {
        self.rounds.iter().any(|r| !r.matches.is_empty())
    }

    /// All matches across all rounds, in round order.
    pub fn matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    pub fn round(&self, number: u32) -> Result<&Round, DraftError> {
        self.rounds
            .iter()
            .find(|r| r.number == number)
            .ok_or(DraftError::RoundNotFound(number))
    }

    pub fn match_mut(&mut self, match_id: MatchId) -> Result<&mut GameMatch, DraftError> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.matches.iter_mut())
            .find(|m| m.id == match_id)
            .ok_or(DraftError::MatchNotFound(match_id))
    }

    pub fn draft_player_mut(&mut self, player_id: PlayerId) -> Result<&mut DraftPlayer, DraftError> {
        self.draft_players
            .iter_mut()
            .find(|dp| dp.player_id == player_id)
            .ok_or(DraftError::PlayerNotInDraft(player_id))
    }

    /// Record (or clear, with `None`) the result of a match.
    pub fn set_match_result(
        &mut self,
        match_id: MatchId,
        result: Option<MatchResult>,
    ) -> Result<(), DraftError> {
        self.match_mut(match_id)?.result = result;
        Ok(())
    }

    /// Edit a draft player's deck colors and/or seed order.
    /// Seed order only matters before pairing, so changing it afterwards is rejected.
    pub fn update_draft_player(
        &mut self,
        player_id: PlayerId,
        edit: DraftPlayerEdit,
    ) -> Result<&DraftPlayer, DraftError> {
        if edit.order.is_some() && self.has_matches() {
            return Err(DraftError::AlreadyGenerated);
        }
        let dp = self.draft_player_mut(player_id)?;
        if let Some(mut colors) = edit.deck_colors {
            colors.sort();
            colors.dedup();
            dp.deck_colors = colors;
        }
        if let Some(order) = edit.order {
            dp.order = order;
        }
        Ok(dp)
    }

    /// Draft players ranked: by final place (unplaced last), then points, then seed order.
    pub fn standings(&self) -> Vec<&DraftPlayer> {
        let mut ranked: Vec<&DraftPlayer> = self.draft_players.iter().collect();
        ranked.sort_by_key(|dp| {
            (
                dp.final_place.unwrap_or(u32::MAX),
                std::cmp::Reverse(dp.points),
                dp.order,
            )
        });
        ranked
    }
}

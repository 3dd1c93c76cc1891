//! Match (game), MatchResult and Round.

use crate::models::draft::DraftError;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Unique identifier for a round.
pub type RoundId = Uuid;

/// Points awarded for a full (match-winning) result.
pub const WIN_POINTS: u32 = 3;

/// Best-of-three outcome, always written from player 1's perspective.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "2-0")]
    PlayerOneFullWin,
    #[serde(rename = "2-1")]
    PlayerOneWin,
    #[serde(rename = "1-2")]
    PlayerTwoWin,
    #[serde(rename = "0-2")]
    PlayerTwoFullWin,
}

impl MatchResult {
    pub const ALL: [MatchResult; 4] = [
        MatchResult::PlayerOneFullWin,
        MatchResult::PlayerOneWin,
        MatchResult::PlayerTwoWin,
        MatchResult::PlayerTwoFullWin,
    ];

    /// `(player_1 points, player_2 points)` for this outcome.
    pub const fn points(self) -> (u32, u32) {
        match self {
            MatchResult::PlayerOneFullWin => (3, 0),
            MatchResult::PlayerOneWin => (3, 1),
            MatchResult::PlayerTwoWin => (1, 3),
            MatchResult::PlayerTwoFullWin => (0, 3),
        }
    }

    /// Stored token ("2-0", "2-1", "1-2", "0-2").
    pub const fn as_str(self) -> &'static str {
        match self {
            MatchResult::PlayerOneFullWin => "2-0",
            MatchResult::PlayerOneWin => "2-1",
            MatchResult::PlayerTwoWin => "1-2",
            MatchResult::PlayerTwoFullWin => "0-2",
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchResult {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        MatchResult::ALL
            .into_iter()
            .find(|r| r.as_str() == token)
            .ok_or_else(|| DraftError::InvalidResult(token.to_string()))
    }
}

/// A single best-of-three match between two distinct players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    /// None if not yet played.
    pub result: Option<MatchResult>,
}

impl GameMatch {
    pub fn new(player_1: PlayerId, player_2: PlayerId) -> Result<Self, DraftError> {
        if player_1 == player_2 {
            return Err(DraftError::SamePlayer(player_1));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            player_1,
            player_2,
            result: None,
        })
    }

    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player_1 == player_id || self.player_2 == player_id
    }

    /// Points each side earned, or None while pending.
    pub fn points(&self) -> Option<[(PlayerId, u32); 2]> {
        self.result.map(|r| {
            let (p1, p2) = r.points();
            [(self.player_1, p1), (self.player_2, p2)]
        })
    }

    /// Player who took the full match points, if the match has been played.
    pub fn winner(&self) -> Option<PlayerId> {
        self.points()?
            .into_iter()
            .find(|&(_, pts)| pts == WIN_POINTS)
            .map(|(pid, _)| pid)
    }
}

/// One round of the draft.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    /// 1-based.
    pub number: u32,
    pub matches: Vec<GameMatch>,
}

impl Round {
    pub fn new(number: u32, matches: Vec<GameMatch>) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            matches,
        }
    }
}

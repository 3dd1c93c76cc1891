//! Player, DraftPlayer and deck colors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a player (assigned by the store, stable across drafts).
pub type PlayerId = u32;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a player with the given id and name. The name is stored trimmed.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            name: name.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Mana color of a deck played in a draft.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckColor {
    Red,
    Blue,
    Black,
    White,
    Green,
}

/// A player's participation in one draft: seat, points and final place.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DraftPlayer {
    pub player_id: PlayerId,
    /// 1-based seed order; position 1 plays position 2 in round 1, 3 plays 4, etc.
    pub order: u32,
    pub points: u32,
    /// None until standings have been calculated.
    pub final_place: Option<u32>,
    #[serde(default)]
    pub deck_colors: Vec<DeckColor>,
}

impl DraftPlayer {
    pub fn new(player_id: PlayerId, order: u32) -> Self {
        Self {
            player_id,
            order,
            points: 0,
            final_place: None,
            deck_colors: Vec::new(),
        }
    }
}

/// Partial update of a draft player. Unset fields are left untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DraftPlayerEdit {
    #[serde(default)]
    pub deck_colors: Option<Vec<DeckColor>>,
    #[serde(default)]
    pub order: Option<u32>,
}

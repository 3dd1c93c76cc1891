//! In-memory store for players and drafts (the app's persistence layer).

use crate::logic::populate_draft;
use crate::models::{Draft, DraftError, DraftId, Player, PlayerId};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Errors from store operations (lookups, uniqueness, referential checks).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    PlayerNotFound(PlayerId),
    DraftNotFound(DraftId),
    /// Player names are unique (case-insensitive).
    DuplicatePlayerName(String),
    /// Player and draft names must not be blank.
    EmptyName,
    DuplicateDraftName(String),
    /// Player cannot be deleted while they take part in drafts.
    PlayerInDrafts { name: String, drafts: Vec<String> },
    /// Roster import could not be read as CSV.
    InvalidCsv(String),
    Draft(DraftError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            StoreError::DraftNotFound(id) => write!(f, "Draft {} not found", id),
            StoreError::DuplicatePlayerName(name) => {
                write!(f, "Player with name '{}' already exists", name)
            }
            StoreError::EmptyName => write!(f, "Name must not be empty"),
            StoreError::DuplicateDraftName(name) => write!(f, "Draft '{}' already exists", name),
            StoreError::PlayerInDrafts { name, drafts } => write!(
                f,
                "Cannot delete player '{}' because they are participating in drafts: {}",
                name,
                drafts.join(", ")
            ),
            StoreError::InvalidCsv(msg) => write!(f, "Invalid CSV: {}", msg),
            StoreError::Draft(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Draft(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DraftError> for StoreError {
    fn from(e: DraftError) -> Self {
        StoreError::Draft(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::InvalidCsv(e.to_string())
    }
}

/// Skip/limit window for list endpoints.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "Page::default_limit")]
    pub limit: usize,
}

impl Page {
    pub const MAX_LIMIT: usize = 1000;

    fn default_limit() -> usize {
        100
    }

    /// Apply the window to an iterator. `limit` is clamped to 1..=1000.
    pub fn apply<I: IntoIterator>(self, items: I) -> Vec<I::Item> {
        items
            .into_iter()
            .skip(self.skip)
            .take(self.limit.clamp(1, Self::MAX_LIMIT))
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::default_limit(),
        }
    }
}

/// Input for creating a draft.
#[derive(Clone, Debug, Deserialize)]
pub struct NewDraft {
    pub name: String,
    pub date: NaiveDate,
    /// Seed order: 1v2, 3v4, 5v6, ... in the first round.
    pub player_ids: Vec<PlayerId>,
    /// Randomize the seat order instead of using `player_ids` order.
    #[serde(default)]
    pub shuffle_seating: bool,
}

/// All players and drafts.
#[derive(Clone, Debug, Default)]
pub struct Store {
    players: BTreeMap<PlayerId, Player>,
    drafts: HashMap<DraftId, Draft>,
    next_player_id: PlayerId,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn name_taken(&self, name: &str, except: Option<PlayerId>) -> bool {
        self.players
            .values()
            .any(|p| Some(p.id) != except && p.name.eq_ignore_ascii_case(name))
    }

    /// Register a new player. Names are trimmed and must be unique (case-insensitive).
    pub fn create_player(&mut self, name: &str) -> Result<&Player, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.name_taken(name, None) {
            return Err(StoreError::DuplicatePlayerName(name.to_string()));
        }
        self.next_player_id += 1;
        let id = self.next_player_id;
        log::info!("Created player {} ({})", id, name);
        Ok(self.players.entry(id).or_insert(Player::new(id, name)))
    }

    /// Create players from CSV, one name in the first column per record.
    /// A leading `name` header, blank names and names already registered are skipped.
    /// Returns the ids of the players created.
    pub fn import_players_csv(&mut self, data: &str) -> Result<Vec<PlayerId>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());
        let mut names = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let name = record.get(0).unwrap_or("").to_string();
            if index == 0 && name.eq_ignore_ascii_case("name") {
                continue;
            }
            names.push(name);
        }

        let mut created = Vec::new();
        for name in names {
            if name.is_empty() || self.name_taken(&name, None) {
                continue;
            }
            created.push(self.create_player(&name)?.id);
        }
        log::info!("Imported {} player(s) from CSV", created.len());
        Ok(created)
    }

    pub fn list_players(&self, page: Page) -> Vec<&Player> {
        page.apply(self.players.values())
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, StoreError> {
        self.players.get(&id).ok_or(StoreError::PlayerNotFound(id))
    }

    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<&Player, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.name_taken(name, Some(id)) {
            return Err(StoreError::DuplicatePlayerName(name.to_string()));
        }
        let player = self.players.get_mut(&id).ok_or(StoreError::PlayerNotFound(id))?;
        player.name = name.to_string();
        Ok(player)
    }

    /// Delete a player. Refused while the player takes part in any draft.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, StoreError> {
        let player = self.player(id)?;
        let mut drafts: Vec<String> = self
            .drafts
            .values()
            .filter(|d| d.contains_player(id))
            .map(|d| d.name.clone())
            .collect();
        if !drafts.is_empty() {
            drafts.sort();
            return Err(StoreError::PlayerInDrafts {
                name: player.name.clone(),
                drafts,
            });
        }
        self.players.remove(&id).ok_or(StoreError::PlayerNotFound(id))
    }

    /// How many times the player finished in each place (only drafts with calculated standings).
    pub fn placements(&self, id: PlayerId) -> Result<BTreeMap<u32, u32>, StoreError> {
        self.player(id)?;
        let mut placements = BTreeMap::new();
        let finishes = self
            .drafts
            .values()
            .flat_map(|d| d.draft_players.iter())
            .filter(|dp| dp.player_id == id)
            .filter_map(|dp| dp.final_place);
        for place in finishes {
            *placements.entry(place).or_insert(0) += 1;
        }
        Ok(placements)
    }

    /// Create a draft and generate its round-robin pairing.
    pub fn create_draft(&mut self, new: NewDraft) -> Result<&Draft, StoreError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.drafts.values().any(|d| d.name == name) {
            return Err(StoreError::DuplicateDraftName(name.to_string()));
        }
        for &pid in &new.player_ids {
            self.player(pid)?;
        }

        let mut seating = new.player_ids;
        if new.shuffle_seating {
            seating.shuffle(&mut rand::thread_rng());
        }
        let mut draft = Draft::new(name, new.date, &seating)?;
        populate_draft(&mut draft)?;

        let id = draft.id;
        log::info!("Created draft {:?} ({}) with {} player(s)", draft.name, id, seating.len());
        Ok(self.drafts.entry(id).or_insert(draft))
    }

    /// Drafts, most recent first.
    pub fn list_drafts(&self, page: Page) -> Vec<&Draft> {
        let mut drafts: Vec<&Draft> = self.drafts.values().collect();
        drafts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.name.cmp(&b.name)));
        page.apply(drafts)
    }

    pub fn draft(&self, id: DraftId) -> Result<&Draft, StoreError> {
        self.drafts.get(&id).ok_or(StoreError::DraftNotFound(id))
    }

    pub fn draft_mut(&mut self, id: DraftId) -> Result<&mut Draft, StoreError> {
        self.drafts.get_mut(&id).ok_or(StoreError::DraftNotFound(id))
    }

    pub fn delete_draft(&mut self, id: DraftId) -> Result<Draft, StoreError> {
        let draft = self.drafts.remove(&id).ok_or(StoreError::DraftNotFound(id))?;
        log::info!("Deleted draft {:?} ({})", draft.name, id);
        Ok(draft)
    }
}

//! Team data structure: a registered padel pair with its seeding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in bracket slots and lookups).
pub type TeamId = Uuid;

/// A team registered in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Player names (usually two for padel).
    pub players: Vec<String>,
    /// Numeric ranking from the registration desk; lower is stronger. `None` = unranked.
    pub ranking: Option<u32>,
    /// Seed position `1..=N`, assigned before the bracket is generated.
    pub seed: Option<u32>,
}

impl Team {
    /// Create an unseeded, unranked team with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players: Vec::new(),
            ranking: None,
            seed: None,
        }
    }

    pub fn with_players(mut self, players: Vec<String>) -> Self {
        self.players = players;
        self
    }

    pub fn with_ranking(mut self, ranking: u32) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

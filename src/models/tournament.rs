//! Tournament and TournamentState.

use crate::logic::{AdvanceError, BracketError, BracketOptions, Placement, ScoreError, ScoringRules};
use crate::models::bracket::Bracket;
use crate::models::game::{BracketMatch, MatchId, MatchRef};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    #[error("invalid state for this action")]
    InvalidState,
    #[error("team not found")]
    TeamNotFound(TeamId),
    #[error("match not found")]
    MatchNotFound(MatchId),
    /// Team names are unique (case-insensitive).
    #[error("a team with this name already exists")]
    DuplicateTeamName,
    #[error("team name must not be empty")]
    EmptyTeamName,
    #[error("seed must be between 1 and {count} (got {seed})")]
    InvalidSeed { seed: u32, count: usize },
    /// Match cannot take a result yet (opponent unknown) or ever (bye).
    #[error("match is not ready to be played")]
    MatchNotReady(MatchId),
    #[error("team does not play in this match")]
    TeamNotInMatch(TeamId),
    #[error("could not read teams: {0}")]
    Import(String),
    #[error(transparent)]
    Bracket(#[from] BracketError),
    #[error(transparent)]
    Advance(#[from] AdvanceError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl From<csv::Error> for TournamentError {
    fn from(err: csv::Error) -> Self {
        TournamentError::Import(err.to_string())
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering and seeding teams; no bracket yet.
    #[default]
    Setup,
    /// Bracket generated; results are being entered.
    Playing,
    /// Every terminal match decided and the ranking computed.
    Completed,
}

/// Full tournament state: teams, bracket, ranking, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub teams: Vec<Team>,
    pub state: TournamentState,
    pub options: BracketOptions,
    pub scoring: ScoringRules,
    /// Present from bracket generation until reset.
    pub bracket: Option<Bracket>,
    /// Final positions; set once when the bracket finishes.
    pub ranking: Option<Vec<Placement>>,
}

impl Tournament {
    /// Create a new tournament in Setup state with no teams.
    pub fn new(name: impl Into<String>, options: BracketOptions, scoring: ScoringRules) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            teams: Vec::new(),
            state: TournamentState::Setup,
            options,
            scoring,
            bracket: None,
            ranking: None,
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn get_match(&self, id: MatchId) -> Option<&BracketMatch> {
        self.bracket.as_ref()?.matches().find(|m| m.id == id)
    }

    /// Bracket position of a match, or `MatchNotFound`.
    pub fn locate_match(&self, id: MatchId) -> Result<MatchRef, TournamentError> {
        self.bracket
            .as_ref()
            .and_then(|b| b.locate(id))
            .ok_or(TournamentError::MatchNotFound(id))
    }

    /// Register a team (Setup only). Names must be unique (case-insensitive).
    pub fn add_team(&mut self, team: Team) -> Result<TeamId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = team.name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        if self.team_by_name(name).is_some() {
            return Err(TournamentError::DuplicateTeamName);
        }
        let team = Team {
            name: name.to_owned(),
            ..team
        };
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team by id (Setup only). Seeds of the remaining teams are cleared.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        for t in &mut self.teams {
            t.seed = None;
        }
        Ok(())
    }

    /// Set one team's seed by hand (Setup only). Uniqueness is checked at bracket generation.
    pub fn set_seed(&mut self, team_id: TeamId, seed: u32) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let count = self.teams.len();
        if seed == 0 || seed as usize > count {
            return Err(TournamentError::InvalidSeed { seed, count });
        }
        self.teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?
            .seed = Some(seed);
        Ok(())
    }

    /// Toggle the third-place match (Setup only).
    pub fn set_options(&mut self, options: BracketOptions) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.options = options;
        Ok(())
    }
}

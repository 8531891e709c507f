//! Padel tournament web app: library with models, bracket engine, and business logic.

pub mod config;
pub mod logic;
pub mod models;

pub use config::ServerConfig;
pub use logic::{
    advance, assignment_for, build, compute_ranking, generate_bracket, import_teams, parse_teams,
    record_score, record_walkover, rerank, reset_bracket, seat_byes, seed_teams, start_match,
    AdvanceError, Advancement, BracketError, BracketOptions, Placement, ScoreError, ScoringRules,
    SeedingMethod, SlotAssignment,
};
pub use models::{
    Bracket, BracketMatch, MatchId, MatchRef, MatchStatus, Round, RoundType, SetScore, Side, Slot,
    SlotRef, Team, TeamId, Tournament, TournamentError, TournamentId, TournamentState,
};

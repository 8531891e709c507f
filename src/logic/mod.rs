//! Tournament business logic: seeding, bracket building, advancement, results, ranking.

mod advancement;
mod bracket;
mod import;
mod ranking;
mod results;
mod scoring;
mod seeding;
mod setup;

pub use advancement::{
    advance, assignment_for, loser_assignment_for, seat_byes, AdvanceError, Advancement,
    SlotAssignment,
};
pub use bracket::{build, BracketError, BracketOptions};
pub use import::parse_teams;
pub use ranking::{compute as compute_ranking, Placement};
pub use results::{record_score, record_walkover, rerank, start_match};
pub use scoring::{decide, ScoreError, ScoringRules};
pub use seeding::{
    bracket_size, round_count, seed_by_draw, seed_by_ranking, seed_order, MAX_TEAMS, MIN_TEAMS,
};
pub use setup::{generate_bracket, import_teams, reset_bracket, seed_teams, SeedingMethod};

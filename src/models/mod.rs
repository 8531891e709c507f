//! Data structures for the padel tournament: teams, matches, bracket, tournament state.

mod bracket;
mod game;
mod team;
mod tournament;

pub use bracket::Bracket;
pub use game::{BracketMatch, MatchId, MatchRef, MatchStatus, Round, RoundType, SetScore, Side, Slot, SlotRef};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};

//! Bracket match, slot, side, and round types.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    /// Side fed by the match at `position` of the previous round.
    pub fn for_position(position: usize) -> Self {
        if position % 2 == 0 {
            Side::One
        } else {
            Side::Two
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Occupant of one side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "team", rename_all = "snake_case")]
pub enum Slot {
    /// Not known yet; filled by advancement.
    #[default]
    Unresolved,
    Team(TeamId),
    /// No opponent will ever arrive.
    Bye,
}

impl Slot {
    pub fn team(self) -> Option<TeamId> {
        match self {
            Slot::Team(id) => Some(id),
            Slot::Unresolved | Slot::Bye => None,
        }
    }
}

/// Stage of a single-elimination bracket, named by the slot count at that stage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
    /// Optional playoff between the two semi-final losers.
    ThirdPlace,
}

impl RoundType {
    /// Round type for an elimination round with `slots` team slots.
    pub fn for_slots(slots: usize) -> Option<Self> {
        match slots {
            32 => Some(RoundType::RoundOf32),
            16 => Some(RoundType::RoundOf16),
            8 => Some(RoundType::QuarterFinal),
            4 => Some(RoundType::SemiFinal),
            2 => Some(RoundType::Final),
            _ => None,
        }
    }

    /// Round the winners of this round move on to. `None` for terminal rounds.
    pub fn next(self) -> Option<Self> {
        match self {
            RoundType::RoundOf32 => Some(RoundType::RoundOf16),
            RoundType::RoundOf16 => Some(RoundType::QuarterFinal),
            RoundType::QuarterFinal => Some(RoundType::SemiFinal),
            RoundType::SemiFinal => Some(RoundType::Final),
            RoundType::Final | RoundType::ThirdPlace => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn label(self) -> &'static str {
        match self {
            RoundType::RoundOf32 => "Round of 32",
            RoundType::RoundOf16 => "Round of 16",
            RoundType::QuarterFinal => "Quarter-final",
            RoundType::SemiFinal => "Semi-final",
            RoundType::Final => "Final",
            RoundType::ThirdPlace => "Third place",
        }
    }
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// At least one side is still unresolved.
    #[default]
    Pending,
    /// Both teams known; ready to be played.
    Scheduled,
    InProgress,
    Completed,
}

/// Games won by each side in one set (or points, for a match tie-break).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub team_1: u8,
    pub team_2: u8,
}

impl SetScore {
    pub fn new(team_1: u8, team_2: u8) -> Self {
        Self { team_1, team_2 }
    }
}

/// Position of a match in the bracket: round index and position within that round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct MatchRef {
    pub round: usize,
    pub position: usize,
}

impl MatchRef {
    pub fn new(round: usize, position: usize) -> Self {
        Self { round, position }
    }
}

/// A (match, side) pair a result flows into. Fixed when the bracket is built.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SlotRef {
    pub at: MatchRef,
    pub side: Side,
}

/// A single bracket match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub round: RoundType,
    /// Chronological round order; 0 is the first round.
    pub round_index: usize,
    /// Index of this match inside its round.
    pub position: usize,
    pub team_1: Slot,
    pub team_2: Slot,
    pub status: MatchStatus,
    /// Set scores, empty until a result is recorded.
    pub sets: Vec<SetScore>,
    /// True when the result was awarded without play.
    #[serde(default)]
    pub walkover: bool,
    /// None if not yet decided.
    pub winner: Option<TeamId>,
    /// Where the winner goes. `None` for terminal matches.
    pub winner_to: Option<SlotRef>,
    /// Where the loser goes (semi-finals feeding a third-place match).
    pub loser_to: Option<SlotRef>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl BracketMatch {
    pub fn new(round: RoundType, round_index: usize, position: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            round_index,
            position,
            team_1: Slot::Unresolved,
            team_2: Slot::Unresolved,
            status: MatchStatus::Pending,
            sets: Vec::new(),
            walkover: false,
            winner: None,
            winner_to: None,
            loser_to: None,
            completed_at: None,
        }
    }

    pub fn at(&self) -> MatchRef {
        MatchRef::new(self.round_index, self.position)
    }

    pub fn slot(&self, side: Side) -> Slot {
        match side {
            Side::One => self.team_1,
            Side::Two => self.team_2,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::One => &mut self.team_1,
            Side::Two => &mut self.team_2,
        }
    }

    /// Side the given team occupies, if any.
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if self.team_1 == Slot::Team(team) {
            Some(Side::One)
        } else if self.team_2 == Slot::Team(team) {
            Some(Side::Two)
        } else {
            None
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team_1 == Slot::Bye || self.team_2 == Slot::Bye
    }

    /// The team that lost a completed match. `None` for byes and undecided matches.
    pub fn loser(&self) -> Option<TeamId> {
        let winner = self.winner?;
        let side = self.side_of(winner)?;
        self.slot(side.other()).team()
    }

    /// Whether the result came from actual play (or a walkover), rather than from the slots alone.
    pub fn is_played(&self) -> bool {
        match self.status {
            MatchStatus::InProgress => true,
            MatchStatus::Completed => !self.is_bye(),
            MatchStatus::Pending | MatchStatus::Scheduled => false,
        }
    }
}

/// All matches of one round, in position order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_type: RoundType,
    pub index: usize,
    pub matches: Vec<BracketMatch>,
}

impl Round {
    pub fn match_at(&self, position: usize) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.position == position)
    }

    pub fn match_at_mut(&mut self, position: usize) -> Option<&mut BracketMatch> {
        self.matches.iter_mut().find(|m| m.position == position)
    }
}

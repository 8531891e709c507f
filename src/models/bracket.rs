//! Bracket: the ordered rounds of a single-elimination draw.

use crate::models::game::{BracketMatch, MatchId, MatchRef, Round, RoundType};
use serde::{Deserialize, Serialize};

/// Rounds from the first round to the final, followed by the third-place round when present.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Round>,
}

impl Bracket {
    pub fn new(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }

    pub fn get(&self, at: MatchRef) -> Option<&BracketMatch> {
        self.rounds.get(at.round)?.match_at(at.position)
    }

    pub fn get_mut(&mut self, at: MatchRef) -> Option<&mut BracketMatch> {
        self.rounds.get_mut(at.round)?.match_at_mut(at.position)
    }

    /// Position of the match with the given id.
    pub fn locate(&self, id: MatchId) -> Option<MatchRef> {
        self.matches().find(|m| m.id == id).map(BracketMatch::at)
    }

    pub fn matches(&self) -> impl Iterator<Item = &BracketMatch> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    /// Elimination rounds only (third-place round excluded).
    pub fn elimination_rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds
            .iter()
            .filter(|r| r.round_type != RoundType::ThirdPlace)
    }

    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.rounds
            .iter()
            .find(|r| r.round_type == RoundType::Final)?
            .matches
            .first()
    }

    pub fn third_place_match(&self) -> Option<&BracketMatch> {
        self.rounds
            .iter()
            .find(|r| r.round_type == RoundType::ThirdPlace)?
            .matches
            .first()
    }

    /// Bracket size (number of first-round slots).
    pub fn size(&self) -> usize {
        self.elimination_rounds().count().checked_sub(1).map_or(0, |n| 2 << n)
    }

    /// True once every match without a successor has a winner.
    pub fn is_finished(&self) -> bool {
        let mut terminals = self.matches().filter(|m| m.round.is_terminal()).peekable();
        terminals.peek().is_some() && terminals.all(|m| m.winner.is_some())
    }
}

//! Score entry: padel set validation and winner determination (best of three sets).

use crate::models::{SetScore, Side};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sets needed to win a match.
const SETS_TO_WIN: usize = 2;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ScoreError {
    #[error("no sets entered")]
    NoSets,
    #[error("set {set} score {team_1}-{team_2} is not a valid result")]
    InvalidSet { set: usize, team_1: u8, team_2: u8 },
    #[error("set {set} was entered after the match was already decided")]
    AfterDecided { set: usize },
    #[error("the entered sets do not decide the match")]
    Undecided,
}

/// How sets are scored in a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// The deciding third set is played as a match tie-break to 10.
    #[serde(default)]
    pub super_tiebreak: bool,
}

/// Validate the sets and return the winning side.
pub fn decide(sets: &[SetScore], rules: ScoringRules) -> Result<Side, ScoreError> {
    if sets.is_empty() {
        return Err(ScoreError::NoSets);
    }
    let (mut won_1, mut won_2) = (0, 0);
    for (i, set) in sets.iter().enumerate() {
        let number = i + 1;
        if won_1 == SETS_TO_WIN || won_2 == SETS_TO_WIN {
            return Err(ScoreError::AfterDecided { set: number });
        }
        let deciding = won_1 == SETS_TO_WIN - 1 && won_2 == SETS_TO_WIN - 1;
        let valid = if deciding && rules.super_tiebreak {
            is_valid_tiebreak(*set)
        } else {
            is_valid_set(*set)
        };
        if !valid {
            return Err(ScoreError::InvalidSet {
                set: number,
                team_1: set.team_1,
                team_2: set.team_2,
            });
        }
        if set.team_1 > set.team_2 {
            won_1 += 1;
        } else {
            won_2 += 1;
        }
    }
    match (won_1, won_2) {
        (SETS_TO_WIN, _) => Ok(Side::One),
        (_, SETS_TO_WIN) => Ok(Side::Two),
        _ => Err(ScoreError::Undecided),
    }
}

/// 6-0 to 6-4, 7-5 or 7-6.
fn is_valid_set(set: SetScore) -> bool {
    let (high, low) = (set.team_1.max(set.team_2), set.team_1.min(set.team_2));
    match high {
        6 => low <= 4,
        7 => low == 5 || low == 6,
        _ => false,
    }
}

/// First to 10 points, two clear.
fn is_valid_tiebreak(set: SetScore) -> bool {
    let (high, low) = (set.team_1.max(set.team_2), set.team_1.min(set.team_2));
    if high == 10 {
        low <= 8
    } else {
        high > 10 && high - low == 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(scores: &[(u8, u8)]) -> Vec<SetScore> {
        scores.iter().map(|&(a, b)| SetScore::new(a, b)).collect()
    }

    #[test]
    fn straight_sets() {
        let rules = ScoringRules::default();
        assert_eq!(decide(&sets(&[(6, 3), (7, 5)]), rules), Ok(Side::One));
        assert_eq!(decide(&sets(&[(4, 6), (6, 7)]), rules), Ok(Side::Two));
    }

    #[test]
    fn three_sets() {
        let rules = ScoringRules::default();
        assert_eq!(decide(&sets(&[(6, 3), (3, 6), (2, 6)]), rules), Ok(Side::Two));
    }

    #[test]
    fn super_tiebreak_decider() {
        let rules = ScoringRules { super_tiebreak: true };
        assert_eq!(decide(&sets(&[(6, 3), (3, 6), (10, 8)]), rules), Ok(Side::One));
        assert_eq!(decide(&sets(&[(6, 3), (3, 6), (12, 14)]), rules), Ok(Side::Two));
        assert!(matches!(
            decide(&sets(&[(6, 3), (3, 6), (6, 4)]), rules),
            Err(ScoreError::InvalidSet { set: 3, .. })
        ));
        assert!(matches!(
            decide(&sets(&[(6, 3), (3, 6), (10, 9)]), rules),
            Err(ScoreError::InvalidSet { set: 3, .. })
        ));
    }

    #[test]
    fn rejects_bad_input() {
        let rules = ScoringRules::default();
        assert_eq!(decide(&[], rules), Err(ScoreError::NoSets));
        assert_eq!(decide(&sets(&[(6, 3)]), rules), Err(ScoreError::Undecided));
        assert!(matches!(
            decide(&sets(&[(6, 5), (6, 2)]), rules),
            Err(ScoreError::InvalidSet { set: 1, .. })
        ));
        assert!(matches!(
            decide(&sets(&[(8, 6), (6, 2)]), rules),
            Err(ScoreError::InvalidSet { set: 1, .. })
        ));
        assert_eq!(
            decide(&sets(&[(6, 1), (6, 2), (6, 0)]), rules),
            Err(ScoreError::AfterDecided { set: 3 })
        );
    }
}

//! Bracket builder: seeded teams -> every round of a single-elimination draw.

use crate::logic::seeding::{bracket_size, round_count, seed_order};
use crate::models::{
    BracketMatch, MatchRef, MatchStatus, Round, RoundType, Side, Slot, SlotRef, Team, TeamId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Configuration errors: the bracket cannot be built from these teams.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BracketError {
    #[error("team count must be between 2 and 32 (got {0})")]
    TeamCount(usize),
    #[error("team {0} has no seed")]
    MissingSeed(TeamId),
    #[error("seed {0} is assigned to more than one team")]
    DuplicateSeed(u32),
    #[error("seed {seed} is outside 1..={count}")]
    SeedOutOfRange { seed: u32, count: usize },
}

/// Optional parts of the draw.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketOptions {
    /// Add a playoff between the semi-final losers.
    #[serde(default)]
    pub third_place_match: bool,
}

/// Build every round of the bracket. Pure: the same teams give the same rounds.
///
/// First-round byes come back already completed with their team as winner; later rounds are
/// all unresolved. Each match carries the slot its winner (and for semi-finals with a
/// third-place match, its loser) flows into.
pub fn build(teams: &[Team], options: BracketOptions) -> Result<Vec<Round>, BracketError> {
    let size = bracket_size(teams.len()).ok_or(BracketError::TeamCount(teams.len()))?;
    let by_seed = seed_map(teams)?;
    let rounds_total = round_count(size);
    let third_place = options.third_place_match && rounds_total >= 2;

    let mut rounds = Vec::with_capacity(rounds_total + usize::from(third_place));
    let mut slots = size;
    for index in 0..rounds_total {
        let round_type = RoundType::for_slots(slots).ok_or(BracketError::TeamCount(teams.len()))?;
        let matches = (0..slots / 2)
            .map(|position| {
                let mut m = BracketMatch::new(round_type, index, position);
                if index + 1 < rounds_total {
                    m.winner_to = Some(SlotRef {
                        at: MatchRef::new(index + 1, position / 2),
                        side: Side::for_position(position),
                    });
                }
                if third_place && round_type == RoundType::SemiFinal {
                    m.loser_to = Some(SlotRef {
                        at: MatchRef::new(rounds_total, 0),
                        side: Side::for_position(position),
                    });
                }
                m
            })
            .collect();
        rounds.push(Round {
            round_type,
            index,
            matches,
        });
        slots /= 2;
    }
    if third_place {
        rounds.push(Round {
            round_type: RoundType::ThirdPlace,
            index: rounds_total,
            matches: vec![BracketMatch::new(RoundType::ThirdPlace, rounds_total, 0)],
        });
    }

    let order = seed_order(size);
    let first = &mut rounds[0];
    first.matches.retain_mut(|m| {
        let seat = |slot: usize| by_seed.get(&order[slot]).copied();
        match (seat(2 * m.position), seat(2 * m.position + 1)) {
            (Some(a), Some(b)) => {
                m.team_1 = Slot::Team(a);
                m.team_2 = Slot::Team(b);
                m.status = MatchStatus::Scheduled;
                true
            }
            (Some(a), None) => {
                m.team_1 = Slot::Team(a);
                m.team_2 = Slot::Bye;
                complete_bye(m, a);
                true
            }
            (None, Some(b)) => {
                m.team_1 = Slot::Bye;
                m.team_2 = Slot::Team(b);
                complete_bye(m, b);
                true
            }
            (None, None) => false,
        }
    });

    Ok(rounds)
}

fn complete_bye(m: &mut BracketMatch, team: TeamId) {
    m.status = MatchStatus::Completed;
    m.winner = Some(team);
}

/// Validate seeds (present, unique, within `1..=N`) and index teams by seed.
fn seed_map(teams: &[Team]) -> Result<HashMap<u32, TeamId>, BracketError> {
    let count = teams.len();
    let mut by_seed = HashMap::with_capacity(count);
    for team in teams {
        let seed = team.seed.ok_or(BracketError::MissingSeed(team.id))?;
        if seed == 0 || seed as usize > count {
            return Err(BracketError::SeedOutOfRange { seed, count });
        }
        if by_seed.insert(seed, team.id).is_some() {
            return Err(BracketError::DuplicateSeed(seed));
        }
    }
    Ok(by_seed)
}

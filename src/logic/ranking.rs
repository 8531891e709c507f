//! Final ranking once the bracket is finished.

use crate::models::{Bracket, RoundType, TeamId};
use serde::{Deserialize, Serialize};

/// A team's final position. Teams knocked out in the same round share a position.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: u32,
    pub team: TeamId,
}

/// Position shared by the losers of a round.
fn losers_position(round: RoundType) -> u32 {
    match round {
        RoundType::Final => 2,
        RoundType::SemiFinal => 3,
        RoundType::QuarterFinal => 5,
        RoundType::RoundOf16 => 9,
        RoundType::RoundOf32 => 17,
        RoundType::ThirdPlace => 4,
    }
}

/// Rank every team, best first. `None` while any terminal match is undecided.
pub fn compute(bracket: &Bracket) -> Option<Vec<Placement>> {
    if !bracket.is_finished() {
        return None;
    }
    let has_third_place = bracket.third_place_match().is_some();
    let mut placements = Vec::new();

    let champion = bracket.final_match()?.winner?;
    placements.push(Placement {
        position: 1,
        team: champion,
    });
    if let Some(third) = bracket.third_place_match().and_then(|m| m.winner) {
        placements.push(Placement {
            position: 3,
            team: third,
        });
    }
    for m in bracket.matches() {
        if m.round == RoundType::SemiFinal && has_third_place {
            continue;
        }
        if let Some(team) = m.loser() {
            placements.push(Placement {
                position: losers_position(m.round),
                team,
            });
        }
    }
    placements.sort_by_key(|p| p.position);
    Some(placements)
}

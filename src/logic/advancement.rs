//! Advancement engine: move a completed match's winner into the slot it feeds.
//!
//! Targets come from the `winner_to` / `loser_to` pointers set when the bracket was built, never
//! from a search for a free slot. Sibling matches therefore write different sides of their
//! successor, and repeating an advancement leaves the bracket unchanged.

use crate::models::{
    Bracket, BracketMatch, MatchId, MatchRef, MatchStatus, Slot, SlotRef, TeamId,
};
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

/// Precondition failures. Nothing is written when one of these is returned.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AdvanceError {
    #[error("no match at round {round}, position {position}")]
    MatchNotFound { round: usize, position: usize },
    #[error("match {0} is not completed")]
    NotCompleted(MatchId),
    #[error("match {0} has no winner")]
    NoWinner(MatchId),
    #[error("winner {winner} does not play in match {match_id}")]
    WinnerNotInMatch { match_id: MatchId, winner: TeamId },
    #[error("match {0} has already been played; its teams can no longer change")]
    SuccessorLocked(MatchId),
    /// Only reachable when a bracket was edited by hand; built brackets feed each side once.
    #[error("team {team} would face itself in match {match_id}")]
    DuplicateTeam { match_id: MatchId, team: TeamId },
}

impl From<MatchRef> for AdvanceError {
    fn from(at: MatchRef) -> Self {
        AdvanceError::MatchNotFound {
            round: at.round,
            position: at.position,
        }
    }
}

/// An occupant written into a specific (match, side).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SlotAssignment {
    pub occupant: Slot,
    pub target: SlotRef,
}

/// Outcome of [`advance`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Advancement {
    /// The winner (and the loser, for a semi-final feeding a third-place match) was written.
    Placed {
        winner: SlotAssignment,
        loser: Option<SlotAssignment>,
    },
    /// Everything was already in place.
    NoOp,
    /// The match has no successor: final or third-place match.
    Terminal,
}

/// Where the winner of `m` goes. `Ok(None)` for terminal matches.
pub fn assignment_for(m: &BracketMatch) -> Result<Option<SlotAssignment>, AdvanceError> {
    let winner = decided_winner(m)?;
    Ok(m.winner_to.map(|target| SlotAssignment {
        occupant: Slot::Team(winner),
        target,
    }))
}

/// Where the loser of `m` goes, if anywhere. A bye has no loser and sends [`Slot::Bye`].
pub fn loser_assignment_for(m: &BracketMatch) -> Result<Option<SlotAssignment>, AdvanceError> {
    decided_winner(m)?;
    Ok(m.loser_to.map(|target| SlotAssignment {
        occupant: m.loser().map_or(Slot::Bye, Slot::Team),
        target,
    }))
}

fn decided_winner(m: &BracketMatch) -> Result<TeamId, AdvanceError> {
    if m.status != MatchStatus::Completed {
        return Err(AdvanceError::NotCompleted(m.id));
    }
    let winner = m.winner.ok_or(AdvanceError::NoWinner(m.id))?;
    if m.side_of(winner).is_none() {
        return Err(AdvanceError::WinnerNotInMatch {
            match_id: m.id,
            winner,
        });
    }
    Ok(winner)
}

/// Advance the completed match at `at`.
///
/// Successors that become a bye through this write (a third-place match with one semi-final
/// bye) are completed and advanced through this same function.
pub fn advance(bracket: &mut Bracket, at: MatchRef) -> Result<Advancement, AdvanceError> {
    let source = bracket.get(at).ok_or(AdvanceError::from(at))?;
    let Some(winner) = assignment_for(source)? else {
        info!("{} {} completed, no successor", source.round.label(), source.id);
        return Ok(Advancement::Terminal);
    };
    let loser = loser_assignment_for(source)?;
    let source_id = source.id;

    let write_winner = check(bracket, &winner)?;
    let write_loser = match &loser {
        Some(l) => check(bracket, l)?,
        None => false,
    };
    if !write_winner && !write_loser {
        debug!("match {source_id} already advanced");
        return Ok(Advancement::NoOp);
    }

    let mut touched = Vec::with_capacity(2);
    if write_winner {
        write(bracket, &winner);
        touched.push(winner.target.at);
    }
    if let Some(l) = loser.filter(|_| write_loser) {
        write(bracket, &l);
        touched.push(l.target.at);
    }
    info!(
        "match {source_id}: {:?} -> round {} position {} side {:?}",
        winner.occupant, winner.target.at.round, winner.target.at.position, winner.target.side
    );

    for next in touched {
        let resolved_by_bye = bracket
            .get(next)
            .is_some_and(|m| m.status == MatchStatus::Completed && m.is_bye());
        if resolved_by_bye {
            advance(bracket, next)?;
        }
    }

    Ok(Advancement::Placed { winner, loser })
}

/// Advance every first-round bye. Run once, right after the bracket is built.
pub fn seat_byes(bracket: &mut Bracket) -> Result<usize, AdvanceError> {
    let byes: Vec<MatchRef> = bracket
        .rounds
        .first()
        .map(|r| r.matches.iter().filter(|m| m.is_bye()).map(BracketMatch::at).collect())
        .unwrap_or_default();
    for &at in &byes {
        advance(bracket, at)?;
    }
    Ok(byes.len())
}

/// Whether `a` needs writing. Errors if writing it is not allowed.
fn check(bracket: &Bracket, a: &SlotAssignment) -> Result<bool, AdvanceError> {
    let target = bracket.get(a.target.at).ok_or(AdvanceError::from(a.target.at))?;
    if target.slot(a.target.side) == a.occupant {
        return Ok(false);
    }
    if target.is_played() {
        return Err(AdvanceError::SuccessorLocked(target.id));
    }
    if let Slot::Team(team) = a.occupant {
        if target.slot(a.target.side.other()) == Slot::Team(team) {
            return Err(AdvanceError::DuplicateTeam {
                match_id: target.id,
                team,
            });
        }
    }
    Ok(true)
}

fn write(bracket: &mut Bracket, a: &SlotAssignment) {
    if let Some(target) = bracket.get_mut(a.target.at) {
        *target.slot_mut(a.target.side) = a.occupant;
        refresh(target);
    }
}

/// Recompute status and winner of an unplayed match from its slots.
fn refresh(m: &mut BracketMatch) {
    m.sets.clear();
    m.walkover = false;
    m.completed_at = None;
    match (m.team_1, m.team_2) {
        (Slot::Team(_), Slot::Team(_)) => {
            m.status = MatchStatus::Scheduled;
            m.winner = None;
        }
        (Slot::Team(team), Slot::Bye) | (Slot::Bye, Slot::Team(team)) => {
            m.status = MatchStatus::Completed;
            m.winner = Some(team);
        }
        _ => {
            m.status = MatchStatus::Pending;
            m.winner = None;
        }
    }
}


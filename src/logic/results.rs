//! Result entry: start a match, record set scores or a walkover, advance, and rank at the end.

use crate::logic::advancement::{advance, Advancement};
use crate::logic::ranking;
use crate::logic::scoring::decide;
use crate::models::{
    Bracket, MatchId, MatchRef, MatchStatus, SetScore, Side, TeamId, Tournament, TournamentError,
    TournamentState,
};
use chrono::Utc;
use log::{info, warn};

/// Mark a scheduled match as being played.
pub fn start_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Playing {
        return Err(TournamentError::InvalidState);
    }
    let at = tournament.locate_match(match_id)?;
    let m = bracket_mut(tournament)?
        .get_mut(at)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    match m.status {
        MatchStatus::Scheduled => {
            m.status = MatchStatus::InProgress;
            Ok(())
        }
        MatchStatus::InProgress => Ok(()),
        MatchStatus::Pending | MatchStatus::Completed => Err(TournamentError::MatchNotReady(match_id)),
    }
}

/// Record the set scores of a match and advance its winner.
///
/// A completed match may be corrected while the match its winner went to is unplayed.
pub fn record_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    sets: Vec<SetScore>,
) -> Result<Advancement, TournamentError> {
    let side = decide(&sets, tournament.scoring)?;
    complete(tournament, match_id, Decision::Played { sets, side })
}

/// Award a match to `winner` without play (retirement, no-show).
pub fn record_walkover(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: TeamId,
) -> Result<Advancement, TournamentError> {
    complete(tournament, match_id, Decision::Walkover(winner))
}

/// Recompute the ranking from the current bracket, replacing the stored one.
pub fn rerank(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let placements = tournament
        .bracket
        .as_ref()
        .and_then(ranking::compute)
        .ok_or(TournamentError::InvalidState)?;
    tournament.ranking = Some(placements);
    tournament.state = TournamentState::Completed;
    info!("tournament {}: ranking recomputed", tournament.id);
    Ok(())
}

enum Decision {
    Played { sets: Vec<SetScore>, side: Side },
    Walkover(TeamId),
}

fn complete(
    tournament: &mut Tournament,
    match_id: MatchId,
    decision: Decision,
) -> Result<Advancement, TournamentError> {
    if tournament.state == TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    let at = tournament.locate_match(match_id)?;
    // Work on a copy so a rejected advancement leaves the stored bracket untouched.
    let mut bracket = bracket_mut(tournament)?.clone();
    apply_decision(&mut bracket, at, match_id, decision)?;
    let outcome = advance(&mut bracket, at)?;
    tournament.bracket = Some(bracket);
    finish_if_done(tournament);
    Ok(outcome)
}

fn apply_decision(
    bracket: &mut Bracket,
    at: MatchRef,
    match_id: MatchId,
    decision: Decision,
) -> Result<(), TournamentError> {
    let m = bracket
        .get_mut(at)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.is_bye() || m.team_1.team().is_none() || m.team_2.team().is_none() {
        return Err(TournamentError::MatchNotReady(match_id));
    }
    let (winner, sets, walkover) = match decision {
        Decision::Played { sets, side } => {
            let winner = m.slot(side).team().ok_or(TournamentError::MatchNotReady(match_id))?;
            (winner, sets, false)
        }
        Decision::Walkover(team) => {
            m.side_of(team).ok_or(TournamentError::TeamNotInMatch(team))?;
            (team, Vec::new(), true)
        }
    };
    let unchanged = m.status == MatchStatus::Completed
        && m.winner == Some(winner)
        && m.walkover == walkover
        && m.sets == sets;
    if unchanged {
        return Ok(());
    }
    m.sets = sets;
    m.walkover = walkover;
    m.winner = Some(winner);
    m.status = MatchStatus::Completed;
    m.completed_at = Some(Utc::now());
    Ok(())
}

/// Rank the tournament the first time the bracket finishes. Later corrections only warn.
fn finish_if_done(tournament: &mut Tournament) {
    let Some(placements) = tournament.bracket.as_ref().and_then(ranking::compute) else {
        return;
    };
    match &tournament.ranking {
        None => {
            info!("tournament {}: completed", tournament.id);
            tournament.ranking = Some(placements);
            tournament.state = TournamentState::Completed;
        }
        Some(current) if *current != placements => {
            warn!(
                "tournament {}: results changed after ranking; rerank to update it",
                tournament.id
            );
        }
        Some(_) => {}
    }
}

fn bracket_mut(tournament: &mut Tournament) -> Result<&mut Bracket, TournamentError> {
    tournament.bracket.as_mut().ok_or(TournamentError::InvalidState)
}

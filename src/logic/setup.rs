//! Setup phase: seeding, team import, bracket generation, and reset.

use crate::logic::advancement::seat_byes;
use crate::logic::bracket::build;
use crate::logic::import::parse_teams;
use crate::logic::seeding::{seed_by_draw, seed_by_ranking};
use crate::models::{Bracket, TeamId, Tournament, TournamentError, TournamentState};
use log::info;
use serde::{Deserialize, Serialize};

/// How seeds are assigned to all registered teams.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingMethod {
    /// By numeric ranking, strongest first.
    Ranking,
    /// Random draw.
    Draw,
}

/// Assign seeds `1..=N` to every team (Setup only).
pub fn seed_teams(tournament: &mut Tournament, method: SeedingMethod) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    match method {
        SeedingMethod::Ranking => seed_by_ranking(&mut tournament.teams),
        SeedingMethod::Draw => seed_by_draw(&mut tournament.teams),
    }
    info!(
        "tournament {}: seeded {} teams by {:?}",
        tournament.id,
        tournament.teams.len(),
        method
    );
    Ok(())
}

/// Register every team in a CSV upload. All-or-nothing: one bad row rejects the whole file.
pub fn import_teams(tournament: &mut Tournament, csv: &str) -> Result<Vec<TeamId>, TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    let teams = parse_teams(csv)?;
    let mut staged = tournament.clone();
    let ids = teams
        .into_iter()
        .map(|team| staged.add_team(team))
        .collect::<Result<Vec<_>, _>>()?;
    *tournament = staged;
    info!("tournament {}: imported {} teams", tournament.id, ids.len());
    Ok(ids)
}

/// Build the bracket from the seeded teams and seat first-round byes (Setup -> Playing).
pub fn generate_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    let mut bracket = Bracket::new(build(&tournament.teams, tournament.options)?);
    let byes = seat_byes(&mut bracket)?;
    info!(
        "tournament {}: generated {}-slot bracket for {} teams ({} byes)",
        tournament.id,
        bracket.size(),
        tournament.teams.len(),
        byes
    );
    tournament.bracket = Some(bracket);
    tournament.ranking = None;
    tournament.state = TournamentState::Playing;
    Ok(())
}

/// Delete the bracket and ranking and go back to Setup. Teams and seeds are kept.
pub fn reset_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state == TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    tournament.bracket = None;
    tournament.ranking = None;
    tournament.state = TournamentState::Setup;
    info!("tournament {}: bracket reset", tournament.id);
    Ok(())
}

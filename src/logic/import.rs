//! Team import from CSV (`name,players,ranking`; players separated by `/`).

use crate::models::Team;
use serde::Deserialize;

#[derive(Deserialize)]
struct TeamRecord {
    name: String,
    #[serde(default)]
    players: String,
    #[serde(default)]
    ranking: Option<u32>,
}

/// Parse teams from CSV with a header row. Blank names are skipped.
pub fn parse_teams(data: &str) -> Result<Vec<Team>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());
    let mut teams = Vec::new();
    for record in reader.deserialize::<TeamRecord>() {
        let record = record?;
        if record.name.is_empty() {
            continue;
        }
        let players = record
            .players
            .split('/')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect();
        let mut team = Team::new(record.name).with_players(players);
        team.ranking = record.ranking;
        teams.push(team);
    }
    Ok(teams)
}

//! Integration tests for the bracket builder: sizing, seeding placement, byes, and feeds.

use padel_tournament_web::logic::bracket_size;
use padel_tournament_web::{
    build, BracketError, BracketOptions, MatchRef, MatchStatus, Round, RoundType, Side, Slot,
    Team, TeamId,
};
use std::collections::HashSet;

fn seeded_teams(n: u32) -> Vec<Team> {
    (1..=n)
        .map(|s| Team::new(format!("Seed {s}")).with_seed(s))
        .collect()
}

fn seed_id(teams: &[Team], seed: u32) -> TeamId {
    teams[seed as usize - 1].id
}

fn first_round_position(rounds: &[Round], team: TeamId) -> usize {
    rounds[0]
        .matches
        .iter()
        .find(|m| m.team_1 == Slot::Team(team) || m.team_2 == Slot::Team(team))
        .map(|m| m.position)
        .unwrap()
}

#[test]
fn rejects_team_count_outside_range() {
    for n in [0, 1, 33] {
        let teams = seeded_teams(n);
        assert_eq!(
            build(&teams, BracketOptions::default()),
            Err(BracketError::TeamCount(n as usize))
        );
    }
}

#[test]
fn rejects_bad_seeds() {
    let mut teams = seeded_teams(4);
    teams[3].seed = Some(2);
    assert_eq!(
        build(&teams, BracketOptions::default()),
        Err(BracketError::DuplicateSeed(2))
    );

    teams[3].seed = None;
    assert_eq!(
        build(&teams, BracketOptions::default()),
        Err(BracketError::MissingSeed(teams[3].id))
    );

    teams[3].seed = Some(5);
    assert_eq!(
        build(&teams, BracketOptions::default()),
        Err(BracketError::SeedOutOfRange { seed: 5, count: 4 })
    );
}

#[test]
fn round_structure_for_every_team_count() {
    for n in 2..=32u32 {
        let teams = seeded_teams(n);
        let rounds = build(&teams, BracketOptions::default()).unwrap();
        let size = bracket_size(n as usize).unwrap();

        assert_eq!(rounds.len(), size.trailing_zeros() as usize, "n={n}");
        assert_eq!(rounds.last().unwrap().round_type, RoundType::Final);
        assert_eq!(rounds[0].round_type, RoundType::for_slots(size).unwrap());
        for (i, round) in rounds.iter().enumerate() {
            assert_eq!(round.index, i);
            assert_eq!(round.matches.len(), size >> (i + 1), "n={n} round={i}");
        }
        for pair in rounds.windows(2) {
            assert_eq!(pair[1].matches.len(), pair[0].matches.len() / 2);
            assert_eq!(pair[0].round_type.next(), Some(pair[1].round_type));
        }
    }
}

#[test]
fn every_team_in_exactly_one_first_round_slot() {
    for n in 2..=32u32 {
        let teams = seeded_teams(n);
        let rounds = build(&teams, BracketOptions::default()).unwrap();
        let placed: Vec<TeamId> = rounds[0]
            .matches
            .iter()
            .flat_map(|m| [m.team_1.team(), m.team_2.team()])
            .flatten()
            .collect();
        let unique: HashSet<_> = placed.iter().copied().collect();
        assert_eq!(placed.len(), n as usize, "n={n}");
        assert_eq!(unique, teams.iter().map(|t| t.id).collect(), "n={n}");
    }
}

#[test]
fn byes_are_completed_with_their_team_as_winner() {
    for n in 2..=32u32 {
        let teams = seeded_teams(n);
        let rounds = build(&teams, BracketOptions::default()).unwrap();
        let size = bracket_size(n as usize).unwrap();
        let byes: Vec<_> = rounds[0].matches.iter().filter(|m| m.is_bye()).collect();
        assert_eq!(byes.len(), size - n as usize, "n={n}");
        for m in byes {
            assert_eq!(m.status, MatchStatus::Completed);
            let team = m.team_1.team().or(m.team_2.team()).unwrap();
            assert_eq!(m.winner, Some(team));
            assert!(m.team_1 == Slot::Bye || m.team_2 == Slot::Bye);
        }
        for m in rounds[0].matches.iter().filter(|m| !m.is_bye()) {
            assert_eq!(m.status, MatchStatus::Scheduled);
            assert_eq!(m.winner, None);
        }
    }
}

#[test]
fn later_rounds_start_unresolved() {
    let rounds = build(&seeded_teams(11), BracketOptions::default()).unwrap();
    for m in rounds.iter().skip(1).flat_map(|r| &r.matches) {
        assert_eq!(m.team_1, Slot::Unresolved);
        assert_eq!(m.team_2, Slot::Unresolved);
        assert_eq!(m.status, MatchStatus::Pending);
        assert_eq!(m.winner, None);
    }
}

#[test]
fn top_two_seeds_in_opposite_halves() {
    for n in 3..=32u32 {
        let teams = seeded_teams(n);
        let rounds = build(&teams, BracketOptions::default()).unwrap();
        let half = rounds[0].matches.len() / 2;
        assert!(first_round_position(&rounds, seed_id(&teams, 1)) < half, "n={n}");
        assert!(first_round_position(&rounds, seed_id(&teams, 2)) >= half, "n={n}");
    }
}

#[test]
fn top_four_seeds_in_different_quarters() {
    for n in 5..=32u32 {
        let teams = seeded_teams(n);
        let rounds = build(&teams, BracketOptions::default()).unwrap();
        let quarter = rounds[0].matches.len() / 4;
        let quarters: HashSet<_> = (1..=4)
            .map(|s| first_round_position(&rounds, seed_id(&teams, s)) / quarter)
            .collect();
        assert_eq!(quarters.len(), 4, "n={n}");
    }
}

#[test]
fn four_teams_pair_one_with_four_and_two_with_three() {
    let teams = seeded_teams(4);
    let rounds = build(&teams, BracketOptions::default()).unwrap();
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0].round_type, RoundType::SemiFinal);
    let semis = &rounds[0].matches;
    assert_eq!(semis[0].team_1, Slot::Team(seed_id(&teams, 1)));
    assert_eq!(semis[0].team_2, Slot::Team(seed_id(&teams, 4)));
    assert_eq!(semis[1].team_1, Slot::Team(seed_id(&teams, 2)));
    assert_eq!(semis[1].team_2, Slot::Team(seed_id(&teams, 3)));
}

#[test]
fn five_teams_give_three_byes_and_one_real_match() {
    let teams = seeded_teams(5);
    let rounds = build(&teams, BracketOptions::default()).unwrap();
    assert_eq!(rounds[0].round_type, RoundType::QuarterFinal);
    let real: Vec<_> = rounds[0].matches.iter().filter(|m| !m.is_bye()).collect();
    assert_eq!(real.len(), 1);
    assert_eq!(real[0].team_1, Slot::Team(seed_id(&teams, 4)));
    assert_eq!(real[0].team_2, Slot::Team(seed_id(&teams, 5)));
    let bye_winners: HashSet<_> = rounds[0]
        .matches
        .iter()
        .filter(|m| m.is_bye())
        .filter_map(|m| m.winner)
        .collect();
    assert_eq!(
        bye_winners,
        [1, 2, 3].iter().map(|&s| seed_id(&teams, s)).collect()
    );
}

#[test]
fn feeds_into_pointers_follow_position() {
    let rounds = build(&seeded_teams(16), BracketOptions::default()).unwrap();
    for round in &rounds[..rounds.len() - 1] {
        for m in &round.matches {
            let to = m.winner_to.unwrap();
            assert_eq!(to.at, MatchRef::new(round.index + 1, m.position / 2));
            let side = if m.position % 2 == 0 { Side::One } else { Side::Two };
            assert_eq!(to.side, side);
            assert_eq!(m.loser_to, None);
        }
    }
    assert_eq!(rounds.last().unwrap().matches[0].winner_to, None);
}

#[test]
fn third_place_round_fed_by_semi_final_losers() {
    let options = BracketOptions {
        third_place_match: true,
    };
    let rounds = build(&seeded_teams(8), options).unwrap();
    assert_eq!(rounds.len(), 4);
    let third = &rounds[3];
    assert_eq!(third.round_type, RoundType::ThirdPlace);
    assert_eq!(third.matches.len(), 1);
    assert_eq!(third.matches[0].winner_to, None);

    let semis = &rounds[1];
    assert_eq!(semis.round_type, RoundType::SemiFinal);
    let sides: Vec<_> = semis
        .matches
        .iter()
        .map(|m| m.loser_to.unwrap())
        .map(|to| (to.at, to.side))
        .collect();
    assert_eq!(
        sides,
        vec![(MatchRef::new(3, 0), Side::One), (MatchRef::new(3, 0), Side::Two)]
    );

    // Two teams: no semi-finals, so no third-place match either.
    assert_eq!(build(&seeded_teams(2), options).unwrap().len(), 1);
}

#[test]
fn build_is_deterministic() {
    let teams = seeded_teams(13);
    let slots = |rounds: Vec<Round>| -> Vec<(Slot, Slot, MatchStatus)> {
        rounds
            .into_iter()
            .flat_map(|r| r.matches)
            .map(|m| (m.team_1, m.team_2, m.status))
            .collect()
    };
    assert_eq!(
        slots(build(&teams, BracketOptions::default()).unwrap()),
        slots(build(&teams, BracketOptions::default()).unwrap())
    );
}

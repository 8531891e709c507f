//! Seeding and round geometry: bracket size, seed-to-slot order, and seed assignment.

use crate::models::Team;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fewest teams a bracket can be built for.
pub const MIN_TEAMS: usize = 2;
/// Most teams a bracket can be built for.
pub const MAX_TEAMS: usize = 32;

/// Smallest power of two that holds `team_count` teams, or `None` outside `MIN_TEAMS..=MAX_TEAMS`.
pub fn bracket_size(team_count: usize) -> Option<usize> {
    if (MIN_TEAMS..=MAX_TEAMS).contains(&team_count) {
        Some(team_count.next_power_of_two())
    } else {
        None
    }
}

/// Number of elimination rounds for a bracket of `size` slots.
pub fn round_count(size: usize) -> usize {
    size.trailing_zeros() as usize
}

/// Seed number for each first-round slot of a bracket of `size` slots.
///
/// Slots `2i` and `2i + 1` meet in the first round. Built by mirroring: every seed `s` in the
/// order for `n` slots is followed by its opponent `2n + 1 - s`, so seeds 1 and 2 sit in
/// opposite halves, seeds 1..=4 in different quarters, and so on.
pub fn seed_order(size: usize) -> Vec<u32> {
    let mut seeds = vec![1u32];
    while seeds.len() < size {
        let n = seeds.len() as u32;
        seeds = seeds
            .iter()
            .flat_map(|&seed| [seed, 2 * n + 1 - seed])
            .collect();
    }
    seeds
}

/// Assign seeds `1..=N` by ranking (lower ranking = better seed). Unranked teams go last,
/// ties and unranked teams are ordered randomly.
pub fn seed_by_ranking(teams: &mut [Team]) {
    let mut rng = rand::thread_rng();
    let mut keyed: Vec<(usize, Option<u32>, u32)> = teams
        .iter()
        .enumerate()
        .map(|(i, t)| (i, t.ranking, rng.gen::<u32>()))
        .collect();
    keyed.sort_by_key(|&(_, ranking, tiebreak)| (ranking.is_none(), ranking, tiebreak));
    for (seed, (i, _, _)) in keyed.into_iter().enumerate() {
        teams[i].seed = Some(seed as u32 + 1);
    }
}

/// Assign seeds `1..=N` by random draw.
pub fn seed_by_draw(teams: &mut [Team]) {
    let mut seeds: Vec<u32> = (1..=teams.len() as u32).collect();
    seeds.shuffle(&mut rand::thread_rng());
    for (team, seed) in teams.iter_mut().zip(seeds) {
        team.seed = Some(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_orders() {
        assert_eq!(seed_order(2), vec![1, 2]);
        assert_eq!(seed_order(4), vec![1, 4, 2, 3]);
        assert_eq!(seed_order(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
        assert_eq!(
            seed_order(16),
            vec![1, 16, 8, 9, 4, 13, 5, 12, 2, 15, 7, 10, 3, 14, 6, 11]
        );
    }

    #[test]
    fn order_is_a_permutation() {
        for size in [2, 4, 8, 16, 32] {
            let mut order = seed_order(size);
            order.sort_unstable();
            assert_eq!(order, (1..=size as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn sizes_and_round_counts() {
        assert_eq!(bracket_size(1), None);
        assert_eq!(bracket_size(2), Some(2));
        assert_eq!(bracket_size(3), Some(4));
        assert_eq!(bracket_size(5), Some(8));
        assert_eq!(bracket_size(17), Some(32));
        assert_eq!(bracket_size(32), Some(32));
        assert_eq!(bracket_size(33), None);
        assert_eq!(round_count(2), 1);
        assert_eq!(round_count(32), 5);
    }

    #[test]
    fn ranking_seeds_strongest_first_and_unranked_last() {
        let mut teams = vec![
            Team::new("C").with_ranking(30),
            Team::new("Unranked"),
            Team::new("A").with_ranking(2),
            Team::new("B").with_ranking(7),
        ];
        seed_by_ranking(&mut teams);
        let seeds: Vec<_> = teams.iter().map(|t| t.seed).collect();
        assert_eq!(seeds, vec![Some(3), Some(4), Some(1), Some(2)]);
    }

    #[test]
    fn draw_assigns_every_seed_once() {
        let mut teams: Vec<Team> = (0..6).map(|i| Team::new(format!("T{i}"))).collect();
        seed_by_draw(&mut teams);
        let mut seeds: Vec<u32> = teams.iter().filter_map(|t| t.seed).collect();
        seeds.sort_unstable();
        assert_eq!(seeds, vec![1, 2, 3, 4, 5, 6]);
    }
}

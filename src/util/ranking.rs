//! Competition ranking

use crate::types::TeamRating;
use std::collections::HashMap;

/// Convert raw values (lower is better) into competition rank labels.
///
/// Values are sorted ascending; every group of equal values receives the
/// sorted position of its first member. `[1, 2, 1]` becomes `[0, 2, 0]`.
pub fn rank(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0; values.len()];
    let mut group_start = 0;
    for (position, &index) in order.iter().enumerate() {
        if position > 0 && values[index] != values[order[position - 1]] {
            group_start = position;
        }
        ranks[index] = group_start;
    }
    ranks
}

/// Ranks implied by input order: team 0 wins, team 1 is second, and so on
pub fn default_ranks(team_count: usize) -> Vec<usize> {
    (0..team_count).collect()
}

/// For each team, how many teams (itself included) share its rank
pub fn count_by_rank(team_ratings: &[TeamRating<'_>]) -> Vec<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for team in team_ratings {
        *counts.entry(team.rank).or_insert(0) += 1;
    }
    team_ratings.iter().map(|team| counts[&team.rank]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rating;

    #[test]
    fn test_rank_distinct_values() {
        assert_eq!(rank(&[2.0, 1.0, 4.0, 3.0]), vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_rank_ties_share_first_position() {
        assert_eq!(rank(&[1.0, 2.0, 1.0]), vec![0, 2, 0]);
        assert_eq!(rank(&[1.0, 1.0, 1.0, 4.0]), vec![0, 0, 0, 3]);
    }

    #[test]
    fn test_rank_negated_scores() {
        let scores = [10.0, 5.0, 5.0, 2.0, 1.0];
        let negated: Vec<f64> = scores.iter().map(|s| -s).collect();
        assert_eq!(rank(&negated), vec![0, 1, 1, 3, 4]);
    }

    #[test]
    fn test_rank_fractional_labels() {
        assert_eq!(rank(&[1.5, 1.2, 1.7]), vec![1, 0, 2]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn test_default_ranks_match_input_order() {
        let as_values: Vec<f64> = (0..4).map(|i| i as f64).collect();
        assert_eq!(default_ranks(4), rank(&as_values));
    }

    #[test]
    fn test_count_by_rank() {
        let players = [Rating::default()];
        let team = |rank| TeamRating {
            players: &players,
            mu: 25.0,
            sigma_sq: 1.0,
            rank,
        };

        let distinct = vec![team(0), team(1)];
        assert_eq!(count_by_rank(&distinct), vec![1, 1]);

        let shared = vec![team(1), team(1), team(1), team(4)];
        assert_eq!(count_by_rank(&shared), vec![3, 3, 3, 1]);
    }
}

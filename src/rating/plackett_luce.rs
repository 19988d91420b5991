//! Plackett-Luce full pairing update
//!
//! Every team is compared against every team that finished at or above it,
//! using a single pooled comparison scale. Teams that tie receive the same
//! net mean shift.

use super::aggregate::partition_sums;
use super::model::{GammaArgs, RatingModel};
use crate::types::{Team, TeamRating};
use crate::util::count_by_rank;
use std::collections::BTreeMap;
use tracing::trace;

/// Update rank-sorted teams; `ranks`, `scores` and `weights` follow the same order
pub(crate) fn compute(
    model: &RatingModel,
    teams: &[Team],
    ranks: &[usize],
    scores: Option<&[f64]>,
    weights: Option<&[Vec<f64>]>,
) -> Vec<Team> {
    let team_ratings = model.aggregate_team_ratings(teams, Some(ranks));
    let c = model.team_sqrt_sigma(&team_ratings);
    let adjusted_mu = model.margin_adjusted_mu(&team_ratings, scores);
    let sum_q = partition_sums(&team_ratings, &adjusted_mu, c);
    let rank_counts = count_by_rank(&team_ratings);

    trace!(c, teams = team_ratings.len(), "Plackett-Luce compute");

    let mut result: Vec<Team> = team_ratings
        .iter()
        .enumerate()
        .map(|(i, team_i)| {
            let i_mu_over_c = (adjusted_mu[i] / c).exp();
            let mut omega = 0.0;
            let mut delta = 0.0;

            for (q, team_q) in team_ratings.iter().enumerate() {
                if team_q.rank > team_i.rank {
                    continue;
                }

                let p = i_mu_over_c / sum_q[q];
                let count = rank_counts[q] as f64;
                delta += p * (1.0 - p) / count;
                if q == i {
                    omega += (1.0 - p) / count;
                } else {
                    omega -= p / count;
                }
            }

            let team_weights = weights.and_then(|w| w.get(i)).map(Vec::as_slice);
            omega *= team_i.sigma_sq / c;
            delta *= team_i.sigma_sq / (c * c);
            delta *= model.gamma(&GammaArgs {
                c,
                team_count: team_ratings.len(),
                mu: team_i.mu,
                sigma_sq: team_i.sigma_sq,
                players: team_i.players,
                rank: team_i.rank,
                weights: team_weights,
            });

            model.update_team(team_i, omega, delta, team_weights)
        })
        .collect();

    average_tied_mu(teams, &team_ratings, &mut result);
    result
}

/// Give every team in a tied rank group the group's average first-player mean shift
fn average_tied_mu(teams: &[Team], team_ratings: &[TeamRating<'_>], result: &mut [Team]) {
    let mut rank_groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, team) in team_ratings.iter().enumerate() {
        rank_groups.entry(team.rank).or_default().push(index);
    }

    for indices in rank_groups.values().filter(|group| group.len() > 1) {
        let average_change = indices
            .iter()
            .map(|&i| result[i].players[0].mu - teams[i].players[0].mu)
            .sum::<f64>()
            / indices.len() as f64;

        for &i in indices {
            for (player, before) in result[i].players.iter_mut().zip(&teams[i].players) {
                player.mu = before.mu + average_change;
            }
        }
    }
}

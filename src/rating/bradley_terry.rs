//! Bradley-Terry partial pairing update
//!
//! Each team is compared only against the teams within a sliding window of
//! the rank order, using a logistic win probability per pair. A larger
//! window approaches full pairing accuracy at quadratic cost.

use super::aggregate::margin_factor;
use super::model::{GammaArgs, RatingModel};
use crate::types::Team;
use tracing::trace;

/// Update rank-sorted teams; `ranks`, `scores` and `weights` follow the same order
pub(crate) fn compute(
    model: &RatingModel,
    teams: &[Team],
    ranks: &[usize],
    scores: Option<&[f64]>,
    weights: Option<&[Vec<f64>]>,
    window_size: usize,
) -> Vec<Team> {
    let team_ratings = model.aggregate_team_ratings(teams, Some(ranks));
    let team_count = team_ratings.len();
    let beta_sq = model.config().beta_sq();
    let margin = model.config().margin;

    trace!(window_size, teams = team_count, "Bradley-Terry compute");

    team_ratings
        .iter()
        .enumerate()
        .map(|(i, team_i)| {
            let team_weights = weights.and_then(|w| w.get(i)).map(Vec::as_slice);
            let mut omega_sum = 0.0;
            let mut delta_sum = 0.0;
            let mut comparisons = 0;

            let start = i.saturating_sub(window_size);
            let end = team_count.min(i + window_size + 1);

            for q in (start..end).filter(|&q| q != i) {
                let team_q = &team_ratings[q];

                let mut factor = 1.0;
                if let Some(scores) = scores.filter(|s| s.len() == team_count) {
                    let score_diff = (scores[q] - scores[i]).abs();
                    if score_diff > 0.0 && team_q.rank < team_i.rank {
                        factor = margin_factor(score_diff, margin);
                    }
                }

                let c_iq = (team_i.sigma_sq + team_q.sigma_sq + 2.0 * beta_sq).sqrt();
                let p_iq = 1.0 / (1.0 + ((team_q.mu - team_i.mu) * factor / c_iq).exp());
                let sigma_to_c_iq = team_i.sigma_sq / c_iq;

                let s = if team_q.rank > team_i.rank {
                    1.0
                } else if team_q.rank == team_i.rank {
                    0.5
                } else {
                    0.0
                };

                let gamma = model.gamma(&GammaArgs {
                    c: c_iq,
                    team_count,
                    mu: team_i.mu,
                    sigma_sq: team_i.sigma_sq,
                    players: team_i.players,
                    rank: team_i.rank,
                    weights: team_weights,
                });

                omega_sum += sigma_to_c_iq * (s - p_iq);
                delta_sum += gamma * sigma_to_c_iq / c_iq * p_iq * (1.0 - p_iq);
                comparisons += 1;
            }

            let (omega, delta) = if comparisons > 0 {
                (
                    omega_sum / comparisons as f64,
                    delta_sum / comparisons as f64,
                )
            } else {
                (0.0, 0.0)
            };

            model.update_team(team_i, omega, delta, team_weights)
        })
        .collect()
}

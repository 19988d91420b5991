//! Team aggregation and the shared partition-function math

use super::model::RatingModel;
use crate::types::{Team, TeamRating};
use crate::util::default_ranks;
use tracing::warn;

impl RatingModel {
    /// Fold each team's players into a single team belief.
    ///
    /// Without `ranks` (or with ranks of the wrong length) the input order is
    /// used as the finishing order. With `balance` enabled, weaker players
    /// are weighted up by `1 + (max_ordinal - ordinal) / (max_ordinal + kappa)`.
    pub fn aggregate_team_ratings<'a>(
        &self,
        teams: &'a [Team],
        ranks: Option<&[usize]>,
    ) -> Vec<TeamRating<'a>> {
        let ranks = match ranks {
            Some(ranks) if ranks.len() == teams.len() => ranks.to_vec(),
            Some(ranks) => {
                warn!(
                    "Ignoring {} ranks for {} teams, using input order",
                    ranks.len(),
                    teams.len()
                );
                default_ranks(teams.len())
            }
            None => default_ranks(teams.len()),
        };

        teams
            .iter()
            .zip(ranks)
            .map(|(team, rank)| {
                let max_ordinal = team
                    .players
                    .iter()
                    .map(|player| player.ordinal())
                    .fold(f64::NEG_INFINITY, f64::max);

                let (mu, sigma_sq) = team
                    .players
                    .iter()
                    .fold((0.0, 0.0), |(mu, sigma_sq), player| {
                        let weight = if self.config().balance {
                            1.0 + (max_ordinal - player.ordinal())
                                / (max_ordinal + self.config().kappa)
                        } else {
                            1.0
                        };
                        (
                            mu + player.mu * weight,
                            sigma_sq + (player.sigma * weight).powi(2),
                        )
                    });

                TeamRating {
                    players: &team.players,
                    mu,
                    sigma_sq,
                    rank,
                }
            })
            .collect()
    }

    /// Pooled comparison scale `sqrt(sum(sigma_sq + beta^2))`
    pub fn team_sqrt_sigma(&self, team_ratings: &[TeamRating<'_>]) -> f64 {
        let beta_sq = self.config().beta_sq();
        team_ratings
            .iter()
            .map(|team| team.sigma_sq + beta_sq)
            .sum::<f64>()
            .sqrt()
    }

    /// Team means shifted by the margin of victory against every team with a different score.
    ///
    /// Without scores (or with scores of the wrong length) the plain team means are returned.
    pub fn margin_adjusted_mu(
        &self,
        team_ratings: &[TeamRating<'_>],
        scores: Option<&[f64]>,
    ) -> Vec<f64> {
        let scores = match scores {
            Some(scores) if scores.len() == team_ratings.len() => scores,
            _ => return team_ratings.iter().map(|team| team.mu).collect(),
        };
        let margin = self.config().margin;

        team_ratings
            .iter()
            .enumerate()
            .map(|(i, team_i)| {
                let mut adjustment = 0.0;
                let mut comparisons = 0;

                for (j, team_j) in team_ratings.iter().enumerate() {
                    let score_diff = (scores[i] - scores[j]).abs();
                    if i == j || score_diff <= 0.0 {
                        continue;
                    }

                    let factor = margin_factor(score_diff, margin);
                    let direction = if scores[i] > scores[j] { 1.0 } else { -1.0 };
                    adjustment += (team_i.mu - team_j.mu) * (factor - 1.0) * direction;
                    comparisons += 1;
                }

                if comparisons > 0 {
                    team_i.mu + adjustment / comparisons as f64
                } else {
                    team_i.mu
                }
            })
            .collect()
    }

    /// For each team `q`, the sum of `exp(mu / c)` over `q` and every team ranked at or below it
    pub fn sum_q(
        &self,
        team_ratings: &[TeamRating<'_>],
        c: f64,
        scores: Option<&[f64]>,
    ) -> Vec<f64> {
        let adjusted_mu = self.margin_adjusted_mu(team_ratings, scores);
        partition_sums(team_ratings, &adjusted_mu, c)
    }
}

/// `ln(1 + diff / margin)` once `diff` exceeds a positive margin, otherwise 1
pub(crate) fn margin_factor(score_diff: f64, margin: f64) -> f64 {
    if margin > 0.0 && score_diff > margin {
        (1.0 + score_diff / margin).ln()
    } else {
        1.0
    }
}

pub(crate) fn partition_sums(
    team_ratings: &[TeamRating<'_>],
    adjusted_mu: &[f64],
    c: f64,
) -> Vec<f64> {
    team_ratings
        .iter()
        .map(|team_q| {
            team_ratings
                .iter()
                .zip(adjusted_mu)
                .filter(|(team_i, _)| team_i.rank >= team_q.rank)
                .map(|(_, mu)| (mu / c).exp())
                .sum()
        })
        .collect()
}

//! Win and draw probability prediction

use super::model::RatingModel;
use crate::stats::normal;
use crate::types::Team;
use tracing::trace;

impl RatingModel {
    /// Probability of each team winning, in input order.
    ///
    /// The probabilities sum to 1. A single team always wins.
    pub fn predict_win(&self, teams: &[Team]) -> Vec<f64> {
        match teams.len() {
            0 => return Vec::new(),
            1 => return vec![1.0],
            _ => {}
        }

        let team_ratings = self.aggregate_team_ratings(teams, None);
        let n = team_ratings.len() as f64;
        let pair_count = n * (n - 1.0) / 2.0;
        let spread = n * self.config().beta_sq();

        team_ratings
            .iter()
            .enumerate()
            .map(|(i, team_a)| {
                team_ratings
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, team_b)| {
                        let denom = (spread + team_a.sigma_sq + team_b.sigma_sq).sqrt();
                        normal::cdf((team_a.mu - team_b.mu) / denom)
                    })
                    .sum::<f64>()
                    / pair_count
            })
            .collect()
    }

    /// Probability that the match ends in a draw, averaged over every pair of teams
    pub fn predict_draw(&self, teams: &[Team]) -> f64 {
        if teams.len() < 2 {
            return 1.0;
        }

        let team_ratings = self.aggregate_team_ratings(teams, None);
        let total_players = teams.iter().map(Team::len).sum::<usize>() as f64;
        let beta_sq = self.config().beta_sq();
        let draw_margin = total_players.sqrt()
            * self.config().beta
            * normal::inv_cdf((1.0 + 1.0 / total_players) / 2.0);

        trace!(total_players, draw_margin, "Predicting draw");

        let mut probability_sum = 0.0;
        let mut pair_count = 0;
        for (i, team_a) in team_ratings.iter().enumerate() {
            for team_b in &team_ratings[i + 1..] {
                let denom = (total_players * beta_sq + team_a.sigma_sq + team_b.sigma_sq).sqrt();
                probability_sum += normal::cdf((draw_margin - team_a.mu + team_b.mu) / denom)
                    - normal::cdf((team_b.mu - team_a.mu - draw_margin) / denom);
                pair_count += 1;
            }
        }

        probability_sum / pair_count as f64
    }
}

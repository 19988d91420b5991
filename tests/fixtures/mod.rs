//! Test fixtures and match builders for integration testing

use parlor_rating::{ModelConfig, Rating, RatingModel, Team};

/// Teams of players at the model's prior, one team per entry in `sizes`
pub fn default_teams(model: &RatingModel, sizes: &[usize]) -> Vec<Team> {
    sizes
        .iter()
        .map(|&size| Team::new(vec![model.rating(); size]))
        .collect()
}

/// A team whose players all share one rating
pub fn uniform_team(mu: f64, sigma: f64, size: usize) -> Team {
    Team::new(vec![Rating::new(mu, sigma); size])
}

/// Free-for-all teams, one player each
pub fn solo_teams(ratings: &[(f64, f64)]) -> Vec<Team> {
    ratings
        .iter()
        .map(|&(mu, sigma)| Team::new(vec![Rating::new(mu, sigma)]))
        .collect()
}

/// Both model variants built from the same configuration
pub fn both_models(config: ModelConfig) -> Vec<RatingModel> {
    vec![
        RatingModel::plackett_luce(config.clone()).unwrap(),
        RatingModel::bradley_terry_part(config).unwrap(),
    ]
}

/// Net mean change of every player, per team
pub fn mu_deltas(before: &[Team], after: &[Team]) -> Vec<Vec<f64>> {
    before
        .iter()
        .zip(after)
        .map(|(old, new)| {
            old.players
                .iter()
                .zip(&new.players)
                .map(|(o, n)| n.mu - o.mu)
                .collect()
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} got {} (tolerance {})",
        expected,
        actual,
        tolerance
    );
}

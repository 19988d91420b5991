//! Integration tests for the parlor-rating engine
//!
//! These tests exercise the public API end to end:
//! - Known reference values for both models
//! - Invariants that must hold for any match (property based)
//! - Input validation surfaced through `anyhow`
//! - Configuration loading and serde shapes
//! - Agreement with the skillratings Weng-Lin implementation

mod fixtures;

use fixtures::{assert_close, both_models, default_teams, mu_deltas, solo_teams, uniform_team};
use parlor_rating::config::ModelConfig;
use parlor_rating::{RateOptions, Rating, RatingError, RatingModel, Team};
use proptest::prelude::*;
use skillratings::weng_lin::{weng_lin_multi_team, WengLinConfig, WengLinRating};
use skillratings::MultiTeamOutcome;

fn arb_teams(max_teams: usize) -> impl Strategy<Value = Vec<Team>> {
    prop::collection::vec(
        prop::collection::vec((0.0..50.0f64, 0.5..10.0f64), 1..4),
        2..=max_teams,
    )
    .prop_map(|teams| {
        teams
            .into_iter()
            .map(|players| {
                Team::new(
                    players
                        .into_iter()
                        .map(|(mu, sigma)| Rating::new(mu, sigma))
                        .collect(),
                )
            })
            .collect()
    })
}

fn rating_error(error: anyhow::Error) -> RatingError {
    error
        .downcast_ref::<RatingError>()
        .cloned()
        .expect("rating error")
}

#[test]
fn test_openskill_reference_two_players() {
    let model = RatingModel::default();
    let teams = default_teams(&model, &[1, 1]);

    let result = model.rate(&teams, RateOptions::new().with_tau(0.0)).unwrap();

    assert_close(result[0].players[0].mu, 27.63523138347365, 1e-9);
    assert_close(result[0].players[0].sigma, 8.065506316323548, 1e-9);
    assert_close(result[1].players[0].mu, 22.36476861652635, 1e-9);
    assert_close(result[1].players[0].sigma, 8.065506316323548, 1e-9);
}

#[test]
fn test_aggregate_reference_values() {
    let model = RatingModel::default();

    let teams = default_teams(&model, &[1, 2]);
    let ratings = model.aggregate_team_ratings(&teams, None);
    let c = model.team_sqrt_sigma(&ratings);
    assert_close(c, 15.590239, 1e-6);
    let sum_q = model.sum_q(&ratings, c, None);
    assert_close(sum_q[0], 29.678927, 1e-6);
    assert_close(sum_q[1], 24.708193, 1e-6);

    let teams = default_teams(&model, &[5, 5]);
    let ratings = model.aggregate_team_ratings(&teams, None);
    let c = model.team_sqrt_sigma(&ratings);
    assert_close(c, 27.003, 1e-3);
    let sum_q = model.sum_q(&ratings, c, None);
    assert_close(sum_q[0], 204.8438, 1e-4);
    assert_close(sum_q[1], 102.4219, 1e-4);
}

#[test]
fn test_draw_reference_values() {
    let model = RatingModel::default();

    let even = vec![uniform_team(25.0, 1.0, 2), uniform_team(25.0, 1.0, 2)];
    assert_close(model.predict_draw(&even), 0.243318, 1e-6);

    let uneven = vec![uniform_team(35.0, 1.0, 2), uniform_team(35.0, 1.0, 3)];
    assert_close(model.predict_draw(&uneven), 0.00028074, 1e-6);
}

#[test]
fn test_default_order_team_zero_wins() {
    for model in both_models(ModelConfig::default()) {
        let teams = default_teams(&model, &[2, 2, 2]);
        let result = model.rate(&teams, RateOptions::new()).unwrap();

        assert!(result[0].players[0].mu > 25.0, "{:?}", model.strategy());
        assert!(result[2].players[0].mu < 25.0, "{:?}", model.strategy());
    }
}

#[test]
fn test_scores_match_equivalent_ranks() {
    for model in both_models(ModelConfig::default()) {
        let teams = solo_teams(&[(20.0, 5.0), (28.0, 4.0), (25.0, 6.0)]);

        let by_scores = model
            .rate(&teams, RateOptions::new().with_scores([10.0, 30.0, 20.0]))
            .unwrap();
        let by_ranks = model
            .rate(&teams, RateOptions::new().with_ranks([3.0, 1.0, 2.0]))
            .unwrap();

        assert_eq!(by_scores, by_ranks);
    }
}

#[test]
fn test_tied_teams_share_exact_delta() {
    let model = RatingModel::default();
    let teams = vec![
        uniform_team(25.0, 8.0, 1),
        uniform_team(25.0, 8.0, 3),
        uniform_team(20.0, 5.0, 2),
        uniform_team(25.0, 8.0, 2),
    ];

    let result = model
        .rate(&teams, RateOptions::new().with_ranks([2.0, 1.0, 3.0, 2.0]))
        .unwrap();
    let deltas = mu_deltas(&teams, &result);

    assert_eq!(deltas[0][0], deltas[3][0]);
    assert_eq!(deltas[3][0], deltas[3][1]);
}

#[test]
fn test_limit_sigma_clamps_to_input() {
    let config = ModelConfig {
        limit_sigma: true,
        tau: 5.0,
        ..ModelConfig::default()
    };
    for model in both_models(config) {
        let teams = solo_teams(&[(25.0, 1.0), (25.0, 1.0)]);
        let result = model.rate(&teams, RateOptions::new()).unwrap();

        for (before, after) in teams.iter().zip(&result) {
            assert!(after.players[0].sigma <= before.players[0].sigma);
        }
    }
}

#[test]
fn test_validation_errors_downcast() {
    let model = RatingModel::default();
    let teams = default_teams(&model, &[1, 1]);

    let options = RateOptions::new()
        .with_ranks([1.0, 2.0])
        .with_scores([1.0, 2.0]);
    let conflict = model.rate(&teams, options).unwrap_err();
    assert_eq!(rating_error(conflict), RatingError::ConflictingInputs);

    let mismatch = model
        .rate(&teams, RateOptions::new().with_ranks([1.0, 2.0, 3.0]))
        .unwrap_err();
    assert_eq!(
        rating_error(mismatch),
        RatingError::LengthMismatch {
            argument: "ranks",
            expected: 2,
            actual: 3
        }
    );

    let options = RateOptions::new().with_weights(vec![vec![1.0], vec![]]);
    let weights = model.rate(&teams, options).unwrap_err();
    assert_eq!(
        rating_error(weights),
        RatingError::TeamWeightMismatch {
            team: 1,
            expected: 1,
            actual: 0
        }
    );
}

#[test]
fn test_invalid_configuration_rejected() {
    let config = ModelConfig {
        kappa: 0.0,
        ..ModelConfig::default()
    };
    let error = RatingModel::bradley_terry_part(config).unwrap_err();

    assert!(matches!(
        rating_error(error),
        RatingError::ConfigurationError { .. }
    ));
}

#[test]
fn test_zero_window_leaves_ratings_unchanged() {
    let config = ModelConfig {
        window_size: 0,
        tau: 0.0,
        ..ModelConfig::default()
    };
    let model = RatingModel::bradley_terry_part(config).unwrap();
    let teams = solo_teams(&[(25.0, 8.0), (30.0, 6.0)]);

    let result = model.rate(&teams, RateOptions::new()).unwrap();

    assert_eq!(result, teams);
}

#[test]
fn test_model_config_from_toml() {
    let config = ModelConfig::from_toml_str(
        r#"
        model = "bradley_terry_part"
        window_size = 2
        margin = 1.5
        "#,
    )
    .unwrap();
    let model = RatingModel::new(config).unwrap();

    assert_eq!(
        model.strategy(),
        parlor_rating::rating::ComputeStrategy::WindowedPairing { window_size: 2 }
    );
    assert_eq!(model.config().margin, 1.5);
    assert_eq!(model.config().mu, 25.0);
}

#[test]
fn test_teams_deserialize_from_json() {
    let teams: Vec<Team> =
        serde_json::from_str(r#"[[{"mu": 30.0, "sigma": 5.0}], [{"mu": 20.0, "sigma": 5.0}]]"#)
            .unwrap();
    let options: RateOptions = serde_json::from_str(r#"{"scores": [1.0, 3.0]}"#).unwrap();

    let result = RatingModel::default().rate(&teams, options).unwrap();

    assert!(result[1].players[0].mu > 20.0);
    assert!(result[0].players[0].mu < 30.0);
}

#[test]
fn test_agrees_with_skillratings_weng_lin() {
    let model = RatingModel::default();
    let teams = solo_teams(&[(25.0, 8.0), (30.0, 6.0)]);
    let result = model.rate(&teams, RateOptions::new().with_tau(0.0)).unwrap();

    let player_one: WengLinRating = teams[0].players[0].into();
    let player_two: WengLinRating = teams[1].players[0].into();
    let reference = weng_lin_multi_team(
        &[
            (&[player_one][..], MultiTeamOutcome::new(1)),
            (&[player_two][..], MultiTeamOutcome::new(2)),
        ],
        &WengLinConfig::new(),
    );

    for (team, expected) in result.iter().zip(&reference) {
        assert_close(team.players[0].mu, expected[0].rating, 1e-4);
        assert_close(team.players[0].sigma, expected[0].uncertainty, 1e-4);
    }
}

proptest! {
    #[test]
    fn prop_sigma_stays_positive(teams in arb_teams(6), tau in 0.0..1.0f64) {
        for model in both_models(ModelConfig::default()) {
            let result = model.rate(&teams, RateOptions::new().with_tau(tau)).unwrap();
            for team in &result {
                for player in &team.players {
                    prop_assert!(player.sigma > 0.0);
                    prop_assert!(player.mu.is_finite());
                }
            }
        }
    }

    #[test]
    fn prop_limit_sigma_never_grows(teams in arb_teams(6)) {
        let config = ModelConfig { limit_sigma: true, ..ModelConfig::default() };
        for model in both_models(config) {
            let result = model.rate(&teams, RateOptions::new()).unwrap();
            for (before, after) in teams.iter().zip(&result) {
                for (old, new) in before.players.iter().zip(&after.players) {
                    prop_assert!(new.sigma <= old.sigma);
                }
            }
        }
    }

    #[test]
    fn prop_predict_win_sums_to_one(teams in arb_teams(8)) {
        let win = RatingModel::default().predict_win(&teams);
        prop_assert_eq!(win.len(), teams.len());
        prop_assert!((win.iter().sum::<f64>() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn prop_winner_gains_loser_drops(teams in arb_teams(6)) {
        for model in both_models(ModelConfig::default()) {
            let result = model.rate(&teams, RateOptions::new().with_tau(0.0)).unwrap();
            let deltas = mu_deltas(&teams, &result);
            prop_assert!(deltas[0].iter().all(|&d| d > 0.0));
            prop_assert!(deltas[deltas.len() - 1].iter().all(|&d| d < 0.0));
        }
    }

    #[test]
    fn prop_tied_teams_share_delta(teams in arb_teams(5)) {
        let model = RatingModel::default();
        let mut ranks: Vec<f64> = (0..teams.len()).map(|i| i as f64).collect();
        ranks[1] = ranks[0];

        let result = model.rate(&teams, RateOptions::new().with_ranks(ranks)).unwrap();
        let deltas = mu_deltas(&teams, &result);

        prop_assert!((deltas[0][0] - deltas[1][0]).abs() < 1e-9);
    }

    #[test]
    fn prop_permutation_invariant(
        (teams, order) in arb_teams(6).prop_flat_map(|teams| {
            let order = Just((0..teams.len()).collect::<Vec<usize>>()).prop_shuffle();
            (Just(teams), order)
        })
    ) {
        let ranks: Vec<f64> = (0..teams.len()).map(|i| (i * 2 + 1) as f64).collect();
        let permuted_teams: Vec<Team> = order.iter().map(|&i| teams[i].clone()).collect();
        let permuted_ranks: Vec<f64> = order.iter().map(|&i| ranks[i]).collect();

        for model in both_models(ModelConfig::default()) {
            let original = model
                .rate(&teams, RateOptions::new().with_ranks(ranks.clone()))
                .unwrap();
            let permuted = model
                .rate(&permuted_teams, RateOptions::new().with_ranks(permuted_ranks.clone()))
                .unwrap();

            for (position, &source) in order.iter().enumerate() {
                for (a, b) in permuted[position].players.iter().zip(&original[source].players) {
                    prop_assert!((a.mu - b.mu).abs() < 1e-9);
                    prop_assert!((a.sigma - b.sigma).abs() < 1e-9);
                }
            }
        }
    }
}

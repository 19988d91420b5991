//! Rating model orchestration
//!
//! [`RatingModel`] owns the hyperparameters and the gamma strategy, validates
//! match outcomes and runs the shared rating pipeline. The model-specific
//! comparison step lives in [`super::plackett_luce`] and
//! [`super::bradley_terry`].

use crate::config::{ModelConfig, ModelKind};
use crate::error::{RatingError, Result};
use crate::types::{Rating, Team, TeamRating};
use crate::util::{default_ranks, normalize, rank, rewind, unwind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Inputs handed to the gamma function for one team
#[derive(Debug, Clone, Copy)]
pub struct GammaArgs<'a> {
    /// Comparison scale (pooled for full pairing, per pair for partial pairing)
    pub c: f64,
    /// Number of teams in the match
    pub team_count: usize,
    /// Aggregate team mean
    pub mu: f64,
    /// Aggregate team variance
    pub sigma_sq: f64,
    pub players: &'a [Rating],
    pub rank: usize,
    /// Normalized per-player weights, if any were supplied
    pub weights: Option<&'a [f64]>,
}

/// Uncertainty decay strategy
pub type Gamma = Arc<dyn Fn(&GammaArgs<'_>) -> f64 + Send + Sync>;

/// Default gamma: `sqrt(sigma_sq) / c`
pub fn default_gamma(args: &GammaArgs<'_>) -> f64 {
    args.sigma_sq.sqrt() / args.c
}

/// How teams are paired for comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeStrategy {
    /// Every team against every other team (Plackett-Luce)
    FullPairing,
    /// Each team against the teams within `window_size` positions in rank order (Bradley-Terry)
    WindowedPairing { window_size: usize },
}

/// Outcome of a match, as supplied to [`RatingModel::rate`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateOptions {
    /// Rank per team, lower is better
    pub ranks: Option<Vec<f64>>,
    /// Score per team, higher is better
    pub scores: Option<Vec<f64>>,
    /// Contribution weight per player, per team
    pub weights: Option<Vec<Vec<f64>>>,
    /// Override of the model's dynamics noise for this match
    pub tau: Option<f64>,
}

impl RateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranks(mut self, ranks: impl Into<Vec<f64>>) -> Self {
        self.ranks = Some(ranks.into());
        self
    }

    pub fn with_scores(mut self, scores: impl Into<Vec<f64>>) -> Self {
        self.scores = Some(scores.into());
        self
    }

    pub fn with_weights(mut self, weights: Vec<Vec<f64>>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_tau(mut self, tau: f64) -> Self {
        self.tau = Some(tau);
        self
    }
}

/// Bayesian online rating model
#[derive(Clone)]
pub struct RatingModel {
    config: ModelConfig,
    gamma: Gamma,
}

impl fmt::Debug for RatingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingModel")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for RatingModel {
    fn default() -> Self {
        Self {
            config: ModelConfig::default(),
            gamma: Arc::new(default_gamma),
        }
    }
}

impl RatingModel {
    /// Create a model of the kind named in `config`
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            gamma: Arc::new(default_gamma),
        })
    }

    /// Create a full pairing Plackett-Luce model
    pub fn plackett_luce(config: ModelConfig) -> Result<Self> {
        Self::new(ModelConfig {
            model: ModelKind::PlackettLuce,
            ..config
        })
    }

    /// Create a partial pairing Bradley-Terry model using `config.window_size`
    pub fn bradley_terry_part(config: ModelConfig) -> Result<Self> {
        Self::new(ModelConfig {
            model: ModelKind::BradleyTerryPart,
            ..config
        })
    }

    /// Replace the gamma function
    pub fn with_gamma<F>(mut self, gamma: F) -> Self
    where
        F: Fn(&GammaArgs<'_>) -> f64 + Send + Sync + 'static,
    {
        self.gamma = Arc::new(gamma);
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn strategy(&self) -> ComputeStrategy {
        match self.config.model {
            ModelKind::PlackettLuce => ComputeStrategy::FullPairing,
            ModelKind::BradleyTerryPart => ComputeStrategy::WindowedPairing {
                window_size: self.config.window_size,
            },
        }
    }

    /// Evaluate the configured gamma function
    pub fn gamma(&self, args: &GammaArgs<'_>) -> f64 {
        (self.gamma)(args)
    }

    /// New rating with the model's prior
    pub fn rating(&self) -> Rating {
        self.rating_with(None, None)
    }

    /// New rating, overriding the model's prior where given
    pub fn rating_with(&self, mu: Option<f64>, sigma: Option<f64>) -> Rating {
        Rating {
            mu: mu.unwrap_or(self.config.mu),
            sigma: sigma.unwrap_or(self.config.sigma),
        }
    }

    /// Compute updated ratings for every player after a match.
    ///
    /// Without ranks or scores the input order is the finishing order.
    /// The returned teams mirror the shape and order of `teams`; the input
    /// is never modified.
    pub fn rate(&self, teams: &[Team], options: RateOptions) -> Result<Vec<Team>> {
        validate_inputs(teams, &options)?;

        debug!(
            teams = teams.len(),
            strategy = ?self.strategy(),
            "Rating match"
        );

        let tau = options.tau.unwrap_or(self.config.tau);
        let tau_sq = tau * tau;
        let working: Vec<Team> = teams
            .iter()
            .map(|team| {
                Team::new(
                    team.players
                        .iter()
                        .map(|player| Rating {
                            mu: player.mu,
                            sigma: (player.sigma * player.sigma + tau_sq).sqrt(),
                        })
                        .collect(),
                )
            })
            .collect();

        let ranks = match (&options.ranks, &options.scores) {
            (Some(ranks), _) => Some(rank(ranks)),
            (None, Some(scores)) => {
                let negated: Vec<f64> = scores.iter().map(|score| -score).collect();
                Some(rank(&negated))
            }
            (None, None) => None,
        };

        let weights: Option<Vec<Vec<f64>>> = options.weights.as_ref().map(|weights| {
            weights
                .iter()
                .map(|team_weights| normalize(team_weights, 1.0, 2.0))
                .collect()
        });

        let mut updated = match ranks {
            Some(ranks) => {
                let (sorted_teams, permutation) = unwind(&ranks, &working);
                let (sorted_ranks, _) = unwind(&ranks, &ranks);
                let sorted_scores = options.scores.as_ref().map(|s| unwind(&ranks, s).0);
                let sorted_weights = weights.as_ref().map(|w| unwind(&ranks, w).0);

                let computed = self.compute(
                    &sorted_teams,
                    &sorted_ranks,
                    sorted_scores.as_deref(),
                    sorted_weights.as_deref(),
                );
                rewind(computed, &permutation)
            }
            None => {
                let ranks = default_ranks(working.len());
                self.compute(&working, &ranks, None, weights.as_deref())
            }
        };

        if self.config.limit_sigma {
            for (updated_team, original_team) in updated.iter_mut().zip(teams) {
                let originals = &original_team.players;
                for (player, original) in updated_team.players.iter_mut().zip(originals) {
                    player.sigma = player.sigma.min(original.sigma);
                }
            }
        }

        debug!(teams = updated.len(), "Match rated");
        Ok(updated)
    }

    /// Run the model-specific update over rank-sorted teams
    fn compute(
        &self,
        teams: &[Team],
        ranks: &[usize],
        scores: Option<&[f64]>,
        weights: Option<&[Vec<f64>]>,
    ) -> Vec<Team> {
        match self.strategy() {
            ComputeStrategy::FullPairing => {
                super::plackett_luce::compute(self, teams, ranks, scores, weights)
            }
            ComputeStrategy::WindowedPairing { window_size } => {
                super::bradley_terry::compute(self, teams, ranks, scores, weights, window_size)
            }
        }
    }

    /// Apply a team's `omega` (mean shift) and `delta` (variance shrink) to its players
    pub(crate) fn update_team(
        &self,
        team: &TeamRating<'_>,
        omega: f64,
        delta: f64,
        weights: Option<&[f64]>,
    ) -> Team {
        trace!(rank = team.rank, omega, delta, "Updating team");

        team.players
            .iter()
            .enumerate()
            .map(|(index, player)| {
                let weight = weights
                    .and_then(|w| w.get(index))
                    .copied()
                    .unwrap_or(1.0);
                let scalar = if omega >= 0.0 { weight } else { 1.0 / weight };
                let share = player.sigma * player.sigma / team.sigma_sq;

                Rating {
                    mu: player.mu + share * omega * scalar,
                    sigma: player.sigma
                        * (1.0 - share * delta * scalar).max(self.config.kappa).sqrt(),
                }
            })
            .collect::<Vec<_>>()
            .into()
    }
}

/// Check the shape of a match outcome before anything is computed
fn validate_inputs(teams: &[Team], options: &RateOptions) -> Result<()> {
    if options.ranks.is_some() && options.scores.is_some() {
        return Err(RatingError::ConflictingInputs.into());
    }

    let check_length = |argument: &'static str, actual: usize| -> Result<()> {
        if actual != teams.len() {
            return Err(RatingError::LengthMismatch {
                argument,
                expected: teams.len(),
                actual,
            }
            .into());
        }
        Ok(())
    };

    if let Some(ranks) = &options.ranks {
        check_length("ranks", ranks.len())?;
    }
    if let Some(scores) = &options.scores {
        check_length("scores", scores.len())?;
    }
    if let Some(weights) = &options.weights {
        check_length("weights", weights.len())?;

        for (team_index, (team_weights, team)) in weights.iter().zip(teams).enumerate() {
            if team_weights.len() != team.players.len() {
                return Err(RatingError::TeamWeightMismatch {
                    team: team_index,
                    expected: team.players.len(),
                    actual: team_weights.len(),
                }
                .into());
            }
        }
    }

    if let Some(team_index) = teams.iter().position(Team::is_empty) {
        return Err(RatingError::EmptyTeam { team: team_index }.into());
    }

    Ok(())
}

//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};
use skillratings::weng_lin::WengLinRating;

/// Default `z` used for the conservative ordinal
pub const DEFAULT_ORDINAL_Z: f64 = 3.0;

/// Gaussian skill belief for a single player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Mean of the skill belief
    pub mu: f64,
    /// Standard deviation of the skill belief
    pub sigma: f64,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            mu: 25.0,
            sigma: 25.0 / 3.0,
        }
    }
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// Conservative skill estimate, `mu - 3 * sigma`
    pub fn ordinal(&self) -> f64 {
        self.ordinal_with(DEFAULT_ORDINAL_Z, 1.0, 0.0)
    }

    /// Ordinal scaled for display: `alpha * ((mu - z * sigma) + target / alpha)`
    pub fn ordinal_with(&self, z: f64, alpha: f64, target: f64) -> f64 {
        alpha * ((self.mu - z * self.sigma) + target / alpha)
    }
}

impl From<WengLinRating> for Rating {
    fn from(rating: WengLinRating) -> Self {
        Self {
            mu: rating.rating,
            sigma: rating.uncertainty,
        }
    }
}

impl From<Rating> for WengLinRating {
    fn from(rating: Rating) -> Self {
        Self {
            rating: rating.mu,
            uncertainty: rating.sigma,
        }
    }
}

/// Ordered group of players competing together
///
/// Player order is meaningful: weights and results line up with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    pub players: Vec<Rating>,
}

impl Team {
    pub fn new(players: Vec<Rating>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl From<Vec<Rating>> for Team {
    fn from(players: Vec<Rating>) -> Self {
        Self { players }
    }
}

/// Aggregate belief of a team for a single rating computation
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRating<'a> {
    pub players: &'a [Rating],
    /// Summed (optionally balance weighted) mean
    pub mu: f64,
    /// Summed (optionally balance weighted) variance
    pub sigma_sq: f64,
    /// Competition rank, 0 is best
    pub rank: usize,
}

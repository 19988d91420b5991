//! Rating model configuration
//!
//! Hyperparameters are fixed when a model is constructed and read-only while
//! it rates matches. They can come from defaults, a TOML file or environment
//! variables.

use crate::error::{RatingError, Result};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default sliding window for partial pairing
pub const DEFAULT_WINDOW_SIZE: usize = 4;

/// Which rating model variant to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Every team is compared against every other team
    #[default]
    PlackettLuce,
    /// Teams are compared only against nearby-ranked teams
    BradleyTerryPart,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::PlackettLuce => write!(f, "plackett_luce"),
            ModelKind::BradleyTerryPart => write!(f, "bradley_terry_part"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = RatingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "plackett_luce" | "pl" => Ok(ModelKind::PlackettLuce),
            "bradley_terry_part" | "bt" => Ok(ModelKind::BradleyTerryPart),
            other => Err(RatingError::ConfigurationError {
                message: format!("Unknown rating model: {}", other),
            }),
        }
    }
}

/// Hyperparameters shared by both rating models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model variant
    pub model: ModelKind,
    /// Initial mean skill of a new player
    pub mu: f64,
    /// Initial skill uncertainty of a new player
    pub sigma: f64,
    /// Performance variance around skill
    pub beta: f64,
    /// Floor for the variance shrink factor
    pub kappa: f64,
    /// Additive dynamics noise applied before every update
    pub tau: f64,
    /// Score difference beyond which wins count as more decisive, 0 disables
    pub margin: f64,
    /// Never let an update increase a player's sigma
    pub limit_sigma: bool,
    /// Boost weaker teammates when aggregating a team
    pub balance: bool,
    /// Comparison window for partial pairing
    pub window_size: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::PlackettLuce,
            mu: 25.0,
            sigma: 25.0 / 3.0,
            beta: 25.0 / 6.0,
            kappa: 0.0001,
            tau: 25.0 / 300.0,
            margin: 0.0,
            limit_sigma: false,
            balance: false,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl ModelConfig {
    /// Configuration derived from a prior mean, keeping the standard ratios
    /// (`sigma = mu / 3`, `beta = sigma / 2`, `tau = mu / 300`)
    pub fn with_mu(mu: f64) -> Self {
        Self {
            mu,
            sigma: mu / 3.0,
            beta: mu / 6.0,
            tau: mu / 300.0,
            ..Self::default()
        }
    }

    pub fn beta_sq(&self) -> f64 {
        self.beta * self.beta
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, message: &str| -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(RatingError::ConfigurationError {
                    message: message.to_string(),
                }
                .into())
            }
        };

        check(self.mu.is_finite(), "Mu must be finite")?;
        check(self.sigma > 0.0, "Sigma must be positive")?;
        check(self.beta > 0.0, "Beta must be positive")?;
        check(self.kappa > 0.0, "Kappa must be positive")?;
        check(self.tau >= 0.0, "Tau must be non-negative")?;
        check(self.margin >= 0.0, "Margin must be non-negative")?;

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model config {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text, missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| RatingError::ConfigurationError {
            message: format!("Invalid model configuration: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `RATING_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(model) = env::var("RATING_MODEL") {
            self.model = model.parse()?;
        }
        if let Some(mu) = parse_env("RATING_MU")? {
            self.mu = mu;
        }
        if let Some(sigma) = parse_env("RATING_SIGMA")? {
            self.sigma = sigma;
        }
        if let Some(beta) = parse_env("RATING_BETA")? {
            self.beta = beta;
        }
        if let Some(kappa) = parse_env("RATING_KAPPA")? {
            self.kappa = kappa;
        }
        if let Some(tau) = parse_env("RATING_TAU")? {
            self.tau = tau;
        }
        if let Some(margin) = parse_env("RATING_MARGIN")? {
            self.margin = margin;
        }
        if let Some(limit_sigma) = parse_env("RATING_LIMIT_SIGMA")? {
            self.limit_sigma = limit_sigma;
        }
        if let Some(balance) = parse_env("RATING_BALANCE")? {
            self.balance = balance;
        }
        if let Some(window_size) = parse_env("RATING_WINDOW_SIZE")? {
            self.window_size = window_size;
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {}", key, value)),
        Err(_) => Ok(None),
    }
}

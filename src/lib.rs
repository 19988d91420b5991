//! Parlor Rating - Bayesian skill ratings for team and free-for-all games
//!
//! This crate implements the Weng-Lin family of online rating models
//! (Plackett-Luce full pairing and Bradley-Terry partial pairing) with
//! win/draw prediction, margin of victory, per-player weights and
//! configurable uncertainty decay.

pub mod config;
pub mod error;
pub mod rating;
pub mod stats;
pub mod types;
pub mod util;

// Re-export commonly used types
pub use config::{ModelConfig, ModelKind};
pub use error::{RatingError, Result};
pub use rating::{RateOptions, RatingModel};
pub use types::{Rating, Team, TeamRating};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Bayesian rating models (Weng-Lin / OpenSkill family)
//!
//! This module provides the rating pipeline shared by both models, team
//! aggregation, the Plackett-Luce and Bradley-Terry update rules, and
//! win/draw prediction.

pub mod aggregate;
pub mod bradley_terry;
pub mod model;
pub mod plackett_luce;
pub mod predict;

// Re-export commonly used types
pub use model::{default_gamma, ComputeStrategy, Gamma, GammaArgs, RateOptions, RatingModel};

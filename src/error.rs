//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Every error is raised while validating the inputs of a
//! call, before any rating is touched.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Cannot accept both 'ranks' and 'scores' at the same time")]
    ConflictingInputs,

    #[error("Arguments '{argument}' and 'teams' must be of equal length (expected {expected}, got {actual})")]
    LengthMismatch {
        argument: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Size of team weights at index {team} does not match the size of the team (expected {expected}, got {actual})")]
    TeamWeightMismatch {
        team: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Team at index {team} has no players")]
    EmptyTeam { team: usize },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

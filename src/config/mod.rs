//! Configuration management for parlor-rating
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values for the rating models.

pub mod app;
pub mod model;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use model::{ModelConfig, ModelKind, DEFAULT_WINDOW_SIZE};

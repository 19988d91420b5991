//! Command line entry point for the parlor-rating engine
//!
//! Reads match descriptions as JSON, runs them through the configured
//! rating model and writes the results as JSON to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parlor_rating::config::{validate_config, AppConfig, ModelKind};
use parlor_rating::{RateOptions, RatingModel, Team};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parlor Rating - Bayesian skill ratings for team and free-for-all games
#[derive(Parser)]
#[command(
    name = "parlor-rating",
    version,
    about = "Rate matches and predict outcomes with Weng-Lin (OpenSkill) models",
    long_about = "Parlor Rating updates Gaussian skill beliefs after a match using either the \
                 Plackett-Luce full pairing model or the Bradley-Terry partial pairing model, \
                 and predicts win and draw probabilities for upcoming matches."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Model override
    #[arg(
        short,
        long,
        value_name = "KIND",
        help = "Override rating model (plackett_luce, bradley_terry_part)"
    )]
    model: Option<ModelKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rate a finished match and print the updated teams
    Rate {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Predict win and draw probabilities for a match
    Predict {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Print the effective model configuration
    Defaults,
}

/// A match as read from an input file
#[derive(Debug, Deserialize)]
struct MatchInput {
    teams: Vec<Team>,
    #[serde(flatten)]
    options: RateOptions,
}

#[derive(Debug, Serialize)]
struct Prediction {
    win: Vec<f64>,
    draw: f64,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(model) = args.model {
        config.model.model = model;
    }

    validate_config(&config)?;
    Ok(config)
}

fn read_match(path: &Path) -> Result<MatchInput> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid match file {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    debug!(model = %config.model.model, "Configuration loaded");

    match args.command {
        Command::Rate { input } => {
            let model = RatingModel::new(config.model.clone())?;
            let MatchInput { teams, options } = read_match(&input)?;
            info!(teams = teams.len(), "Rating match from {}", input.display());

            let updated = model.rate(&teams, options)?;
            print_json(&updated, config.service.pretty)?;
        }
        Command::Predict { input } => {
            let model = RatingModel::new(config.model.clone())?;
            let MatchInput { teams, .. } = read_match(&input)?;
            info!(teams = teams.len(), "Predicting match from {}", input.display());

            let prediction = Prediction {
                win: model.predict_win(&teams),
                draw: model.predict_draw(&teams),
            };
            print_json(&prediction, config.service.pretty)?;
        }
        Command::Defaults => {
            print!("{}", toml::to_string_pretty(&config.model)?);
        }
    }

    Ok(())
}

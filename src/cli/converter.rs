//! CLI Argument Converter
//!
//! Layers command-line overrides on top of the settings read from the
//! configuration file.

use std::time::Duration;
use thiserror::Error;

use crate::cli::Args;
use crate::config::ConfigManager;
use crate::display::ColourConfig;
use crate::notifications::GeneratorConfig;

/// CLI conversion errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid run duration: --run-for must be greater than 0")]
    InvalidRunDuration,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Convert CLI arguments to a GeneratorConfig with ConfigManager integration
///
/// CLI arguments override config file settings.
pub fn args_to_generator_config(args: &Args, config_manager: Option<&ConfigManager>) -> Result<GeneratorConfig, CliError> {
    let mut config = match config_manager {
        Some(manager) => manager
            .get_generator_config()
            .map_err(|e| CliError::Config { message: format!("{:#}", e) })?,
        None => GeneratorConfig::default(),
    };

    if args.no_generator {
        config.enabled = false;
    }

    if args.no_seed {
        config.seed_feed = false;
    }

    if let Some(seed) = args.rng_seed {
        config.rng_seed = Some(seed);
    }

    Ok(config)
}

/// Convert CLI colour flags to a ColourConfig
///
/// Precedence: --no-color > --color > config file > default behaviour
pub fn args_to_colour_config(args: &Args, config_manager: Option<&ConfigManager>) -> Result<ColourConfig, CliError> {
    if args.no_color {
        return Ok(ColourConfig::disabled());
    }

    let mut config = match config_manager {
        Some(manager) => manager
            .get_colour_config()
            .map_err(|e| CliError::Config { message: format!("{:#}", e) })?,
        None => ColourConfig::default(),
    };

    if args.color {
        config.set_enabled(true);
        config.set_color_forced(true);
    }

    Ok(config)
}

/// How long the session runs
pub fn args_to_run_duration(args: &Args) -> Result<Duration, CliError> {
    if args.run_for == 0 {
        return Err(CliError::InvalidRunDuration);
    }
    Ok(Duration::from_secs(args.run_for))
}

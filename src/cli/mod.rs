//! CLI module containing argument parsing and related functionality

pub mod args;
pub mod converter;

pub use args::{parse_args, validate_args, Args};
pub use converter::{args_to_colour_config, args_to_generator_config, args_to_run_duration, CliError};

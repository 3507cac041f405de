use clap::Parser;
use anyhow::Result;
use std::path::PathBuf;
use log::debug;

/// Reception-desk notification feed
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "deskfeed")]
#[command(about = "A live notification feed for a therapy-centre reception desk, with a bell badge, a notification panel and console toasts")]
#[command(version)]
pub struct Args {
    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json (defaults to the config file, then text)
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,

    // ============ SESSION ============

    /// How long to run the feed before shutting down, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 120)]
    pub run_for: u64,

    /// Do not start the synthetic event generator
    #[arg(long)]
    pub no_generator: bool,

    /// Skip the two notifications seeded shortly after startup
    #[arg(long)]
    pub no_seed: bool,

    /// Seed for template selection, for reproducible runs
    #[arg(long, value_name = "N")]
    pub rng_seed: Option<u64>,

    /// Print the final feed as JSON on exit
    #[arg(long)]
    pub dump_json: bool,

    // ============ DISPLAY ============

    /// Force colours even when output is not a terminal
    #[arg(long)]
    pub color: bool,

    /// Disable colours
    #[arg(long)]
    pub no_color: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: false,
            quiet: false,
            debug: false,
            log_format: None,
            log_file: None,
            log_file_level: None,
            config_file: None,
            config_name: None,
            run_for: 120,
            no_generator: false,
            no_seed: false,
            rng_seed: None,
            dump_json: false,
            color: false,
            no_color: false,
        }
    }
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    if let Some(ref format) = args.log_format {
        match format.to_lowercase().as_str() {
            "text" | "json" => {},
            _ => return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Valid options: text, json", format
            )),
        }
    }

    if let Some(ref level) = args.log_file_level {
        match level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {},
            _ => return Err(anyhow::anyhow!(
                "Invalid log file level '{}'. Valid levels: error, warn, info, debug, trace", level
            )),
        }
    }

    if args.log_file_level.is_some() && args.log_file.is_none() {
        return Err(anyhow::anyhow!(
            "--log-file-level requires --log-file to be specified"
        ));
    }

    if args.color && args.no_color {
        return Err(anyhow::anyhow!(
            "Conflicting colour flags: cannot specify both --color and --no-color"
        ));
    }

    debug!("CLI arguments validated successfully");
    Ok(())
}

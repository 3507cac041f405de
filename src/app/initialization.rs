//! Application initialization and configuration

use anyhow::Result;
use log::{debug, error};
use crate::{cli, config, logging, display};

pub fn load_configuration(args: &cli::Args) -> Result<config::ConfigManager> {
    let mut manager = if let Some(config_file) = &args.config_file {
        debug!("Loading configuration from explicit file: {}", config_file.display());
        config::ConfigManager::load_from_file(config_file.clone())?
    } else {
        config::ConfigManager::load()?
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

pub fn configure_logging(args: &cli::Args, config: &config::ConfigManager) -> Result<logging::LogConfig> {
    use log::LevelFilter;
    use std::str::FromStr;

    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        match config.get_log_level("base", "console-level") {
            Ok(Some(level)) => level,
            Ok(None) => LevelFilter::Info,
            Err(e) => {
                debug!("Invalid console-level in config, using default: {}", e);
                LevelFilter::Info
            }
        }
    };

    let format = match args.log_format.as_deref().or_else(|| config.get_value("base", "log-format").map(String::as_str)) {
        Some(format_str) => logging::LogFormat::from_str(format_str)
            .map_err(|e| anyhow::anyhow!(e))?,
        None => logging::LogFormat::Text,
    };

    let log_file_path = args.log_file.clone()
        .or_else(|| config.get_path("base", "log-file"));

    let file_log_level = match &args.log_file_level {
        Some(level_str) => Some(logging::parse_log_level(level_str)?),
        None => config.get_log_level("base", "file-log-level")?,
    };

    let (destination, file_level) = match (log_file_path, file_log_level) {
        (Some(file_path), Some(level)) => {
            debug!("File logging enabled: {} (level: {:?})", file_path.display(), level);
            (logging::LogDestination::Both(file_path), Some(level))
        }
        (Some(file_path), None) => {
            debug!("File logging enabled: {} (level: {:?} - same as console)", file_path.display(), console_level);
            (logging::LogDestination::Both(file_path), Some(console_level))
        }
        (None, None) => (logging::LogDestination::Console, None),
        (None, Some(_)) => {
            error!("Log file level specified without log file");
            return Err(anyhow::anyhow!("Log file level specified without log file"));
        }
    };

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Create a ColourManager from CLI arguments and configuration file
pub fn create_colour_manager(args: &cli::Args, config: &config::ConfigManager) -> Result<display::ColourManager> {
    let colour_config = cli::args_to_colour_config(args, Some(config))?;
    Ok(display::ColourManager::with_config(colour_config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use log::LevelFilter;
    use crate::config::Configuration;
    use std::collections::HashMap;

    fn base_config(entries: &[(&str, &str)]) -> config::ConfigManager {
        let mut config = Configuration::new();
        config.insert(
            "base".to_string(),
            entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>(),
        );
        config::ConfigManager::from_config(config)
    }

    #[test]
    fn test_logging_defaults() {
        let log_config = configure_logging(&cli::Args::default(), &base_config(&[])).unwrap();
        assert_eq!(log_config.console_level, LevelFilter::Info);
        assert_eq!(log_config.format, logging::LogFormat::Text);
        assert_eq!(log_config.destination, logging::LogDestination::Console);
        assert!(log_config.file_level.is_none());
    }

    #[test]
    fn test_logging_from_config_file() {
        let config = base_config(&[
            ("console-level", "warn"),
            ("log-format", "json"),
            ("log-file", "/tmp/deskfeed.log"),
            ("file-log-level", "debug"),
        ]);
        let log_config = configure_logging(&cli::Args::default(), &config).unwrap();

        assert_eq!(log_config.console_level, LevelFilter::Warn);
        assert_eq!(log_config.format, logging::LogFormat::Json);
        assert_eq!(log_config.destination, logging::LogDestination::Both(PathBuf::from("/tmp/deskfeed.log")));
        assert_eq!(log_config.file_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn test_cli_flags_override_config_file() {
        let config = base_config(&[("console-level", "warn"), ("log-format", "json")]);
        let args = cli::Args {
            debug: true,
            log_format: Some("text".to_string()),
            log_file: Some(PathBuf::from("feed.log")),
            ..cli::Args::default()
        };
        let log_config = configure_logging(&args, &config).unwrap();

        assert_eq!(log_config.console_level, LevelFilter::Trace);
        assert_eq!(log_config.format, logging::LogFormat::Text);
        // File level follows the console level when not given
        assert_eq!(log_config.file_level, Some(LevelFilter::Trace));
    }

    #[test]
    fn test_colour_manager_honours_no_color() {
        let args = cli::Args { no_color: true, ..cli::Args::default() };
        let manager = create_colour_manager(&args, &base_config(&[])).unwrap();
        assert!(!manager.colours_enabled());
    }
}

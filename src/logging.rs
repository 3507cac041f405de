// Logging module for deskfeed
// Structured logging with local timestamps in text or JSON form
//
// Console and file output carry independent level filters. Console output
// goes to stderr so it never interleaves with the panel and toasts on stdout.
// JSON entries carry the emitting module in their `detail` object.
//
// Example usage:
// ```
// let config = LogConfig {
//     console_level: LevelFilter::Warn,
//     file_level: Some(LevelFilter::Debug),
//     format: LogFormat::Json,
//     destination: LogDestination::Both(PathBuf::from("deskfeed.log")),
// };
// init_logger(config)?;
// log::info!("Session started");
// ```

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

/// Log destination options
#[derive(Debug, Clone, PartialEq)]
pub enum LogDestination {
    Console,
    File(PathBuf),
    Both(PathBuf),
}

impl LogDestination {
    /// Log file path, if the destination includes one
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            LogDestination::Console => None,
            LogDestination::File(path) | LogDestination::Both(path) => Some(path),
        }
    }

    fn includes_console(&self) -> bool {
        !matches!(self, LogDestination::File(_))
    }
}

/// JSON log entry structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    pub file_level: Option<LevelFilter>,
    pub format: LogFormat,
    pub destination: LogDestination,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Info,
            file_level: None,
            format: LogFormat::Text,
            destination: LogDestination::Console,
        }
    }
}

impl LogConfig {
    /// Most verbose level any destination will accept
    pub fn max_level(&self) -> LevelFilter {
        let console = if self.destination.includes_console() {
            self.console_level
        } else {
            LevelFilter::Off
        };
        match (self.destination.file_path(), self.file_level) {
            (Some(_), Some(file_level)) => console.max(file_level),
            _ => console,
        }
    }
}

/// Logger writing to stderr and an optional append-only log file
pub struct DeskfeedLogger {
    config: LogConfig,
    file: Option<Mutex<File>>,
}

impl DeskfeedLogger {
    /// Create the logger, opening the log file up front when one is configured
    pub fn new(config: LogConfig) -> Result<Self> {
        let file = match config.destination.file_path() {
            Some(path) => Some(Mutex::new(open_log_file(path)?)),
            None => None,
        };
        Ok(Self { config, file })
    }

    fn format_timestamp() -> String {
        let now: DateTime<Local> = Local::now();
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn format_text_message(&self, level: Level, message: &str) -> String {
        let timestamp = Self::format_timestamp();
        format!("{} [{}] {}", timestamp, level.to_string().to_uppercase(), message)
    }

    fn format_json_message(&self, level: Level, target: &str, message: &str) -> Result<String> {
        let entry = JsonLogEntry {
            timestamp: Self::format_timestamp(),
            level: level.to_string().to_uppercase(),
            message: message.to_string(),
            detail: Some(serde_json::json!({ "target": target })),
        };

        serde_json::to_string(&entry)
            .context("Failed to serialize log entry to JSON")
    }

    fn format_record(&self, record: &log::Record) -> String {
        let message = record.args().to_string();
        match self.config.format {
            LogFormat::Text => self.format_text_message(record.level(), &message),
            LogFormat::Json => self
                .format_json_message(record.level(), record.target(), &message)
                .unwrap_or_else(|_| self.format_text_message(record.level(), &message)),
        }
    }

    fn should_log_to_console(&self, level: Level) -> bool {
        self.config.destination.includes_console() && level <= self.config.console_level
    }

    fn should_log_to_file(&self, level: Level) -> bool {
        match (&self.file, self.config.file_level) {
            (Some(_), Some(file_level)) => level <= file_level,
            _ => false,
        }
    }

    fn write_to_console(&self, formatted_message: &str) -> Result<()> {
        writeln!(io::stderr(), "{}", formatted_message)
            .context("Failed to write to console")
    }

    fn write_to_file(&self, formatted_message: &str) -> Result<()> {
        if let Some(file) = &self.file {
            writeln!(file.lock(), "{}", formatted_message)
                .context("Failed to write to log file")?;
        }
        Ok(())
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

impl log::Log for DeskfeedLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.should_log_to_console(metadata.level()) ||
        self.should_log_to_file(metadata.level())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let formatted_message = self.format_record(record);
        let level = record.level();

        if self.should_log_to_console(level) {
            if let Err(e) = self.write_to_console(&formatted_message) {
                eprintln!("Console logging error: {}", e);
            }
        }

        if self.should_log_to_file(level) {
            if let Err(e) = self.write_to_file(&formatted_message) {
                eprintln!("File logging error: {}", e);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logger(config: LogConfig) -> Result<()> {
    let max_level = config.max_level();
    let logger = DeskfeedLogger::new(config)?;

    log::set_boxed_logger(Box::new(logger))
        .context("Failed to set global logger")?;

    log::set_max_level(max_level);

    Ok(())
}

/// Convert string to LevelFilter
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        "off" => Ok(LevelFilter::Off),
        _ => Err(anyhow::anyhow!("Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off", level_str)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use tempfile::TempDir;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error").unwrap(), LevelFilter::Error);
        assert_eq!(parse_log_level("WARN").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level("trace").unwrap(), LevelFilter::Trace);
        assert_eq!(parse_log_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_timestamp_format() {
        let timestamp = DeskfeedLogger::format_timestamp();
        assert_eq!(timestamp.len(), 19);
        assert_eq!(timestamp.chars().nth(4), Some('-'));
        assert_eq!(timestamp.chars().nth(10), Some(' '));
        assert_eq!(timestamp.chars().nth(13), Some(':'));
    }

    #[test]
    fn test_json_entry_carries_target() {
        let logger = DeskfeedLogger::new(LogConfig::default()).unwrap();
        let formatted = logger
            .format_json_message(Level::Warn, "deskfeed::notifications::store", "Store closed")
            .unwrap();

        let entry: JsonLogEntry = serde_json::from_str(&formatted).unwrap();
        assert_eq!(entry.level, "WARN");
        assert_eq!(entry.message, "Store closed");
        assert_eq!(entry.detail.unwrap()["target"], "deskfeed::notifications::store");
    }

    #[test]
    fn test_max_level_combines_destinations() {
        let mut config = LogConfig {
            console_level: LevelFilter::Warn,
            file_level: Some(LevelFilter::Debug),
            format: LogFormat::Text,
            destination: LogDestination::Both(PathBuf::from("feed.log")),
        };
        assert_eq!(config.max_level(), LevelFilter::Debug);

        config.destination = LogDestination::Console;
        assert_eq!(config.max_level(), LevelFilter::Warn);

        config.destination = LogDestination::File(PathBuf::from("feed.log"));
        config.file_level = Some(LevelFilter::Error);
        assert_eq!(config.max_level(), LevelFilter::Error);
    }

    #[test]
    fn test_file_destination_respects_file_level() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deskfeed.log");
        let logger = DeskfeedLogger::new(LogConfig {
            console_level: LevelFilter::Off,
            file_level: Some(LevelFilter::Info),
            format: LogFormat::Text,
            destination: LogDestination::File(path.clone()),
        })
        .unwrap();

        logger.log(
            &log::Record::builder()
                .level(Level::Info)
                .target("deskfeed")
                .args(format_args!("Generator started"))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(Level::Debug)
                .target("deskfeed")
                .args(format_args!("tick"))
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[INFO] Generator started"));
        assert!(!contents.contains("tick"));
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("deskfeed.log");
        let result = DeskfeedLogger::new(LogConfig {
            destination: LogDestination::File(path),
            file_level: Some(LevelFilter::Info),
            ..LogConfig::default()
        });
        assert!(result.is_err());
    }
}

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use toml::Value;
use log::{debug, info};

use crate::display::{ColourConfig, ColourTheme};
use crate::notifications::GeneratorConfig;
use crate::notifications::generator::TIMED_KINDS;

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "DESKFEED_CONFIG";

/// Configuration manager
#[derive(Debug)]
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    /// Create a new ConfigManager from a Configuration (primarily for testing)
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load configuration using discovery hierarchy
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using defaults");
        Ok(Self::from_config(Configuration::new()))
    }

    /// Load configuration from explicit file path
    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        debug!("Loading configuration from file: {}", path.display());

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    /// File the configuration was read from, if any
    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    /// Get value from configuration with section fallback
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        // Priority: selected_section -> specified section -> base
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get("base").and_then(|s| s.get(key))
    }

    /// Select configuration section for --config-name
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    /// Get boolean value with type conversion
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    /// Get unsigned integer value with type conversion
    pub fn get_u64(&self, section: &str, key: &str) -> Result<Option<u64>> {
        match self.get_value(section, key) {
            Some(value) => value
                .parse::<u64>()
                .map(Some)
                .with_context(|| format!("Invalid integer value for {}.{}: {}", section, key, value)),
            None => Ok(None),
        }
    }

    /// Get a whole number of seconds as a Duration
    pub fn get_seconds(&self, section: &str, key: &str) -> Result<Option<Duration>> {
        Ok(self.get_u64(section, key)?.map(Duration::from_secs))
    }

    /// Get log level value with type conversion
    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    /// Get path value with type conversion
    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// Get generator configuration from config file
    pub fn get_generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::default();

        if let Some(enabled) = self.get_bool("generator", "enabled")? {
            config.enabled = enabled;
        }

        if let Some(seed_feed) = self.get_bool("generator", "seed-feed")? {
            config.seed_feed = seed_feed;
        }

        for kind in TIMED_KINDS {
            let key = format!("{}-period", kind);
            if let Some(period) = self.get_seconds("generator", &key)? {
                config.set_period(kind, period)?;
            }
        }

        if let Some(delay) = self.get_seconds("generator", "seed-reminder-delay")? {
            config.seed_reminder_delay = delay;
        }

        if let Some(delay) = self.get_seconds("generator", "seed-delay-delay")? {
            config.seed_delay_delay = delay;
        }

        if let Some(seed) = self.get_u64("generator", "rng-seed")? {
            config.rng_seed = Some(seed);
        }

        config.validate()
            .with_context(|| "Generator configuration validation failed")?;

        Ok(config)
    }

    /// Get colour configuration from config file
    pub fn get_colour_config(&self) -> Result<ColourConfig> {
        let mut config = ColourConfig::default();

        if let Some(color) = self.get_bool("display", "color")? {
            config.set_enabled(color);
        }

        if let Some(respect) = self.get_bool("display", "respect-no-color")? {
            config.set_respect_no_color(respect);
        }

        if let Some(theme) = self.get_value("display", "theme") {
            let theme = theme.parse::<ColourTheme>().map_err(anyhow::Error::msg)?;
            config.set_theme(theme);
        }

        Ok(config)
    }
}

/// Discover configuration files in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Environment variable $DESKFEED_CONFIG
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(env_path));
    }

    // 2. XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("deskfeed").join("config.toml"));
    }

    // 3. Home directory
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".deskfeed.toml"));
    }

    // 4. Working directory
    paths.push(PathBuf::from("./.deskfeed.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

/// Parse TOML content to string-based configuration
fn parse_toml_config(content: &str) -> Result<Configuration> {
    let toml_value: Value = content.parse()
        .context("Failed to parse TOML content")?;

    let mut config = Configuration::new();

    if let Value::Table(table) = toml_value {
        flatten_toml_table(&table, String::new(), &mut config);
    }

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Recursively flatten TOML tables into section.subsection format
fn flatten_toml_table(table: &toml::Table, prefix: String, config: &mut Configuration) {
    for (key, value) in table {
        let section_name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Table(subtable) if subtable.values().all(|v| !v.is_table()) => {
                // Merge, since keys outside any table may already sit in [base]
                config.entry(section_name).or_default().extend(
                    subtable
                        .iter()
                        .map(|(subkey, subvalue)| (subkey.clone(), toml_value_to_string(subvalue))),
                );
            }
            Value::Table(subtable) => flatten_toml_table(subtable, section_name, config),
            _ => {
                // Top-level keys outside any table land in [base]
                let base = if prefix.is_empty() { "base".to_string() } else { prefix.clone() };
                config
                    .entry(base)
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
        }
    }
}

/// Convert TOML Value to string representation
fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn manager_from(toml_content: &str) -> ConfigManager {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, toml_content).unwrap();
        ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_toml_value_to_string_conversion() {
        assert_eq!(toml_value_to_string(&Value::String("text".to_string())), "text");
        assert_eq!(toml_value_to_string(&Value::Integer(45)), "45");
        assert_eq!(toml_value_to_string(&Value::Boolean(false)), "false");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
[base]
console-level = "warn"
log-format = "json"

[generator]
reminder-period = 30
seed-feed = false
"#;

        let config = parse_toml_config(toml_content).unwrap();

        assert_eq!(config["base"]["console-level"], "warn");
        assert_eq!(config["base"]["log-format"], "json");
        assert_eq!(config["generator"]["reminder-period"], "30");
        assert_eq!(config["generator"]["seed-feed"], "false");
    }

    #[test]
    fn test_top_level_keys_fall_into_base() {
        let config = parse_toml_config("log-format = \"json\"\n[display]\ncolor = false\n").unwrap();
        assert_eq!(config["base"]["log-format"], "json");
        assert_eq!(config["display"]["color"], "false");
    }

    #[test]
    fn test_top_level_keys_survive_explicit_base_table() {
        let config = parse_toml_config("alpha = \"1\"\ncolor = false\n\n[base]\nlog-format = \"json\"\n").unwrap();
        assert_eq!(config["base"]["alpha"], "1");
        assert_eq!(config["base"]["color"], "false");
        assert_eq!(config["base"]["log-format"], "json");
    }

    #[test]
    fn test_value_fallback_and_section_selection() {
        let mut config = Configuration::new();
        config.insert(
            "base".to_string(),
            HashMap::from([("log-format".to_string(), "text".to_string())]),
        );
        config.insert(
            "front-desk".to_string(),
            HashMap::from([("log-format".to_string(), "json".to_string())]),
        );

        let mut manager = ConfigManager::from_config(config);
        assert_eq!(manager.get_value("generator", "log-format").unwrap(), "text");
        assert!(manager.get_value("generator", "missing").is_none());

        manager.select_section("front-desk".to_string());
        assert_eq!(manager.get_value("base", "log-format").unwrap(), "json");
    }

    #[test]
    fn test_type_conversion() {
        let manager = manager_from(
            r#"
[base]
console-level = "debug"
log-file = "/tmp/deskfeed.log"

[generator]
enabled = "maybe"
rng-seed = -4
"#,
        );

        assert_eq!(manager.get_log_level("base", "console-level").unwrap(), Some(log::LevelFilter::Debug));
        assert_eq!(manager.get_path("base", "log-file"), Some(PathBuf::from("/tmp/deskfeed.log")));
        assert!(manager.get_bool("generator", "enabled").is_err());
        assert!(manager.get_u64("generator", "rng-seed").is_err());
        assert!(manager.get_bool("generator", "missing").unwrap().is_none());
    }

    #[test]
    fn test_config_file_path_recorded() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, "[base]\nlog-format = \"text\"\n").unwrap();
        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();
        assert_eq!(manager.config_file_path(), Some(temp_file.path()));
    }

    #[test]
    fn test_generator_config_defaults() {
        let manager = ConfigManager::from_config(Configuration::new());
        assert_eq!(manager.get_generator_config().unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_generator_config_from_toml() {
        let manager = manager_from(
            r#"
[generator]
reminder-period = 10
cancellation-period = 0
seed-reminder-delay = 1
seed-delay-delay = 3
rng-seed = 42
"#,
        );
        let config = manager.get_generator_config().unwrap();

        assert_eq!(config.reminder_period, Duration::from_secs(10));
        assert_eq!(config.delay_period, Duration::from_secs(60));
        assert!(config.cancellation_period.is_zero());
        assert_eq!(config.seed_reminder_delay, Duration::from_secs(1));
        assert_eq!(config.seed_delay_delay, Duration::from_secs(3));
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_generator_config_rejects_silent_generator() {
        let manager = manager_from(
            r#"
[generator]
seed-feed = false
reminder-period = 0
delay-period = 0
arrival-period = 0
confirmation-period = 0
cancellation-period = 0
"#,
        );
        assert!(manager.get_generator_config().is_err());
    }

    #[test]
    fn test_generator_config_rejects_shared_periods() {
        let manager = manager_from("[generator]\nreminder-period = 60\n");
        let err = manager.get_generator_config().unwrap_err();
        assert!(format!("{:#}", err).contains("delay-period"));

        // A disabled timer does not clash with another disabled one
        let manager = manager_from("[generator]\narrival-period = 0\ncancellation-period = 0\n");
        let config = manager.get_generator_config().unwrap();
        assert!(config.arrival_period.is_zero());
    }

    #[test]
    fn test_generator_config_invalid_period() {
        let manager = manager_from("[generator]\ndelay-period = \"soon\"\n");
        assert!(manager.get_generator_config().is_err());
    }

    #[test]
    fn test_colour_config_from_toml() {
        let manager = manager_from("[display]\ncolor = false\nrespect-no-color = false\ntheme = \"light\"\n");
        let config = manager.get_colour_config().unwrap();
        assert!(!config.enabled);
        assert!(!config.respect_no_color);
        assert_eq!(config.theme, ColourTheme::Light);

        let bad = manager_from("[display]\ntheme = \"sepia\"\n");
        assert!(bad.get_colour_config().is_err());
    }
}

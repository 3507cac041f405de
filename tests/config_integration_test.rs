use std::fs;
use std::time::Duration;
use tempfile::tempdir;

use deskfeed::{app, cli, logging};
use log::LevelFilter;

fn args_with_config(path: &std::path::Path, extra: &[&str]) -> cli::Args {
    let mut argv = vec!["deskfeed", "--config-file", path.to_str().unwrap()];
    argv.extend_from_slice(extra);
    <cli::Args as clap::Parser>::try_parse_from(argv).unwrap()
}

#[test]
fn test_config_file_drives_logging_and_generator() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("deskfeed.toml");
    let log_path = temp_dir.path().join("deskfeed.log");

    fs::write(
        &config_path,
        format!(
            r#"
[base]
console-level = "warn"
log-format = "json"
log-file = "{}"
file-log-level = "debug"

[generator]
reminder-period = 15
seed-feed = false
rng-seed = 11

[display]
color = false
"#,
            log_path.display()
        ),
    )
    .expect("Failed to write config file");

    let args = args_with_config(&config_path, &[]);
    cli::validate_args(&args).unwrap();
    let manager = app::load_configuration(&args).unwrap();
    assert_eq!(manager.config_file_path(), Some(config_path.as_path()));

    let log_config = app::configure_logging(&args, &manager).unwrap();
    assert_eq!(log_config.console_level, LevelFilter::Warn);
    assert_eq!(log_config.format, logging::LogFormat::Json);
    assert_eq!(log_config.destination, logging::LogDestination::Both(log_path));
    assert_eq!(log_config.file_level, Some(LevelFilter::Debug));

    let generator = cli::args_to_generator_config(&args, Some(&manager)).unwrap();
    assert_eq!(generator.reminder_period, Duration::from_secs(15));
    assert!(!generator.seed_feed);
    assert_eq!(generator.rng_seed, Some(11));

    let colours = app::create_colour_manager(&args, &manager).unwrap();
    assert!(!colours.colours_enabled());
}

#[test]
fn test_config_section_selection() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("deskfeed.toml");

    fs::write(
        &config_path,
        r#"
[base]
log-format = "text"

[quiet-desk]
console-level = "error"
log-format = "json"
"#,
    )
    .expect("Failed to write config file");

    let args = args_with_config(&config_path, &["--config-name", "quiet-desk"]);
    let manager = app::load_configuration(&args).unwrap();
    let log_config = app::configure_logging(&args, &manager).unwrap();

    assert_eq!(log_config.console_level, LevelFilter::Error);
    assert_eq!(log_config.format, logging::LogFormat::Json);
}

#[test]
fn test_cli_overrides_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("deskfeed.toml");
    fs::write(&config_path, "[generator]\nrng-seed = 1\n[display]\ncolor = true\n").unwrap();

    let args = args_with_config(&config_path, &["--rng-seed", "5", "--no-generator", "--no-color"]);
    let manager = app::load_configuration(&args).unwrap();

    let generator = cli::args_to_generator_config(&args, Some(&manager)).unwrap();
    assert_eq!(generator.rng_seed, Some(5));
    assert!(!generator.enabled);
    assert!(!app::create_colour_manager(&args, &manager).unwrap().colours_enabled());
}

#[test]
fn test_missing_or_malformed_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let missing = args_with_config(&temp_dir.path().join("absent.toml"), &[]);
    assert!(app::load_configuration(&missing).is_err());

    let broken_path = temp_dir.path().join("broken.toml");
    fs::write(&broken_path, "[generator\nreminder-period = ").unwrap();
    let broken = args_with_config(&broken_path, &[]);
    assert!(app::load_configuration(&broken).is_err());
}

#[test]
fn test_invalid_generator_value_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("deskfeed.toml");
    fs::write(&config_path, "[generator]\ndelay-period = -5\n").unwrap();

    let args = args_with_config(&config_path, &[]);
    let manager = app::load_configuration(&args).unwrap();
    let err = cli::args_to_generator_config(&args, Some(&manager)).unwrap_err();
    assert!(err.to_string().contains("delay-period"));
}

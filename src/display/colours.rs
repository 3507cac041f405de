//! Core colour management for terminal output
//!
//! Applies the feed's colour tokens with terminal compatibility, NO_COLOR
//! compliance, and graceful degradation for non-colour terminals.

use colored::{ColoredString, Colorize};
use super::config::{ColourConfig, ColourPalette};
use crate::notifications::{ColourToken, ToastSeverity};

/// Manages colour output for the notification centre
#[derive(Debug, Clone)]
pub struct ColourManager {
    config: ColourConfig,
    palette: ColourPalette,
    enabled: bool,
}

impl ColourManager {
    /// Create a new ColourManager with default configuration
    pub fn new() -> Self {
        Self::with_config(ColourConfig::default())
    }

    /// Create a ColourManager with explicit colour control
    pub fn with_colours(enabled: bool) -> Self {
        let mut config = ColourConfig::default();
        config.set_enabled(enabled);
        config.set_color_forced(enabled);
        Self::with_config(config)
    }

    /// Create a ColourManager with a specific configuration
    pub fn with_config(config: ColourConfig) -> Self {
        let palette = config.get_palette();
        let enabled = config.should_use_colours();
        Self { config, palette, enabled }
    }

    /// Check if colours are enabled
    pub fn colours_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the current colour configuration
    pub fn config(&self) -> &ColourConfig {
        &self.config
    }

    /// Get the current colour palette
    pub fn palette(&self) -> &ColourPalette {
        &self.palette
    }

    /// Format text with the colour behind a feed token
    pub fn token(&self, text: &str, token: ColourToken) -> ColoredString {
        if self.colours_enabled() {
            self.apply_color(text, self.palette.colour_for(token))
        } else {
            text.normal()
        }
    }

    /// Format a toast title according to its severity
    pub fn severity(&self, text: &str, severity: ToastSeverity) -> ColoredString {
        if !self.colours_enabled() {
            return text.normal();
        }
        match severity {
            ToastSeverity::Destructive => self.apply_color(text, &self.palette.destructive).bold(),
            ToastSeverity::Default => text.bold(),
        }
    }

    /// De-emphasised text (timestamps, secondary lines)
    pub fn muted(&self, text: &str) -> ColoredString {
        self.token(text, ColourToken::Muted)
    }

    /// Emphasised text (titles of unread items, headings)
    pub fn strong(&self, text: &str) -> ColoredString {
        if self.colours_enabled() {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Apply a colour from the palette to text
    fn apply_color(&self, text: &str, color_name: &str) -> ColoredString {
        if let Some(color) = ColourPalette::parse_color(color_name) {
            text.color(color)
        } else {
            // Fallback to basic colours if parsing fails
            match color_name {
                name if name.contains("red") => text.red(),
                name if name.contains("yellow") => text.yellow(),
                name if name.contains("blue") => text.blue(),
                name if name.contains("green") => text.green(),
                name if name.contains("cyan") => text.cyan(),
                name if name.contains("magenta") => text.magenta(),
                name if name.contains("black") => text.bright_black(),
                name if name.contains("white") => text.white(),
                _ => text.normal(),
            }
        }
    }
}

impl Default for ColourManager {
    fn default() -> Self {
        Self::new()
    }
}

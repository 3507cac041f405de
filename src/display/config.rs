//! Colour configuration and theme management
//!
//! Maps the notification feed's colour tokens onto terminal colours, with
//! light and dark palettes and NO_COLOR support.

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::notifications::ColourToken;

/// Colour configuration for the display system
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColourConfig {
    /// Whether colours are enabled globally
    pub enabled: bool,
    /// The colour theme to use
    pub theme: ColourTheme,
    /// Whether to respect NO_COLOR environment variable
    pub respect_no_color: bool,
    /// Force colours even when not in a TTY (--color flag)
    #[serde(skip, default)]
    pub color_forced: bool,
}

impl Default for ColourConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: ColourTheme::Auto,
            respect_no_color: true,
            color_forced: false,
        }
    }
}

/// Available colour themes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ColourTheme {
    /// No background detection yet; behaves as Dark
    Auto,
    /// Optimised for light backgrounds
    Light,
    /// Optimised for dark backgrounds
    Dark,
}

impl std::str::FromStr for ColourTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColourTheme::Auto),
            "light" => Ok(ColourTheme::Light),
            "dark" => Ok(ColourTheme::Dark),
            _ => Err(format!("Invalid colour theme: {}. Valid options: auto, light, dark", s)),
        }
    }
}

/// Terminal colour names for each feed colour token
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColourPalette {
    pub primary: String,
    pub warning: String,
    pub success: String,
    pub destructive: String,
    pub secondary: String,
    pub muted: String,
}

impl ColourPalette {
    /// Palette for light backgrounds
    pub fn light() -> Self {
        Self {
            primary: "blue".to_string(),
            warning: "yellow".to_string(),
            success: "green".to_string(),
            destructive: "red".to_string(),
            secondary: "magenta".to_string(),
            muted: "black".to_string(), // Darker for light backgrounds
        }
    }

    /// Palette for dark backgrounds
    pub fn dark() -> Self {
        Self {
            primary: "bright_blue".to_string(),
            warning: "bright_yellow".to_string(),
            success: "bright_green".to_string(),
            destructive: "bright_red".to_string(),
            secondary: "bright_cyan".to_string(),
            muted: "bright_black".to_string(),
        }
    }

    /// Colour name for a token
    pub fn colour_for(&self, token: ColourToken) -> &str {
        match token {
            ColourToken::Primary => &self.primary,
            ColourToken::Warning => &self.warning,
            ColourToken::Success => &self.success,
            ColourToken::Destructive => &self.destructive,
            ColourToken::Secondary => &self.secondary,
            ColourToken::Muted => &self.muted,
        }
    }

    /// Parse a colour string into a Color enum
    pub fn parse_color(color_str: &str) -> Option<Color> {
        match color_str.to_lowercase().as_str() {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "bright_black" => Some(Color::BrightBlack),
            "bright_red" => Some(Color::BrightRed),
            "bright_green" => Some(Color::BrightGreen),
            "bright_yellow" => Some(Color::BrightYellow),
            "bright_blue" => Some(Color::BrightBlue),
            "bright_magenta" => Some(Color::BrightMagenta),
            "bright_cyan" => Some(Color::BrightCyan),
            "bright_white" => Some(Color::BrightWhite),
            _ => None,
        }
    }
}

impl Default for ColourPalette {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColourTheme {
    /// Get the appropriate colour palette for this theme
    pub fn get_palette(&self) -> ColourPalette {
        match self {
            ColourTheme::Auto | ColourTheme::Dark => ColourPalette::dark(),
            ColourTheme::Light => ColourPalette::light(),
        }
    }
}

impl ColourConfig {
    /// Create a new colour configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a colour configuration with colours disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set whether colours are enabled
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Set the colour theme
    pub fn set_theme(&mut self, theme: ColourTheme) {
        self.theme = theme;
    }

    /// Set whether to respect NO_COLOR environment variable
    pub fn set_respect_no_color(&mut self, respect: bool) {
        self.respect_no_color = respect;
    }

    /// Force colours to be enabled (--color flag)
    pub fn set_color_forced(&mut self, forced: bool) {
        self.color_forced = forced;
    }

    /// Check if colours should be enabled based on configuration and environment
    pub fn should_use_colours(&self) -> bool {
        use std::io::IsTerminal;
        self.decide_colours(std::env::var_os("NO_COLOR").is_some(), std::io::stdout().is_terminal())
    }

    /// Colour decision given the environment facts
    fn decide_colours(&self, no_color_set: bool, is_terminal: bool) -> bool {
        if !self.enabled {
            return false;
        }

        // --color ignores TTY detection and NO_COLOR
        if self.color_forced {
            return true;
        }

        if self.respect_no_color && no_color_set {
            return false;
        }

        if !self.respect_no_color {
            return true;
        }

        is_terminal
    }

    /// Get the colour palette for the current theme
    pub fn get_palette(&self) -> ColourPalette {
        self.theme.get_palette()
    }
}

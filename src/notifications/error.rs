//! Notification Feed Error Types
//!
//! Store mutations are total and never fail. The errors here cover session
//! assembly and configuration of the feed's collaborators.

use thiserror::Error;

/// Result type for notification feed operations
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur while assembling or configuring the feed
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NotificationError {
    /// A required collaborator was not supplied when the session was built
    #[error("{component} is required but was not provided; the notification centre cannot start without it")]
    MissingContext { component: String },

    /// The generator was asked to start while its timers are still live
    #[error("Synthetic event generator is already running")]
    GeneratorRunning,

    /// Unknown notification kind name
    #[error("Invalid notification kind '{0}'. Valid kinds: reminder, delay, confirmation, cancellation, arrival, info")]
    InvalidKind(String),

    /// Invalid configuration value for the feed
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

impl NotificationError {
    /// Create a missing context error
    pub fn missing_context(component: impl Into<String>) -> Self {
        Self::MissingContext {
            component: component.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }
}

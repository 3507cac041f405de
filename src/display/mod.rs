//! Display module for the notification centre
//!
//! This module provides colour support, the bell trigger and panel, console
//! toasts and text formatting while maintaining terminal compatibility and
//! accessibility.

pub mod badge;
pub mod colours;
pub mod config;
pub mod format;
pub mod panel;
pub mod toast;

pub use badge::*;
pub use colours::*;
pub use config::*;
pub use format::*;
pub use panel::*;
pub use toast::*;

//! Toast Sinks
//!
//! Non-visual toast sinks. The coloured console sink lives in the display
//! module.

use parking_lot::Mutex;
use log::{info, warn};

use crate::notifications::traits::ToastSink;
use crate::notifications::types::{Toast, ToastSeverity};

/// Writes toasts to the log; destructive toasts are logged as warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct LogToastSink;

impl ToastSink for LogToastSink {
    fn notify(&self, toast: &Toast) {
        match toast.severity {
            ToastSeverity::Destructive => warn!("{}: {}", toast.title, toast.body),
            ToastSeverity::Default => info!("{}: {}", toast.title, toast.body),
        }
    }
}

/// Discards every toast
#[derive(Debug, Default, Clone, Copy)]
pub struct NullToastSink;

impl ToastSink for NullToastSink {
    fn notify(&self, _toast: &Toast) {}
}

/// Keeps every toast it receives, in arrival order
#[derive(Debug, Default)]
pub struct RecordingToastSink {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingToastSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.lock().is_empty()
    }
}

impl ToastSink for RecordingToastSink {
    fn notify(&self, toast: &Toast) {
        self.toasts.lock().push(toast.clone());
    }
}

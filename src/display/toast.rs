//! Console toast sink
//!
//! Prints each toast as a short two-line alert, coloured by severity.

use std::io::{self, Write};
use parking_lot::Mutex;
use log::warn;

use crate::display::colours::ColourManager;
use crate::notifications::{Toast, ToastSeverity, ToastSink};

/// Writes toasts to stdout, or to any injected writer
pub struct ConsoleToastSink {
    writer: Mutex<Box<dyn Write + Send>>,
    colours: ColourManager,
}

impl ConsoleToastSink {
    /// Sink printing to stdout
    pub fn stdout(colours: ColourManager) -> Self {
        Self::with_writer(Box::new(io::stdout()), colours)
    }

    /// Sink printing to `writer`
    pub fn with_writer(writer: Box<dyn Write + Send>, colours: ColourManager) -> Self {
        Self {
            writer: Mutex::new(writer),
            colours,
        }
    }

    /// Render a toast as it appears on the console
    pub fn render(&self, toast: &Toast) -> String {
        let marker = match toast.severity {
            ToastSeverity::Destructive => "!",
            ToastSeverity::Default => "*",
        };
        format!(
            "{} {} {}\n    {}",
            self.colours.severity(marker, toast.severity),
            toast.icon.glyph(),
            self.colours.severity(&toast.title, toast.severity),
            toast.body
        )
    }
}

impl ToastSink for ConsoleToastSink {
    fn notify(&self, toast: &Toast) {
        let rendered = self.render(toast);
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", rendered).and_then(|_| writer.flush()) {
            warn!("Failed to write toast '{}': {}", toast.title, e);
        }
    }
}

impl std::fmt::Debug for ConsoleToastSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleToastSink")
            .field("colours", &self.colours.colours_enabled())
            .finish()
    }
}

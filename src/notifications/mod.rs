//! Reception Desk Notification Feed
//!
//! In-memory notification feed for the reception desk: a newest-first store
//! with read/unread state, a synthetic event generator driven by timers, and
//! the seams where toasts leave and events enter.
//!
//! # Architecture
//!
//! - **NotificationStore**: single source of truth for live notifications
//! - **SyntheticGenerator**: demo event source publishing templated payloads
//! - **NotificationPublisher**: seam between event sources and the store
//! - **ToastSink**: consumer of transient alerts raised on every arrival
//! - **FeedSession**: explicitly owned store plus event source for a session
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use deskfeed::notifications::{NotificationStore, NewNotification, NotificationKind, LogToastSink};
//!
//! let store = NotificationStore::new(Arc::new(LogToastSink));
//! let id = store.add(NewNotification::new(
//!     NotificationKind::Arrival,
//!     "Child Arrival",
//!     "Emma S. has arrived",
//! ));
//! assert_eq!(store.unread_count(), 1);
//! if let Some(id) = id {
//!     store.mark_as_read(&id);
//! }
//! ```

pub mod traits;
pub mod types;
pub mod error;
pub mod store;
pub mod sinks;
pub mod picker;
pub mod templates;
pub mod timer;
pub mod generator;
pub mod channel;
pub mod session;


// Re-export core types for convenience
pub use traits::{NotificationPublisher, PublishOutcome, TemplatePicker, ToastSink};
pub use types::{
    ColourToken, IconKey, KindStyle, NewNotification, Notification, NotificationId, NotificationKind, Toast,
    ToastSeverity,
};
pub use error::{NotificationError, NotificationResult};
pub use store::NotificationStore;
pub use sinks::{LogToastSink, NullToastSink, RecordingToastSink};
pub use picker::{RandomPicker, SequencePicker};
pub use timer::{TimerHandle, TimerService};
pub use generator::{GeneratorConfig, GeneratorHandle, SyntheticGenerator};
pub use channel::{forward_to_store, ChannelPublisher};
pub use session::{FeedSession, SessionBuilder};

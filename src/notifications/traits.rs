//! Notification Feed Seams
//!
//! Traits at the boundaries of the feed: where toasts leave it, where
//! payloads enter it, and where template selection draws its randomness.

use crate::notifications::types::{NewNotification, NotificationId, Toast};

/// Consumer of transient alerts raised for every new notification.
///
/// Delivery is fire and forget: a sink that cannot show the toast drops it.
pub trait ToastSink: Send + Sync {
    fn notify(&self, toast: &Toast);
}

/// What became of a published payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Inserted into a store under this id
    Stored(NotificationId),
    /// Accepted for later insertion; the id is assigned downstream
    Queued,
    /// Discarded because the destination has gone away
    Dropped,
}

impl PublishOutcome {
    /// Whether the payload was stored or queued
    pub fn is_accepted(&self) -> bool {
        !matches!(self, PublishOutcome::Dropped)
    }

    pub fn id(&self) -> Option<NotificationId> {
        match self {
            PublishOutcome::Stored(id) => Some(*id),
            _ => None,
        }
    }
}

/// Anything that accepts notification payloads.
///
/// The synthetic generator publishes through this trait, so a real event
/// source can stand in for it without touching the store.
pub trait NotificationPublisher: Send + Sync {
    /// Publish a payload. Publishers that insert directly into a store
    /// report the id assigned to it.
    fn publish(&self, payload: NewNotification) -> PublishOutcome;
}

/// Source of template indices for the synthetic generator
pub trait TemplatePicker: Send + Sync {
    /// Pick an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

//! Notification Store
//!
//! Single source of truth for the live notification set. The store is a
//! cheaply cloneable handle: every clone sees the same records, and all
//! mutations are serialized through one mutex so no observer can see a
//! half-applied change.
//!
//! Records are kept newest first. The unread count is always recomputed from
//! the records themselves.

use std::collections::VecDeque;
use std::sync::Arc;
use parking_lot::Mutex;
use tokio::sync::watch;
use log::{debug, trace};

use crate::notifications::sinks::LogToastSink;
use crate::notifications::traits::{NotificationPublisher, PublishOutcome, ToastSink};
use crate::notifications::types::{NewNotification, Notification, NotificationId, Toast};

/// Mutable state behind the store handle
#[derive(Debug, Default)]
struct StoreState {
    notifications: VecDeque<Notification>,
    revision: u64,
    closed: bool,
}

/// In-memory, newest-first notification store
pub struct NotificationStore {
    state: Arc<Mutex<StoreState>>,
    toast_sink: Arc<dyn ToastSink>,
    revisions: Arc<watch::Sender<u64>>,
}

impl NotificationStore {
    /// Create an empty store forwarding toasts to `toast_sink`
    pub fn new(toast_sink: Arc<dyn ToastSink>) -> Self {
        let (revisions, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            toast_sink,
            revisions: Arc::new(revisions),
        }
    }

    /// Insert a payload at the head of the feed.
    ///
    /// Assigns a fresh id, stamps the current time and marks the record
    /// unread, then forwards a toast for it. Returns `None` only when the
    /// store has been closed.
    pub fn add(&self, payload: NewNotification) -> Option<NotificationId> {
        let notification = Notification::from_payload(payload);
        let id = notification.id;
        let toast = Toast::for_notification(&notification);

        let revision = {
            let mut state = self.state.lock();
            if state.closed {
                debug!("Store closed, dropping '{}' notification: {}", notification.kind, notification.title);
                return None;
            }
            state.notifications.push_front(notification);
            state.revision += 1;
            state.revision
        };

        debug!("Added notification {} ({}): {}", id, toast.severity.as_str(), toast.title);
        self.publish_revision(revision);
        self.toast_sink.notify(&toast);
        Some(id)
    }

    /// Mark one notification read; unknown ids are ignored
    pub fn mark_as_read(&self, id: &NotificationId) {
        let changed = self.mutate("mark_as_read", |notifications| {
            match notifications.iter_mut().find(|n| n.id == *id) {
                Some(notification) if !notification.read => {
                    notification.read = true;
                    true
                }
                Some(_) => false,
                None => {
                    trace!("mark_as_read: no notification with id {}", id);
                    false
                }
            }
        });
        if changed {
            debug!("Marked notification {} as read", id);
        }
    }

    /// Mark every notification read
    pub fn mark_all_as_read(&self) {
        let changed = self.mutate("mark_all_as_read", |notifications| {
            let mut changed = false;
            for notification in notifications.iter_mut().filter(|n| !n.read) {
                notification.read = true;
                changed = true;
            }
            changed
        });
        if changed {
            debug!("Marked all notifications as read");
        }
    }

    /// Remove one notification; unknown ids are ignored
    pub fn clear_one(&self, id: &NotificationId) {
        let changed = self.mutate("clear_one", |notifications| {
            let before = notifications.len();
            notifications.retain(|n| n.id != *id);
            notifications.len() != before
        });
        if changed {
            debug!("Cleared notification {}", id);
        }
    }

    /// Remove every notification
    pub fn clear_all(&self) {
        let changed = self.mutate("clear_all", |notifications| {
            let had_any = !notifications.is_empty();
            notifications.clear();
            had_any
        });
        if changed {
            debug!("Cleared all notifications");
        }
    }

    /// Number of unread notifications, counted from the records
    pub fn unread_count(&self) -> usize {
        self.state.lock().notifications.iter().filter(|n| !n.read).count()
    }

    /// Snapshot of all notifications, newest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.lock().notifications.iter().cloned().collect()
    }

    /// Look up a single notification
    pub fn get(&self, id: &NotificationId) -> Option<Notification> {
        self.state.lock().notifications.iter().find(|n| n.id == *id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().notifications.is_empty()
    }

    /// Watch the store revision; it changes after every effective mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revisions.subscribe()
    }

    /// Current store revision
    pub fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    /// Dispose of the store. Later mutations are ignored.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            state.closed = true;
            debug!("Notification store closed with {} notifications", state.notifications.len());
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Apply `op` under the lock; bumps the revision when it reports a change
    fn mutate<F>(&self, operation: &str, op: F) -> bool
    where
        F: FnOnce(&mut VecDeque<Notification>) -> bool,
    {
        let revision = {
            let mut state = self.state.lock();
            if state.closed {
                debug!("Store closed, ignoring {}", operation);
                return false;
            }
            if !op(&mut state.notifications) {
                return false;
            }
            state.revision += 1;
            state.revision
        };
        self.publish_revision(revision);
        true
    }

    /// Forward a revision to subscribers. The watched value only moves
    /// forward, so a slow writer cannot overwrite a newer revision.
    fn publish_revision(&self, revision: u64) {
        self.revisions.send_if_modified(|current| {
            if revision > *current {
                *current = revision;
                true
            } else {
                false
            }
        });
    }
}

impl NotificationPublisher for NotificationStore {
    fn publish(&self, payload: NewNotification) -> PublishOutcome {
        self.add(payload).map_or(PublishOutcome::Dropped, PublishOutcome::Stored)
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(Arc::new(LogToastSink))
    }
}

impl Clone for NotificationStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            toast_sink: Arc::clone(&self.toast_sink),
            revisions: Arc::clone(&self.revisions),
        }
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("NotificationStore")
            .field("len", &state.notifications.len())
            .field("revision", &state.revision)
            .field("closed", &state.closed)
            .finish()
    }
}

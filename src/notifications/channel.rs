//! Channel Publisher
//!
//! Decouples an event source from the store with a tokio channel. The source
//! publishes into a [`ChannelPublisher`]; a forwarding task drains the
//! channel into the store. This is where a real subscription or polling
//! client would attach.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use log::{debug, trace};

use crate::notifications::store::NotificationStore;
use crate::notifications::traits::{NotificationPublisher, PublishOutcome};
use crate::notifications::types::NewNotification;

/// Publisher that enqueues payloads on an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    sender: mpsc::UnboundedSender<NewNotification>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NewNotification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl NotificationPublisher for ChannelPublisher {
    /// Ids are assigned later by the store, so a sent payload is only queued
    fn publish(&self, payload: NewNotification) -> PublishOutcome {
        if self.sender.send(payload).is_err() {
            trace!("Notification channel closed, dropping payload");
            return PublishOutcome::Dropped;
        }
        PublishOutcome::Queued
    }
}

/// Spawn a task adding every received payload to `store`.
///
/// The task ends when all senders are dropped; it returns the number of
/// payloads forwarded.
pub fn forward_to_store(
    mut receiver: mpsc::UnboundedReceiver<NewNotification>,
    store: NotificationStore,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut forwarded = 0;
        while let Some(payload) = receiver.recv().await {
            if store.add(payload).is_some() {
                forwarded += 1;
            }
        }
        debug!("Notification channel drained after {} payloads", forwarded);
        forwarded
    })
}

//! Timer Service
//!
//! Repeating and one-shot timers on the tokio runtime. Every timer hangs off
//! one root cancellation token, so a whole family of timers can be torn down
//! together, and each callback re-checks its token before running.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use log::{trace, warn};

/// Handle to a scheduled timer
#[derive(Debug)]
pub struct TimerHandle {
    name: String,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl TimerHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop the timer; its callback will not run again
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the timer task has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the timer task to exit, giving up after `limit`
    pub async fn join(self, limit: Duration) {
        if tokio::time::timeout(limit, self.handle).await.is_err() {
            warn!("Timer '{}' did not stop within {:?}", self.name, limit);
        }
    }
}

/// Schedules timers that share one cancellation root
#[derive(Debug, Clone, Default)]
pub struct TimerService {
    root: CancellationToken,
}

impl TimerService {
    pub fn new() -> Self {
        Self {
            root: CancellationToken::new(),
        }
    }

    /// Run `tick` every `period`, first after one full period.
    ///
    /// Must be called from within a tokio runtime. A zero period yields a
    /// handle that is already cancelled.
    pub fn schedule_repeating<F>(&self, name: impl Into<String>, period: Duration, mut tick: F) -> TimerHandle
    where
        F: FnMut() + Send + 'static,
    {
        let name = name.into();
        let token = self.root.child_token();

        if period.is_zero() {
            warn!("Timer '{}' has a zero period and will not run", name);
            token.cancel();
            return TimerHandle {
                name,
                token,
                handle: tokio::spawn(async {}),
            };
        }

        let task_token = token.clone();
        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => {
                        if task_token.is_cancelled() {
                            break;
                        }
                        trace!("Timer '{}' fired", task_name);
                        tick();
                    }
                }
            }

            trace!("Timer '{}' stopped", task_name);
        });

        TimerHandle { name, token, handle }
    }

    /// Run `fire` once after `delay`, unless cancelled first
    pub fn schedule_once<F>(&self, name: impl Into<String>, delay: Duration, fire: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let name = name.into();
        let token = self.root.child_token();
        let task_token = token.clone();
        let task_name = name.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    trace!("One-shot timer '{}' cancelled", task_name);
                }
                _ = tokio::time::sleep(delay) => {
                    if !task_token.is_cancelled() {
                        trace!("One-shot timer '{}' fired", task_name);
                        fire();
                    }
                }
            }
        });

        TimerHandle { name, token, handle }
    }

    /// Cancel every timer scheduled by this service
    pub fn cancel_all(&self) {
        self.root.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.root.is_cancelled()
    }
}

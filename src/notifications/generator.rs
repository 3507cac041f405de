//! Synthetic Event Generator
//!
//! Demo event source for the reception desk. Five repeating timers, one per
//! timed notification kind, each pick a template from their pool and publish
//! it. Two one-shot timers seed the feed shortly after startup.
//!
//! The generator only knows the [`NotificationPublisher`] seam, so a real
//! event source can replace it without touching the store or the display.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use log::{debug, info};

use crate::notifications::error::{NotificationError, NotificationResult};
use crate::notifications::picker::RandomPicker;
use crate::notifications::templates::{self, TemplatePool};
use crate::notifications::timer::{TimerHandle, TimerService};
use crate::notifications::traits::{NotificationPublisher, TemplatePicker};
use crate::notifications::types::{NewNotification, NotificationKind};

/// Kinds driven by a repeating timer, in the order the timers are started
pub const TIMED_KINDS: [NotificationKind; 5] = [
    NotificationKind::Reminder,
    NotificationKind::Delay,
    NotificationKind::Arrival,
    NotificationKind::Confirmation,
    NotificationKind::Cancellation,
];

/// Generator timing and seeding configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Whether the generator runs at all
    pub enabled: bool,
    /// Whether the two startup seed notifications are scheduled
    pub seed_feed: bool,
    pub reminder_period: Duration,
    pub delay_period: Duration,
    pub arrival_period: Duration,
    pub confirmation_period: Duration,
    pub cancellation_period: Duration,
    pub seed_reminder_delay: Duration,
    pub seed_delay_delay: Duration,
    /// Fixed RNG seed for reproducible template selection
    pub rng_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed_feed: true,
            reminder_period: Duration::from_secs(45),
            delay_period: Duration::from_secs(60),
            arrival_period: Duration::from_secs(55),
            confirmation_period: Duration::from_secs(70),
            cancellation_period: Duration::from_secs(80),
            seed_reminder_delay: Duration::from_secs(2),
            seed_delay_delay: Duration::from_secs(5),
            rng_seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Period of the repeating timer for `kind`; `None` for kinds without one
    pub fn period_for(&self, kind: NotificationKind) -> Option<Duration> {
        match kind {
            NotificationKind::Reminder => Some(self.reminder_period),
            NotificationKind::Delay => Some(self.delay_period),
            NotificationKind::Arrival => Some(self.arrival_period),
            NotificationKind::Confirmation => Some(self.confirmation_period),
            NotificationKind::Cancellation => Some(self.cancellation_period),
            NotificationKind::Info => None,
        }
    }

    pub fn set_period(&mut self, kind: NotificationKind, period: Duration) -> NotificationResult<()> {
        let slot = match kind {
            NotificationKind::Reminder => &mut self.reminder_period,
            NotificationKind::Delay => &mut self.delay_period,
            NotificationKind::Arrival => &mut self.arrival_period,
            NotificationKind::Confirmation => &mut self.confirmation_period,
            NotificationKind::Cancellation => &mut self.cancellation_period,
            NotificationKind::Info => {
                return Err(NotificationError::invalid_config(
                    "generator.info-period",
                    "info notifications are not generated on a timer",
                ))
            }
        };
        *slot = period;
        Ok(())
    }

    /// Check the configuration. Active timers must have distinct periods so
    /// they never fire in the same instant.
    pub fn validate(&self) -> NotificationResult<()> {
        if self.enabled && TIMED_KINDS.iter().all(|k| self.period_for(*k).map_or(true, |p| p.is_zero())) && !self.seed_feed {
            return Err(NotificationError::invalid_config(
                "generator",
                "enabled but every period is zero and seeding is off",
            ));
        }

        let active: Vec<(NotificationKind, Duration)> = TIMED_KINDS
            .iter()
            .filter_map(|k| self.period_for(*k).map(|p| (*k, p)))
            .filter(|(_, p)| !p.is_zero())
            .collect();
        for (i, (kind, period)) in active.iter().enumerate() {
            if let Some((other, _)) = active[i + 1..].iter().find(|(_, p)| p == period) {
                return Err(NotificationError::invalid_config(
                    format!("generator.{}-period", other),
                    format!("shares its {:?} period with '{}'", period, kind),
                ));
            }
        }

        Ok(())
    }
}

/// Demo event source publishing templated notifications on fixed timers
pub struct SyntheticGenerator {
    config: GeneratorConfig,
    picker: Arc<dyn TemplatePicker>,
    running: Arc<AtomicBool>,
}

impl SyntheticGenerator {
    /// Create a generator whose picker is seeded from `config.rng_seed`
    pub fn new(config: GeneratorConfig) -> Self {
        let picker: Arc<dyn TemplatePicker> = match config.rng_seed {
            Some(seed) => Arc::new(RandomPicker::seeded(seed)),
            None => Arc::new(RandomPicker::from_entropy()),
        };
        Self::with_picker(config, picker)
    }

    /// Create a generator with an explicit template picker
    pub fn with_picker(config: GeneratorConfig, picker: Arc<dyn TemplatePicker>) -> Self {
        Self {
            config,
            picker,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start every timer, publishing into `publisher`.
    ///
    /// Must be called within a tokio runtime. Fails if a previous handle
    /// from this generator is still live.
    pub fn start(&self, publisher: Arc<dyn NotificationPublisher>) -> NotificationResult<GeneratorHandle> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(NotificationError::GeneratorRunning);
        }

        let service = TimerService::new();
        let published = Arc::new(AtomicU64::new(0));
        let mut timers = Vec::new();

        if self.config.enabled {
            for kind in TIMED_KINDS {
                let (Some(period), Some(pool)) = (self.config.period_for(kind), templates::pool_for(kind)) else {
                    continue;
                };
                if period.is_zero() {
                    debug!("Generator timer for '{}' disabled", kind);
                    continue;
                }
                timers.push(self.schedule_pool(&service, pool, period, &publisher, &published));
            }

            if self.config.seed_feed {
                timers.push(Self::schedule_seed(
                    &service,
                    "seed-reminder",
                    self.config.seed_reminder_delay,
                    templates::seed_reminder(),
                    &publisher,
                    &published,
                ));
                timers.push(Self::schedule_seed(
                    &service,
                    "seed-delay",
                    self.config.seed_delay_delay,
                    templates::seed_delay(),
                    &publisher,
                    &published,
                ));
            }
        } else {
            debug!("Synthetic generator disabled by configuration");
        }

        info!("Synthetic generator started with {} timers", timers.len());
        Ok(GeneratorHandle {
            service,
            timers,
            published,
            running: Arc::clone(&self.running),
        })
    }

    fn schedule_pool(
        &self,
        service: &TimerService,
        pool: &'static TemplatePool,
        period: Duration,
        publisher: &Arc<dyn NotificationPublisher>,
        published: &Arc<AtomicU64>,
    ) -> TimerHandle {
        let picker = Arc::clone(&self.picker);
        let publisher = Arc::clone(publisher);
        let published = Arc::clone(published);

        debug!("Scheduling '{}' notifications every {:?}", pool.kind, period);
        service.schedule_repeating(format!("generator-{}", pool.kind), period, move || {
            let payload = pool.render(picker.pick(pool.len()));
            if publisher.publish(payload).is_accepted() {
                published.fetch_add(1, Ordering::SeqCst);
            }
        })
    }

    fn schedule_seed(
        service: &TimerService,
        name: &str,
        delay: Duration,
        payload: NewNotification,
        publisher: &Arc<dyn NotificationPublisher>,
        published: &Arc<AtomicU64>,
    ) -> TimerHandle {
        let publisher = Arc::clone(publisher);
        let published = Arc::clone(published);

        debug!("Seeding '{}' notification after {:?}", payload.kind, delay);
        service.schedule_once(name, delay, move || {
            if publisher.publish(payload).is_accepted() {
                published.fetch_add(1, Ordering::SeqCst);
            }
        })
    }
}

/// Live generator timers. Dropping the handle cancels them all.
pub struct GeneratorHandle {
    service: TimerService,
    timers: Vec<TimerHandle>,
    published: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
}

impl GeneratorHandle {
    /// Number of timers started, including one-shot seeds
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Names of the timers started
    pub fn timer_names(&self) -> Vec<&str> {
        self.timers.iter().map(|t| t.name()).collect()
    }

    /// Payloads the publisher accepted so far; dropped payloads are not counted
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.service.is_cancelled()
    }

    /// Cancel every timer at once. No callback starts after this returns.
    pub fn cancel(&self) {
        if !self.service.is_cancelled() {
            self.service.cancel_all();
            self.running.store(false, Ordering::SeqCst);
            debug!("Synthetic generator cancelled after {} notifications", self.published_count());
        }
    }

    /// Cancel every timer and wait for the timer tasks to exit
    pub async fn shutdown(mut self) {
        self.cancel();
        for timer in std::mem::take(&mut self.timers) {
            timer.join(Duration::from_secs(5)).await;
        }
        info!("Synthetic generator stopped");
    }
}

impl Drop for GeneratorHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for GeneratorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorHandle")
            .field("timers", &self.timer_names())
            .field("published", &self.published_count())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

//! Feed Session
//!
//! Owns the store and the event source for one reception-desk session. The
//! store is created by the caller and handed in explicitly; a session built
//! without one refuses to start.

use std::sync::Arc;
use log::{debug, info};

use crate::notifications::error::{NotificationError, NotificationResult};
use crate::notifications::generator::{GeneratorConfig, GeneratorHandle, SyntheticGenerator};
use crate::notifications::store::NotificationStore;
use crate::notifications::traits::{NotificationPublisher, TemplatePicker};

/// Builder for [`FeedSession`]
#[derive(Default)]
pub struct SessionBuilder {
    store: Option<NotificationStore>,
    generator_config: Option<GeneratorConfig>,
    picker: Option<Arc<dyn TemplatePicker>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: NotificationStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn generator(mut self, config: GeneratorConfig) -> Self {
        self.generator_config = Some(config);
        self
    }

    /// Override the generator's template picker
    pub fn picker(mut self, picker: Arc<dyn TemplatePicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Assemble the session. Fails fast when no store was supplied.
    pub fn build(self) -> NotificationResult<FeedSession> {
        let store = self
            .store
            .ok_or_else(|| NotificationError::missing_context("Notification store"))?;

        let generator = match self.generator_config {
            Some(config) => {
                config.validate()?;
                Some(match self.picker {
                    Some(picker) => SyntheticGenerator::with_picker(config, picker),
                    None => SyntheticGenerator::new(config),
                })
            }
            None => None,
        };

        debug!("Feed session assembled (generator: {})", generator.is_some());
        Ok(FeedSession {
            store,
            generator,
            generator_handle: None,
        })
    }
}

/// One session's store plus its synthetic event source
pub struct FeedSession {
    store: NotificationStore,
    generator: Option<SyntheticGenerator>,
    generator_handle: Option<GeneratorHandle>,
}

impl FeedSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    /// Start the generator, if one was configured. Must run inside tokio.
    pub fn start_generator(&mut self) -> NotificationResult<()> {
        let Some(generator) = &self.generator else {
            debug!("No generator configured for this session");
            return Ok(());
        };
        if self.generator_handle.is_some() {
            return Err(NotificationError::GeneratorRunning);
        }

        let publisher: Arc<dyn NotificationPublisher> = Arc::new(self.store.clone());
        self.generator_handle = Some(generator.start(publisher)?);
        Ok(())
    }

    pub fn generator_handle(&self) -> Option<&GeneratorHandle> {
        self.generator_handle.as_ref()
    }

    /// Stop the generator's timers, then close the store
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.generator_handle.take() {
            handle.shutdown().await;
        }
        self.store.close();
        info!(
            "Feed session ended with {} notifications ({} unread)",
            self.store.len(),
            self.store.unread_count()
        );
    }
}

//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::hub::FileHub;
use crate::notify::{HttpNotifier, Notifier, NotifyError};

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to initialize notifier: {0}")]
    NotifierInit(#[from] NotifyError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    hub: Arc<FileHub>,
}

impl AppState {
    /// Create state that pushes notifications over HTTP
    pub fn new(config: Config) -> Result<Self, StateError> {
        let notifier = HttpNotifier::new(config.notify.timeout())?;
        Ok(Self::with_notifier(config, Arc::new(notifier)))
    }

    /// Create state around a caller-supplied notifier
    pub fn with_notifier(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let hub = Arc::new(FileHub::new(notifier, config.notify.max_in_flight));
        Self {
            inner: Arc::new(AppStateInner { config, hub }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the file hub
    pub fn hub(&self) -> &Arc<FileHub> {
        &self.inner.hub
    }
}

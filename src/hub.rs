//! File hub
//!
//! Coordinates the file registry, the interest tracker and the notification
//! dispatcher. Every public operation of the core goes through [`FileHub`].
//!
//! Locking: the tracker lock is always taken before the registry lock, and an
//! upload releases the registry before checking interests, so content is
//! visible to downloads before any notification for it is decided.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::error::HubError;
use crate::interest::{CheckOutcome, Interest, InterestTracker, SubscriberEndpoint};
use crate::notify::{Notification, NotificationDispatcher, Notifier};
use crate::registry::{FileRegistry, FileSummary};

pub struct FileHub {
    registry: FileRegistry,
    tracker: InterestTracker,
    dispatcher: NotificationDispatcher,
}

impl FileHub {
    pub fn new(notifier: Arc<dyn Notifier>, max_in_flight: usize) -> Self {
        Self {
            registry: FileRegistry::new(),
            tracker: InterestTracker::new(),
            dispatcher: NotificationDispatcher::new(notifier, max_in_flight),
        }
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Store `content` under `filename` and fire any live interest in it.
    pub fn upload(&self, filename: &str, content: Bytes) -> Result<(), HubError> {
        if filename.is_empty() {
            return Err(HubError::InvalidArgument("filename must not be empty".into()));
        }

        self.registry.store(filename, content);
        self.check_and_fire(filename);
        Ok(())
    }

    pub fn list(&self) -> Vec<String> {
        self.registry.list()
    }

    pub fn list_entries(&self) -> Vec<FileSummary> {
        self.registry.list_entries()
    }

    /// Content for `filename`; `None` when it was never uploaded.
    pub fn download(&self, filename: &str) -> Option<Bytes> {
        self.registry.get(filename)
    }

    // ========================================================================
    // Interests
    // ========================================================================

    /// Register `subscriber`'s interest in `filename` for `validity_secs`.
    ///
    /// Replaces any interest already held for the filename. Fires right away
    /// if the file is already stored.
    pub fn register_interest(
        &self,
        subscriber: SubscriberEndpoint,
        filename: &str,
        validity_secs: u64,
    ) -> Result<(), HubError> {
        let interest = Interest::new(subscriber, filename, validity_secs)?;
        let outcome = self
            .tracker
            .register(interest, |name| self.registry.contains(name));
        self.handle_outcome(filename, outcome);
        Ok(())
    }

    /// Drop the interest in `filename`. Returns whether one was registered.
    ///
    /// Any caller may cancel any filename's interest; `subscriber` is only
    /// recorded in the log.
    pub fn cancel_interest(&self, subscriber: &SubscriberEndpoint, filename: &str) -> bool {
        let cancelled = self.tracker.cancel(filename);
        match &cancelled {
            Some(interest) if &interest.subscriber != subscriber => tracing::info!(
                filename = %filename,
                requested_by = %subscriber,
                owner = %interest.subscriber,
                "Interest cancelled by a different subscriber"
            ),
            Some(_) => {}
            None => tracing::debug!(filename = %filename, "No interest to cancel"),
        }
        cancelled.is_some()
    }

    fn check_and_fire(&self, filename: &str) {
        let outcome = self
            .tracker
            .check(filename, |name| self.registry.contains(name));
        self.handle_outcome(filename, outcome);
    }

    fn handle_outcome(&self, filename: &str, outcome: CheckOutcome) {
        match outcome {
            CheckOutcome::Fire(interest) => {
                tracing::info!(
                    filename = %filename,
                    subscriber = %interest.subscriber,
                    "Interest satisfied, dispatching notification"
                );
                self.dispatcher
                    .dispatch(interest.subscriber, Notification::file_available(filename));
            }
            CheckOutcome::Expired(interest) => tracing::info!(
                filename = %filename,
                subscriber = %interest.subscriber,
                "Interest expired, discarded without notification"
            ),
            CheckOutcome::Pending | CheckOutcome::NoInterest => {}
        }
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Remove interests whose validity has run out
    pub fn purge_expired(&self) -> usize {
        self.tracker.purge_expired()
    }

    pub fn file_count(&self) -> usize {
        self.registry.len()
    }

    pub fn pending_interest_count(&self) -> usize {
        self.tracker.pending_count()
    }

    /// Start the periodic expired-interest sweep.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_sweep_task(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            loop {
                interval.tick().await;
                self.purge_expired();
            }
        })
    }
}

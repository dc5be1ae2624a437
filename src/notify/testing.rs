//! Notifier doubles for unit tests

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Semaphore};

use super::provider::Notifier;
use super::types::{Notification, NotifyError};
use crate::interest::SubscriberEndpoint;

/// Forwards every delivery to a channel
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<(SubscriberEndpoint, Notification)>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(SubscriberEndpoint, Notification)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        endpoint: &SubscriberEndpoint,
        notification: &Notification,
    ) -> Result<(), NotifyError> {
        let _ = self.tx.send((endpoint.clone(), notification.clone()));
        Ok(())
    }
}

/// Every delivery fails as if the subscriber had gone away
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(
        &self,
        endpoint: &SubscriberEndpoint,
        _notification: &Notification,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::Unreachable(format!("{} is offline", endpoint)))
    }
}

/// Blocks each delivery until the test hands out a permit
pub struct GatedNotifier {
    gate: Arc<Semaphore>,
}

impl GatedNotifier {
    pub fn new() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        (
            Self {
                gate: Arc::clone(&gate),
            },
            gate,
        )
    }
}

#[async_trait]
impl Notifier for GatedNotifier {
    async fn notify(
        &self,
        _endpoint: &SubscriberEndpoint,
        _notification: &Notification,
    ) -> Result<(), NotifyError> {
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
        Ok(())
    }
}

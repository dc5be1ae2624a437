//! Fire-and-forget notification dispatch
//!
//! Each delivery runs on its own task. A semaphore caps how many run at
//! once; the permit is taken inside the task, so `dispatch` never waits.
//!
//! Deliveries go to the runtime the dispatcher was built in. Without one, a
//! short-lived thread drives the delivery on a current-thread runtime.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::{self, Handle};
use tokio::sync::Semaphore;

use super::provider::Notifier;
use super::types::Notification;
use crate::interest::SubscriberEndpoint;

#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    permits: Arc<Semaphore>,
    handle: Option<Handle>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, max_in_flight: usize) -> Self {
        Self {
            notifier,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
            handle: Handle::try_current().ok(),
        }
    }

    /// Start delivery of `notification` to `subscriber` and return at once.
    ///
    /// Failures are logged and dropped.
    pub fn dispatch(&self, subscriber: SubscriberEndpoint, notification: Notification) {
        let delivery = deliver(
            Arc::clone(&self.notifier),
            Arc::clone(&self.permits),
            subscriber,
            notification,
        );

        match self.handle.clone().or_else(|| Handle::try_current().ok()) {
            Some(handle) => {
                handle.spawn(delivery);
            }
            None => spawn_detached(delivery),
        }
    }

    #[cfg(test)]
    pub(crate) fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }
}

async fn deliver(
    notifier: Arc<dyn Notifier>,
    permits: Arc<Semaphore>,
    subscriber: SubscriberEndpoint,
    notification: Notification,
) {
    let Ok(_permit) = permits.acquire_owned().await else {
        return;
    };

    match notifier.notify(&subscriber, &notification).await {
        Ok(()) => tracing::info!(
            filename = %notification.filename,
            subscriber = %subscriber,
            notification_id = %notification.id,
            "Notification delivered"
        ),
        Err(e) => tracing::warn!(
            filename = %notification.filename,
            subscriber = %subscriber,
            notification_id = %notification.id,
            error = %e,
            "Notification delivery failed"
        ),
    }
}

fn spawn_detached<F>(delivery: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let spawned = std::thread::Builder::new()
        .name("filehub-notify".to_string())
        .spawn(move || match runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt.block_on(delivery),
            Err(e) => tracing::warn!(error = %e, "Failed to start delivery runtime"),
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "Failed to spawn delivery thread");
    }
}

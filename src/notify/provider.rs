//! Notifier trait and the HTTP webhook implementation

use std::time::Duration;

use async_trait::async_trait;

use super::types::{Notification, NotifyError};
use crate::interest::SubscriberEndpoint;

/// Pushes a single notification to a subscriber endpoint
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        endpoint: &SubscriberEndpoint,
        notification: &Notification,
    ) -> Result<(), NotifyError>;
}

/// Delivers notifications as JSON POSTs to the subscriber's callback URL
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
}

impl HttpNotifier {
    pub fn new(timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Unreachable(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(
        &self,
        endpoint: &SubscriberEndpoint,
        notification: &Notification,
    ) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(endpoint.as_str())
            .json(notification)
            .send()
            .await
            .map_err(|e| NotifyError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected {
                status: response.status(),
            });
        }

        Ok(())
    }
}

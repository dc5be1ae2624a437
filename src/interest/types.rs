//! Interest types

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::HubError;

/// Address a notification can be pushed to.
///
/// For the HTTP transport this is the callback URL of a client's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberEndpoint(String);

impl SubscriberEndpoint {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubscriberEndpoint {
    fn from(endpoint: &str) -> Self {
        Self::new(endpoint)
    }
}

/// A subscriber's standing request to be told once `filename` is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    pub filename: String,
    pub subscriber: SubscriberEndpoint,
    pub expires_at: Instant,
}

impl Interest {
    /// Build an interest valid for `validity_secs` from now.
    ///
    /// Rejects empty names, empty endpoints, a zero validity and a validity
    /// too large to be represented as a deadline.
    pub fn new(
        subscriber: SubscriberEndpoint,
        filename: &str,
        validity_secs: u64,
    ) -> Result<Self, HubError> {
        if filename.is_empty() {
            return Err(HubError::InvalidArgument("filename must not be empty".into()));
        }
        if subscriber.as_str().is_empty() {
            return Err(HubError::InvalidArgument(
                "subscriber endpoint must not be empty".into(),
            ));
        }
        if validity_secs == 0 {
            return Err(HubError::InvalidArgument(
                "validity must be a positive number of seconds".into(),
            ));
        }

        let expires_at = Instant::now()
            .checked_add(Duration::from_secs(validity_secs))
            .ok_or_else(|| {
                HubError::InvalidArgument(format!("validity of {}s is too large", validity_secs))
            })?;

        Ok(Self {
            filename: filename.to_string(),
            subscriber,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    #[cfg(test)]
    pub(crate) fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Result of checking a filename against its pending interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Nothing registered for the filename
    NoInterest,
    /// Interest is live but the file is not stored yet; it stays registered
    Pending,
    /// Interest outlived its validity and was discarded without firing
    Expired(Interest),
    /// Interest was removed and must be delivered
    Fire(Interest),
}

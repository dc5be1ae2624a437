//! Interest tracker
//!
//! Holds at most one interest per filename. Register, cancel and check for a
//! filename all run under the same lock, so a cancel racing a fire observes
//! exactly one outcome and an interest is never handed out twice.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::time::Instant;

use super::types::{CheckOutcome, Interest};

#[derive(Debug, Default)]
pub struct InterestTracker {
    interests: Mutex<HashMap<String, Interest>>,
}

impl InterestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `interest`, replacing whatever was registered for the same
    /// filename, then check it against `is_available` in the same critical
    /// section.
    ///
    /// The displaced subscriber is not told it lost its slot.
    pub fn register<F>(&self, interest: Interest, is_available: F) -> CheckOutcome
    where
        F: Fn(&str) -> bool,
    {
        let filename = interest.filename.clone();
        let subscriber = interest.subscriber.clone();

        let (displaced, outcome) = {
            let mut interests = self.interests.lock();
            let displaced = interests.insert(filename.clone(), interest);
            let outcome =
                Self::check_locked(&mut interests, &filename, Instant::now(), &is_available);
            (displaced, outcome)
        };

        tracing::info!(filename = %filename, subscriber = %subscriber, "Interest registered");
        if let Some(previous) = displaced {
            tracing::warn!(
                filename = %filename,
                displaced = %previous.subscriber,
                "Replaced existing interest"
            );
        }

        outcome
    }

    /// Remove the interest for `filename`, whoever registered it.
    pub fn cancel(&self, filename: &str) -> Option<Interest> {
        let removed = self.interests.lock().remove(filename);
        if let Some(interest) = &removed {
            tracing::info!(
                filename = %filename,
                subscriber = %interest.subscriber,
                "Interest cancelled"
            );
        }
        removed
    }

    /// Decide whether the interest for `filename` should fire now.
    ///
    /// Expired and fired interests are removed before the lock is released.
    pub fn check<F>(&self, filename: &str, is_available: F) -> CheckOutcome
    where
        F: Fn(&str) -> bool,
    {
        let mut interests = self.interests.lock();
        Self::check_locked(&mut interests, filename, Instant::now(), &is_available)
    }

    fn check_locked<F>(
        interests: &mut HashMap<String, Interest>,
        filename: &str,
        now: Instant,
        is_available: &F,
    ) -> CheckOutcome
    where
        F: Fn(&str) -> bool,
    {
        match interests.entry(filename.to_string()) {
            Entry::Vacant(_) => CheckOutcome::NoInterest,
            Entry::Occupied(slot) => {
                if slot.get().is_expired_at(now) {
                    CheckOutcome::Expired(slot.remove())
                } else if is_available(filename) {
                    CheckOutcome::Fire(slot.remove())
                } else {
                    CheckOutcome::Pending
                }
            }
        }
    }

    /// Drop every interest whose deadline has passed.
    ///
    /// Returns the number of interests removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let count = {
            let mut interests = self.interests.lock();
            let before = interests.len();
            interests.retain(|_, interest| !interest.is_expired_at(now));
            before - interests.len()
        };

        if count > 0 {
            tracing::info!(count = count, "Purged expired interests");
        }
        count
    }

    /// Current interest for `filename`, expired or not
    #[cfg(test)]
    pub(crate) fn get(&self, filename: &str) -> Option<Interest> {
        self.interests.lock().get(filename).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.interests.lock().len()
    }
}

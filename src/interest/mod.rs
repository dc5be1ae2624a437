//! Interest tracking
//!
//! Time-bounded "tell me when this file exists" subscriptions. Expiry is
//! enforced when a check runs, not when the deadline passes.

mod tracker;
mod types;

pub use tracker::InterestTracker;
pub use types::{CheckOutcome, Interest, SubscriberEndpoint};

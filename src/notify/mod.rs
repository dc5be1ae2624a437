//! Push notifications
//!
//! Best-effort, one-shot delivery to a subscriber endpoint. Nothing here
//! retries, and no delivery failure reaches the operation that triggered it.

mod dispatcher;
mod provider;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use dispatcher::NotificationDispatcher;
pub use provider::{HttpNotifier, Notifier};
pub use types::{Notification, NotifyError};

//! Client side of the hub
//!
//! [`HubClient`] issues the five file/interest calls; [`NotificationInbox`]
//! is the endpoint the hub pushes notifications back to.

mod hub_client;
pub mod inbox;

pub use hub_client::{ClientError, ClientResult, HubClient};
pub use inbox::NotificationInbox;

//! FileHub Server Library
//!
//! An in-memory file sharing hub. Clients upload named files, list and
//! download them, and may register a time-bounded interest in a filename to
//! receive a one-shot push once that file is available.
//!
//! # Modules
//!
//! - `registry`: filename to content store
//! - `interest`: single-slot, expiring interest tracking
//! - `notify`: fire-and-forget push delivery
//! - `hub`: coordination of the three above
//! - `routes`: HTTP transport
//! - `client`: HTTP client and notification inbox

pub mod client;
pub mod config;
pub mod error;
pub mod hub;
pub mod interest;
pub mod notify;
pub mod registry;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, HubError};
pub use hub::FileHub;
pub use state::AppState;

//! Client-side notification inbox
//!
//! A small router the hub pushes notifications into. Each push is queued on
//! an unbounded channel so the hub's delivery call returns immediately.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tokio::sync::mpsc;

use crate::notify::Notification;

/// Path the inbox listens on, relative to wherever it is mounted
pub const NOTIFY_PATH: &str = "/notify";

/// Receiving half of an inbox
pub struct NotificationInbox {
    rx: mpsc::UnboundedReceiver<Notification>,
}

impl NotificationInbox {
    /// Create an inbox and the router that feeds it
    pub fn new() -> (Self, Router) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, router(tx))
    }

    pub async fn recv(&mut self) -> Option<Notification> {
        self.rx.recv().await
    }

    #[cfg(test)]
    pub(crate) fn try_recv(&mut self) -> Option<Notification> {
        self.rx.try_recv().ok()
    }
}

/// Router accepting `POST /notify`
pub fn router(tx: mpsc::UnboundedSender<Notification>) -> Router {
    Router::new()
        .route(NOTIFY_PATH, post(receive))
        .with_state(tx)
}

async fn receive(
    State(tx): State<mpsc::UnboundedSender<Notification>>,
    Json(notification): Json<Notification>,
) -> StatusCode {
    tracing::info!(
        filename = %notification.filename,
        notification_id = %notification.id,
        "Notification received: {}",
        notification.message
    );

    match tx.send(notification) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(_) => StatusCode::GONE,
    }
}

//! Interest routes
//!
//! Register and cancel availability subscriptions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{HubError, Result};
use crate::interest::SubscriberEndpoint;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterInterestRequest {
    pub subscriber: SubscriberEndpoint,
    pub filename: String,
    /// Signed so that non-positive values reach validation instead of
    /// failing deserialization
    pub validity_secs: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CancelParams {
    pub subscriber: SubscriberEndpoint,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CancelInterestResponse {
    pub cancelled: bool,
}

/// Create the interests router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_interest))
        .route("/:filename", delete(cancel_interest))
}

/// POST /api/v1/interests
async fn register_interest(
    State(state): State<AppState>,
    Json(request): Json<RegisterInterestRequest>,
) -> Result<StatusCode> {
    let validity_secs = u64::try_from(request.validity_secs).map_err(|_| {
        HubError::InvalidArgument(format!(
            "validity must be a positive number of seconds, got {}",
            request.validity_secs
        ))
    })?;

    state
        .hub()
        .register_interest(request.subscriber, &request.filename, validity_secs)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/interests/:filename?subscriber=...
async fn cancel_interest(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(params): Query<CancelParams>,
) -> Json<CancelInterestResponse> {
    let cancelled = state.hub().cancel_interest(&params.subscriber, &filename);
    Json(CancelInterestResponse { cancelled })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::config::Config;
    use crate::notify::testing::RecordingNotifier;
    use crate::routes;

    #[tokio::test]
    async fn test_register_then_upload_notifies() {
        let (notifier, mut rx) = RecordingNotifier::new();
        let state = AppState::with_notifier(Config::default(), Arc::new(notifier));
        let server = TestServer::new(routes::app(state.clone())).unwrap();

        server
            .post("/api/v1/interests")
            .json(&json!({
                "subscriber": "http://client.local/notify",
                "filename": "a.txt",
                "validity_secs": 5
            }))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert_eq!(state.hub().pending_interest_count(), 1);

        server.put("/api/v1/files/a.txt").text("hi").await;

        let (to, notification) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(to.as_str(), "http://client.local/notify");
        assert_eq!(notification.filename, "a.txt");
    }

    #[tokio::test]
    async fn test_non_positive_validity_rejected() {
        let (notifier, _rx) = RecordingNotifier::new();
        let state = AppState::with_notifier(Config::default(), Arc::new(notifier));
        let server = TestServer::new(routes::app(state.clone())).unwrap();

        for validity in [0, -5] {
            let response = server
                .post("/api/v1/interests")
                .json(&json!({
                    "subscriber": "http://client.local/notify",
                    "filename": "a.txt",
                    "validity_secs": validity
                }))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: serde_json::Value = response.json();
            assert_eq!(body["error"], "invalid_argument");
        }
        assert_eq!(state.hub().pending_interest_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_reports_outcome() {
        let (notifier, _rx) = RecordingNotifier::new();
        let state = AppState::with_notifier(Config::default(), Arc::new(notifier));
        let server = TestServer::new(routes::app(state)).unwrap();

        server
            .post("/api/v1/interests")
            .json(&json!({
                "subscriber": "http://client.local/notify",
                "filename": "a.txt",
                "validity_secs": 5
            }))
            .await;

        let first: CancelInterestResponse = server
            .delete("/api/v1/interests/a.txt")
            .add_query_param("subscriber", "http://client.local/notify")
            .await
            .json();
        assert!(first.cancelled);

        let second: CancelInterestResponse = server
            .delete("/api/v1/interests/a.txt")
            .add_query_param("subscriber", "http://client.local/notify")
            .await
            .json();
        assert!(!second.cancelled);
    }
}

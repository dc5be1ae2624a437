//! Notification payload and delivery errors

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Push sent to a subscriber once its file of interest is available
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub filename: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl Notification {
    pub fn file_available(filename: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            message: format!("File of interest '{}' is now available", filename),
            sent_at: Utc::now(),
        }
    }
}

/// Delivery failures. Logged by the dispatcher and never retried.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Subscriber unreachable: {0}")]
    Unreachable(String),

    #[error("Subscriber rejected notification with status {status}")]
    Rejected { status: StatusCode },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_references_filename() {
        let notification = Notification::file_available("a.txt");
        assert_eq!(notification.filename, "a.txt");
        assert!(notification.message.contains("'a.txt'"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let notification = Notification::file_available("a.txt");
        let json = serde_json::to_value(&notification).unwrap();
        assert!(json.get("sentAt").is_some());
        assert_eq!(json["filename"], "a.txt");
    }
}

//! HTTP client for the hub API

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::interest::SubscriberEndpoint;
use crate::registry::FileSummary;
use crate::routes::files::FileListResponse;
use crate::routes::interests::{CancelInterestResponse, RegisterInterestRequest};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Thin async wrapper over the hub's REST API
#[derive(Debug, Clone)]
pub struct HubClient {
    base_url: String,
    http: reqwest::Client,
}

impl HubClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn file_url(&self, filename: &str) -> String {
        format!(
            "{}/api/v1/files/{}",
            self.base_url,
            urlencoding::encode(filename)
        )
    }

    pub async fn upload(&self, filename: &str, content: impl Into<Bytes>) -> ClientResult<()> {
        let response = self
            .http
            .put(self.file_url(filename))
            .body(content.into())
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    pub async fn list(&self) -> ClientResult<Vec<FileSummary>> {
        let response = self
            .http
            .get(format!("{}/api/v1/files", self.base_url))
            .send()
            .await?;
        let listing: FileListResponse = json_body(response).await?;
        Ok(listing.files)
    }

    /// Download `filename`; `Ok(None)` when the server does not have it.
    pub async fn download(&self, filename: &str) -> ClientResult<Option<Bytes>> {
        let response = self.http.get(self.file_url(filename)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        Ok(Some(response.bytes().await?))
    }

    pub async fn register_interest(
        &self,
        subscriber: &SubscriberEndpoint,
        filename: &str,
        validity_secs: i64,
    ) -> ClientResult<()> {
        let request = RegisterInterestRequest {
            subscriber: subscriber.clone(),
            filename: filename.to_string(),
            validity_secs,
        };
        let response = self
            .http
            .post(format!("{}/api/v1/interests", self.base_url))
            .json(&request)
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }

    /// Returns whether the server held an interest for `filename`.
    pub async fn cancel_interest(
        &self,
        subscriber: &SubscriberEndpoint,
        filename: &str,
    ) -> ClientResult<bool> {
        let response = self
            .http
            .delete(format!(
                "{}/api/v1/interests/{}",
                self.base_url,
                urlencoding::encode(filename)
            ))
            .query(&[("subscriber", subscriber.as_str())])
            .send()
            .await?;
        let body: CancelInterestResponse = json_body(response).await?;
        Ok(body.cancelled)
    }
}

async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

async fn json_body<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    Ok(check_status(response).await?.json().await?)
}

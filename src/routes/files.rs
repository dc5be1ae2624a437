//! File routes
//!
//! Upload, list and download of stored files.

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::registry::FileSummary;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FileSummary>,
}

/// Create the files router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_files))
        .route("/:filename", get(download_file).put(upload_file))
}

/// PUT /api/v1/files/:filename
async fn upload_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    body: Bytes,
) -> Result<StatusCode> {
    state.hub().upload(&filename, body)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/files
async fn list_files(State(state): State<AppState>) -> Json<FileListResponse> {
    Json(FileListResponse {
        files: state.hub().list_entries(),
    })
}

/// GET /api/v1/files/:filename
async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let content = state
        .hub()
        .download(&filename)
        .ok_or_else(|| AppError::NotFound(format!("File not found: {}", filename)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, content.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename*=UTF-8''{}", urlencoding::encode(&filename)),
        )
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(e.to_string()))
}

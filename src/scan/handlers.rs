use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::dto::ScanResponse;
use super::services::scan_image;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const FILE_FIELD: &str = "file";

pub fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// POST /upload (multipart)
/// Field: file (one image). Other fields are ignored.
#[instrument(skip(state, mp), fields(scan_id = %Uuid::new_v4()))]
pub async fn upload(
    State(state): State<AppState>,
    mp: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ScanResponse>> {
    let mp = mp.map_err(|e| {
        warn!(error = %e, "request is not multipart");
        AppError::MissingFile
    })?;
    let body = read_file_field(mp).await?;
    let res = scan_image(&state, body).await?;
    Ok(Json(res))
}

async fn read_file_field(mut mp: Multipart) -> AppResult<Bytes> {
    while let Some(field) = mp.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        debug!(%file_name, %content_type, size = data.len(), "file received");
        return Ok(data);
    }
    Err(AppError::MissingFile)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(error = %e, "upload exceeds body limit");
        AppError::PayloadTooLarge
    } else {
        AppError::MalformedUpload(e.body_text())
    }
}

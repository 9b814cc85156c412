use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::products::LookupError;

/// Everything `/upload` can answer with besides success.
///
/// Every variant except [`AppError::Internal`] is an expected outcome caused
/// by the upload itself and maps to 400, apart from an upload over the body
/// limit which is 413.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    #[error("File too large")]
    PayloadTooLarge,

    #[error("Unable to read the image")]
    ImageDecode(#[source] image::ImageError),

    #[error("No barcode found")]
    NoBarcodeFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Error fetching product data")]
    UpstreamUnavailable(#[source] LookupError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound => AppError::ProductNotFound,
            other => AppError::UpstreamUnavailable(other),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                "An internal error occurred".to_string()
            }
            AppError::UpstreamUnavailable(cause) => {
                tracing::warn!(error = %cause, "product lookup unavailable");
                self.to_string()
            }
            AppError::ImageDecode(cause) => {
                tracing::info!(error = %cause, "upload is not a readable image");
                self.to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

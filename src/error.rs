use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorDto;

/// Failures of a conversion request.
///
/// `Display` is the message returned to the caller. Variants that hide their
/// cause behind a generic message keep it as a field for logging.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The remote source answered, but not with an acceptable PDF.
    #[error("{0}")]
    RemoteFetch(String),

    #[error("Client error occurred while downloading PDF.")]
    Transport(String),

    #[error("Error converting PDF to images.")]
    Render(String),

    #[error("Error uploading images.")]
    Upload(String),

    #[error("No images were generated.")]
    NoImages,

    #[error("{0}")]
    Internal(String),

    /// The request body was rejected before any work started.
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },
}

impl ConvertError {
    pub fn status(&self) -> StatusCode {
        match self {
            ConvertError::RemoteFetch(_) | ConvertError::Transport(_) => StatusCode::BAD_REQUEST,
            ConvertError::Render(_) | ConvertError::Upload(_) | ConvertError::NoImages | ConvertError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ConvertError::InvalidRequest { status, .. } => *status,
        }
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let body = ErrorDto { detail: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}

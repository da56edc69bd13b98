//! Error responses of the HTTP surface.

use crate::common::*;
use axum::extract::{
    multipart::MultipartError,
    rejection::{JsonRejection, PathRejection},
};

/// A failed request. Rendered as `{"detail": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded.")]
    NoFileUploaded,
    #[error("Invalid JSON file.")]
    MalformedJson(#[source] serde_json::Error),
    #[error("Invalid COCO format: missing key '{}'.", .0.field())]
    InvalidFormat(#[from] ReshapeError),
    #[error("No dataset loaded. Please upload a COCO file first.")]
    NoDataset,
    #[error("Image with ID {0} not found.")]
    ImageNotFound(ImageId),
    #[error("Directory '{}' does not exist.", .0.display())]
    InvalidDirectory(PathBuf),
    #[error("Image directory is not set.")]
    ImageDirectoryUnset,
    #[error("Uploaded file is too large.")]
    PayloadTooLarge,
    /// The request could not be extracted; carries the status axum chose.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("An error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoFileUploaded
            | Self::MalformedJson(_)
            | Self::InvalidFormat(_)
            | Self::InvalidDirectory(_) => StatusCode::BAD_REQUEST,
            Self::NoDataset | Self::ImageNotFound(_) | Self::ImageDirectoryUnset => {
                StatusCode::NOT_FOUND
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Rejected { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge,
            status if status.is_client_error() => Self::Rejected {
                status,
                message: err.body_text(),
            },
            _ => Self::Internal(
                anyhow::Error::new(err).context("failed to read the uploaded file"),
            ),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Internal(err) => error!("{:#}", err),
            Self::MalformedJson(err) => warn!("rejected upload: {}", err),
            Self::InvalidFormat(err) => warn!("rejected upload: {}", err),
            _ => {}
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

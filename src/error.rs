//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("resource '{0}' cannot declare both soft-delete and hard-delete")]
    ConflictingDelete(String),
    #[error("unknown route '{capability}' for resource '{resource}'")]
    UnknownCapability { resource: String, capability: String },
    #[error("route '{capability}' declared more than once for resource '{resource}'")]
    DuplicateCapability { resource: String, capability: String },
    #[error("invalid resource name: '{0}'")]
    InvalidResourceName(String),
    #[error("config load: {0}")]
    Load(String),
    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting {key}: {message}")]
    Setting { key: &'static str, message: String },
}

/// Failures raised by the record store. `NotFound` is the only expected one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no record '{id}' in '{resource}'")]
    NotFound { resource: String, id: String },
    #[error("record store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        StoreError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// A request extractor refused the request; keeps the extractor's status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl AppError {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Rejected {
            status,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Store(StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "not_found", "Not Found".to_string())
            }
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", self.to_string()),
            AppError::Rejected { status, .. } if status.is_server_error() => {
                tracing::error!(error = %self, "request rejected");
                (*status, "internal_error", "Internal Server Error".to_string())
            }
            AppError::Rejected { status, message } => {
                let code = match *status {
                    StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
                    _ => "bad_request",
                };
                (*status, code, message.clone())
            }
            AppError::Store(StoreError::Poisoned) | AppError::Config(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal Server Error".to_string(),
                )
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

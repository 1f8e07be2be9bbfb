//! Error type shared by the scoring core, the store and the HTTP surface.

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Precondition violated by the caller (empty bank, zero questions, bad lesson number).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A badge record names a type outside the six known ones.
    #[error("Unknown badge type: {0}")]
    UnknownBadgeType(String),

    #[error("Duplicate badge id in catalog: {0}")]
    DuplicateBadge(String),

    /// Question bank entry that fails load-time validation.
    #[error("Invalid question {id}: {reason}")]
    InvalidQuestion { id: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// An AI collaborator (chat, transcription, speech) failed.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) | Error::UnknownBadgeType(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::DuplicateBadge(_) | Error::InvalidQuestion { .. } | Error::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "fluentusa", error = %self, "Request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

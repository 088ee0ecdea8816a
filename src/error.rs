//! Error types shared by the quiz engine and the directory server.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::{
    dao::storage::StorageError,
    state::{InvalidTransition, session::QuizSummary},
};

/// Errors that can occur while driving a quiz session.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The trigger is not allowed in the current phase.
    #[error(transparent)]
    InvalidState(#[from] InvalidTransition),
    /// The statistics record could not be read or written.
    #[error("statistics unavailable")]
    Storage(#[from] StorageError),
    /// The session finished but its statistics could not be saved.
    #[error("session finished but its statistics were not saved")]
    Unsaved {
        /// Summary of the session that just finished.
        summary: QuizSummary,
        /// Why the save failed.
        #[source]
        source: StorageError,
    },
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::MarksError;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `MISSING_FIELDS`,
    /// `VALIDATION_ERROR`, `FULL_MARKS_INVALID`, `OBTAINED_NEGATIVE`,
    /// `OBTAINED_EXCEEDS_FULL`, `DUPLICATE_ROLL`, `NOT_FOUND`,
    /// `STORE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "OBTAINED_EXCEEDS_FULL")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Obtained marks cannot exceed full marks")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// One or more required fields were absent from a create request.
    MissingFields(String),
    Validation(String),
    /// A marks rule was violated; carries exactly which one.
    Marks(MarksError),
    DuplicateRoll(String),
    NotFound(String),
    /// The record store could not be reached. The service keeps running and
    /// re-attempts connectivity on the next operation.
    StoreUnavailable(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::MissingFields(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "MISSING_FIELDS",
                    message: msg,
                },
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::Marks(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: err.code(),
                    message: err.to_string(),
                },
            ),
            AppError::DuplicateRoll(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "DUPLICATE_ROLL",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::StoreUnavailable(detail) => {
                tracing::warn!("Record store unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody {
                        code: "STORE_UNAVAILABLE",
                        message: "The record store is currently unreachable".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<MarksError> for AppError {
    fn from(err: MarksError) -> Self {
        AppError::Marks(err)
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        // The unique index on roll is the authoritative uniqueness check;
        // losing the check-then-insert race lands here.
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return AppError::DuplicateRoll("Roll number already exists".into());
        }

        match err {
            DbErr::Conn(e) => AppError::StoreUnavailable(e.to_string()),
            DbErr::ConnectionAcquire(e) => AppError::StoreUnavailable(e.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

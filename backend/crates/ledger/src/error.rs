//! Ledger Error Types
//!
//! Ledger-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use account::AccountError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-specific error variants
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Request failed schema validation; the reason is only logged
    #[error("invalid data")]
    InvalidData(String),

    /// Report owner does not exist
    #[error("User not found")]
    UserNotFound,

    /// Report does not exist
    #[error("Report not found")]
    ReportNotFound,

    /// Unknown user or reward, or balance below the reward cost
    #[error("Unable to redeem reward")]
    RedeemFailed,

    /// Failure inside the user repository
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Wrap a value object validation failure
    pub(crate) fn invalid(err: AppError) -> Self {
        LedgerError::InvalidData(err.message().to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::InvalidData(_) | LedgerError::RedeemFailed => StatusCode::BAD_REQUEST,
            LedgerError::UserNotFound | LedgerError::ReportNotFound => StatusCode::NOT_FOUND,
            LedgerError::Account(e) => e.status_code(),
            LedgerError::Database(_) | LedgerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidData(_) | LedgerError::RedeemFailed => ErrorKind::BadRequest,
            LedgerError::UserNotFound | LedgerError::ReportNotFound => ErrorKind::NotFound,
            LedgerError::Account(e) => e.kind(),
            LedgerError::Database(_) | LedgerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side details never reach the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            LedgerError::Account(e) => e.to_app_error(),
            _ if self.kind().is_server_error() => AppError::internal("Server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LedgerError::Database(e) => {
                tracing::error!(error = %e, "Ledger database error");
            }
            LedgerError::Internal(msg) => {
                tracing::error!(message = %msg, "Ledger internal error");
            }
            LedgerError::Account(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Ledger user storage error");
            }
            LedgerError::RedeemFailed => {
                tracing::warn!("Reward redemption refused");
            }
            LedgerError::InvalidData(reason) => {
                tracing::debug!(reason = %reason, "Ledger validation failed");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger error");
            }
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

//! Client Error Types

use kernel::error::app_error::Problem;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to callers of the client
#[derive(Debug, Error)]
pub enum ClientError {
    /// 400: validation failure, duplicate email or refused redemption
    #[error("{0}")]
    BadRequest(String),

    /// 401: wrong email or password
    #[error("{0}")]
    Unauthorized(String),

    /// 404: unknown user or report
    #[error("{0}")]
    NotFound(String),

    /// 5xx from the server
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status
    #[error("unexpected status {status}: {message}")]
    Unexpected { status: u16, message: String },

    /// Action needs a signed-in user
    #[error("not signed in")]
    NotAuthenticated,

    /// Checked locally before contacting the server
    #[error("insufficient points: have {balance}, need {cost}")]
    InsufficientPoints { balance: i32, cost: i32 },

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// Connection, timeout or body decoding failure
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A cached query value did not match the requested type
    #[error("cached value has unexpected shape: {0}")]
    Cache(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a non-success response to an error
    ///
    /// The server's `detail` is used when the body is a problem document,
    /// the raw body otherwise.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Problem>(body)
            .map(|problem| problem.detail)
            .unwrap_or_else(|_| body.trim().to_string());

        match ErrorKind::from_status(status) {
            Some(ErrorKind::BadRequest) => ClientError::BadRequest(message),
            Some(ErrorKind::Unauthorized) => ClientError::Unauthorized(message),
            Some(ErrorKind::NotFound) => ClientError::NotFound(message),
            Some(ErrorKind::InternalServerError) => ClientError::Server { status, message },
            None => ClientError::Unexpected { status, message },
        }
    }

    /// HTTP status the server answered with, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::BadRequest(_) => Some(400),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::NotFound(_) => Some(404),
            ClientError::Server { status, .. } | ClientError::Unexpected { status, .. } => {
                Some(*status)
            }
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

//! Framework glue: request rejections into [`AppError`], and [`AppError`]
//! into an HTTP response carrying its [`Problem`](super::app_error::Problem).

#[cfg(feature = "axum")]
use super::app_error::AppError;

/// Malformed or mistyped JSON bodies collapse into the generic validation error.
#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        tracing::debug!(error = %err.body_text(), "Rejected request body");
        AppError::invalid_data().with_source(err)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.problem())).into_response()
    }
}

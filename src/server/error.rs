use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::TriviaError;

/// A failed request: the status the client sees and the error behind it.
///
/// The body only ever carries the status code and a fixed message; the
/// source is logged.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    source: TriviaError,
}

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, source: impl Into<TriviaError>) -> Self {
        ApiError {
            status,
            source: source.into(),
        }
    }

    pub fn bad_request(source: impl Into<TriviaError>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, source)
    }

    pub fn not_found(source: impl Into<TriviaError>) -> Self {
        Self::new(StatusCode::NOT_FOUND, source)
    }

    pub fn unprocessable(source: impl Into<TriviaError>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, source)
    }

    #[cfg(test)]
    fn status(&self) -> StatusCode {
        self.status
    }
}

/// Extractor rejections are treated as malformed input.
pub fn rejected(rejection: impl std::fmt::Display) -> TriviaError {
    TriviaError::InvalidArgument(rejection.to_string())
}

impl From<TriviaError> for ApiError {
    fn from(source: TriviaError) -> Self {
        let status = match source {
            TriviaError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            TriviaError::NotFound(_) => StatusCode::NOT_FOUND,
            TriviaError::StoreFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError { status, source }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::from(TriviaError::from(error))
    }
}

fn message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::NOT_FOUND => "Page Not Found",
        StatusCode::METHOD_NOT_ALLOWED => "Method Not Allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable Entity",
        _ => "Internal Server Error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.source {
            TriviaError::StoreFailure(error) => {
                tracing::error!(status = %self.status, error = %error, "Store failure")
            }
            source => tracing::debug!(status = %self.status, error = %source, "Request failed"),
        }
        let body = ErrorBody {
            success: false,
            error: self.status.as_u16(),
            message: message(self.status),
        };
        (self.status, Json(body)).into_response()
    }
}

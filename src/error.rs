use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    models::ErrorResponse,
    repository::RepositoryError,
    validation::FieldError,
};

/// AppError
///
/// Every failure a handler can produce. The status mapping lives in
/// `IntoResponse` so that no handler builds error bodies by hand.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    /// Bad login input on the user resource. Reported as 400.
    #[error("{0}")]
    InvalidCredentials(&'static str),

    /// Bad admin login or a rejected bearer token. Reported as 401.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// A body the JSON extractor refused before it could be parsed.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn internal<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AppError::Internal(Box::new(err))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Rejected { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict => AppError::Conflict("Record already exists"),
            RepositoryError::Database(e) => AppError::internal(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(errors) => ErrorResponse {
                message: "Validation failed".to_string(),
                errors: Some(errors),
            },
            AppError::Internal(source) => {
                // The source never reaches the client.
                tracing::error!(error = %source, "request failed with internal error");
                ErrorResponse {
                    message: "Server error".to_string(),
                    errors: None,
                }
            }
            other => ErrorResponse {
                message: other.to_string(),
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

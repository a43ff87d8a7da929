use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A write or query the store refused. `message` is the flash text shown to the user.
    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(source: sqlx::Error) -> Self {
        AppError::Persistence {
            message: "A database error occurred".to_string(),
            source,
        }
    }
}

/// Wraps a store error with the flash message the user should see.
pub fn persistence(message: impl Into<String>) -> impl FnOnce(sqlx::Error) -> AppError {
    let message = message.into();
    move |source| AppError::Persistence { message, source }
}

impl AppError {
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            AppError::Persistence { source, .. } => source
                .as_database_error()
                .map(|db| !matches!(db.kind(), ErrorKind::Other))
                .unwrap_or(false),
            _ => false,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence { .. } if self.is_constraint_violation() => StatusCode::CONFLICT,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Persistence { .. } if self.is_constraint_violation() => {
                "CONSTRAINT_VIOLATION"
            }
            AppError::Persistence { .. } => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => {
                warn!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::Persistence { message, source } => {
                error!(code = self.code(), error = ?source, message = %message, "Database error");
            }
            AppError::Internal(msg) => {
                error!(message = %msg, "Internal error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // The store's own wording never reaches the client
        let public_message = match &self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Persistence { message, .. } => message.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
        };

        error_response(code, public_message, None, status)
    }
}

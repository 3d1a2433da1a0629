use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::repositories::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("payment gateway request failed")]
    Upstream(#[source] anyhow::Error),
    #[error("store operation failed")]
    Store(#[source] RepositoryError),
}

impl UseCaseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::Validation(_) => StatusCode::BAD_REQUEST,
            UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            UseCaseError::Conflict(_) => StatusCode::CONFLICT,
            UseCaseError::Upstream(_) => StatusCode::BAD_GATEWAY,
            UseCaseError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found(what: &str) -> Self {
        UseCaseError::NotFound(format!("{what} not found"))
    }

    /// Unique-constraint violations become `Conflict` with `message`.
    pub fn from_repository(err: RepositoryError, conflict_message: &str) -> Self {
        match err {
            RepositoryError::Conflict(_) => UseCaseError::Conflict(conflict_message.to_string()),
            other => UseCaseError::Store(other),
        }
    }

    /// Internal failures carry detail that must not reach the caller.
    pub fn is_opaque(&self) -> bool {
        matches!(self, UseCaseError::Upstream(_) | UseCaseError::Store(_))
    }
}

impl From<RepositoryError> for UseCaseError {
    fn from(err: RepositoryError) -> Self {
        UseCaseError::from_repository(err, "resource already exists")
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write. Carries the constraint name.
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    /// The store call outlived its deadline; its outcome is unknown.
    #[error("store call timed out")]
    Timeout,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::Conflict(info.constraint_name().unwrap_or("unknown").to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::Unknown, ref info)
                if info.message().contains("statement timeout") =>
            {
                RepositoryError::Timeout
            }
            other => RepositoryError::Store(other.into()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::Store(anyhow::anyhow!("failed to check out connection: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_string()))
    }

    #[test]
    fn statement_timeout_maps_to_timeout() {
        let err = RepositoryError::from(database_error(
            DatabaseErrorKind::Unknown,
            "canceling statement due to statement timeout",
        ));

        assert!(matches!(err, RepositoryError::Timeout));
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = RepositoryError::from(database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint",
        ));

        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn other_database_errors_stay_store_errors() {
        let err = RepositoryError::from(database_error(
            DatabaseErrorKind::Unknown,
            "relation \"payments\" does not exist",
        ));

        assert!(matches!(err, RepositoryError::Store(_)));
    }
}

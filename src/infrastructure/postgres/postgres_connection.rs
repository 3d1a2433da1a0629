use std::{sync::Arc, time::Duration};

use anyhow::{Result, anyhow};
use diesel::{
    PgConnection, RunQueryDsl,
    r2d2::{ConnectionManager, CustomizeConnection, Error as R2d2Error, Pool},
};
use tokio::task;
use tracing::warn;

use crate::{
    config::config_model::Database,
    domain::repositories::errors::{RepositoryError, RepositoryResult},
};

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

/// Bounds every statement server-side so an abandoned call cannot keep running.
#[derive(Debug)]
struct StatementTimeout {
    millis: u128,
}

impl CustomizeConnection<PgConnection, R2d2Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> std::result::Result<(), R2d2Error> {
        diesel::sql_query(format!("SET statement_timeout = {}", self.millis))
            .execute(conn)
            .map_err(R2d2Error::QueryError)?;
        Ok(())
    }
}

pub fn establish_connection(database: &Database) -> Result<PgPoolSquad> {
    let store_timeout = Duration::from_secs(database.store_timeout_secs);
    let manager = ConnectionManager::<PgConnection>::new(&database.url);
    let pool = Pool::builder()
        .max_size(database.max_connections)
        .connection_timeout(store_timeout)
        .connection_customizer(Box::new(StatementTimeout {
            millis: store_timeout.as_millis(),
        }))
        .build(manager)?;
    Ok(pool)
}

/// Pool handle shared by the repositories. Runs synchronous diesel work on the
/// blocking threadpool under a deadline.
#[derive(Clone)]
pub struct PgStore {
    pool: Arc<PgPoolSquad>,
    store_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: Arc<PgPoolSquad>, store_timeout: Duration) -> Self {
        Self {
            pool,
            store_timeout,
        }
    }

    pub async fn run<T, F>(&self, operation: &'static str, work: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        let handle = task::spawn_blocking(move || -> RepositoryResult<T> {
            let mut conn = pool.get()?;
            work(&mut conn)
        });

        match tokio::time::timeout(self.store_timeout, handle).await {
            Ok(joined) => joined
                .map_err(|err| RepositoryError::Store(anyhow!("{operation}: blocking task failed: {err}")))?,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.store_timeout.as_millis() as u64,
                    "postgres: store call timed out"
                );
                Err(RepositoryError::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::errors::UseCaseError;
    use axum::{http::StatusCode, response::IntoResponse};

    // Port 1 refuses connections, so checkout blocks until `connection_timeout`.
    fn unreachable_store(store_timeout: Duration) -> PgStore {
        let manager =
            ConnectionManager::<PgConnection>::new("postgres://blogsite@127.0.0.1:1/blogsite");
        let pool = Pool::builder()
            .max_size(1)
            .min_idle(Some(0))
            .connection_timeout(Duration::from_secs(2))
            .build_unchecked(manager);
        PgStore::new(Arc::new(pool), store_timeout)
    }

    #[tokio::test]
    async fn call_past_its_deadline_is_a_timeout() {
        let store = unreachable_store(Duration::from_millis(100));

        let result = store.run("test.deadline", |_conn| Ok(())).await;

        let err = result.unwrap_err();
        assert!(matches!(err, RepositoryError::Timeout));
        let err = UseCaseError::from(err);
        assert!(err.is_opaque());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn failed_checkout_within_the_deadline_is_a_store_error() {
        let store = unreachable_store(Duration::from_secs(10));

        let result = store.run("test.checkout", |_conn| Ok(())).await;

        assert!(matches!(result, Err(RepositoryError::Store(_))));
    }
}

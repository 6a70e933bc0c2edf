//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use super::models::{MeasurementRow, MeasurementTuple};
use super::{MeasurementStore, StoreError};
use crate::config::DatabaseConfig;
use crate::domain::{Measurement, MeasurementId, NewMeasurement};

const INSERT_MEASUREMENT: &str = "INSERT INTO mediciones (temperatura_k, humedad_relativa, presion_pa) \
     VALUES ($1, $2, $3) RETURNING id_medicion::BIGINT";

const SELECT_BY_ID: &str = "SELECT id_medicion::BIGINT, temperatura_k::FLOAT8, \
     humedad_relativa::FLOAT8, presion_pa::FLOAT8 FROM mediciones WHERE id_medicion = $1";

const SELECT_LATEST: &str = "SELECT id_medicion::BIGINT, temperatura_k::FLOAT8, \
     humedad_relativa::FLOAT8, presion_pa::FLOAT8 FROM mediciones \
     ORDER BY id_medicion DESC LIMIT $1";

/// PostgreSQL-backed measurement store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a lazily connecting pool from the database settings.
    ///
    /// No connection is opened here: the first query establishes one, so
    /// the server can start while the database is still down.
    #[must_use]
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port);
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }
        if let Some(database) = &config.database {
            options = options.database(database);
        }
        Self::new(PgPoolOptions::new().connect_lazy_with(options))
    }

    /// Runs a trivial query to check that the database answers.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if no connection could be used.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MeasurementStore for PostgresStore {
    async fn insert(&self, sample: NewMeasurement) -> Result<MeasurementId, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(INSERT_MEASUREMENT)
            .bind(sample.temperature_k)
            .bind(sample.relative_humidity)
            .bind(sample.pressure_pa)
            .fetch_one(&self.pool)
            .await?;

        Ok(MeasurementId::new(id))
    }

    async fn get(&self, id: MeasurementId) -> Result<Option<Measurement>, StoreError> {
        let row = sqlx::query_as::<_, MeasurementTuple>(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|tuple| MeasurementRow::from(tuple).into()))
    }

    async fn latest(&self, limit: u32) -> Result<Vec<Measurement>, StoreError> {
        let rows = sqlx::query_as::<_, MeasurementTuple>(SELECT_LATEST)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|tuple| MeasurementRow::from(tuple).into())
            .collect())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => Self::Rejected(db.to_string()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::Unavailable(err.to_string()),
            other => Self::Unexpected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_are_unavailable() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn io_errors_are_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            StoreError::from(sqlx::Error::Io(io)),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn row_not_found_is_unexpected() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Unexpected(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_database_reports_unavailable() {
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .database("nowhere");
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(2))
            .connect_lazy_with(options);
        let store = PostgresStore::new(pool);

        let result = store.insert(NewMeasurement::complete(1.0, 2.0, 3.0)).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}

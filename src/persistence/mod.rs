//! Persistence layer: the `mediciones` table.
//!
//! Provides the [`MeasurementStore`] trait for durable storage of
//! measurements. The production implementation uses `sqlx::PgPool` for
//! async PostgreSQL access; [`memory::InMemoryStore`] backs local
//! development and tests.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Measurement, MeasurementId, NewMeasurement};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Failure reported by a [`MeasurementStore`].
///
/// The variants only matter for logs: the API maps all of them to the
/// same generic 500 response.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (I/O, TLS, pool timeout or closed).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the statement (constraint violation, type mismatch).
    #[error("store rejected statement: {0}")]
    Rejected(String),

    /// Any other driver failure.
    #[error("unexpected store error: {0}")]
    Unexpected(String),
}

/// Durable storage for measurements.
///
/// One instance is created at startup and shared by every request through
/// [`crate::app_state::AppState`]. Implementations must be safe to call
/// concurrently; each call is a self-contained statement.
#[async_trait]
pub trait MeasurementStore: Send + Sync + fmt::Debug {
    /// Inserts one row and returns the identifier the store generated.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the row could not be written.
    async fn insert(&self, sample: NewMeasurement) -> Result<MeasurementId, StoreError>;

    /// Fetches a single row by identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store could not be queried.
    async fn get(&self, id: MeasurementId) -> Result<Option<Measurement>, StoreError>;

    /// Returns up to `limit` rows, newest (highest id) first.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store could not be queried.
    async fn latest(&self, limit: u32) -> Result<Vec<Measurement>, StoreError>;
}

//! In-memory measurement store.
//!
//! Mirrors the `mediciones` table inside the process: an auto-increment
//! counter and an ordered map of rows. Used for local development
//! (`STORE_BACKEND=memory`) and for exercising the HTTP layer without a
//! database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MeasurementStore, StoreError};
use crate::domain::{Measurement, MeasurementId, NewMeasurement};

/// Table contents guarded by a single lock.
#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<MeasurementId, Measurement>,
}

/// Process-local store with auto-increment identifiers.
///
/// By default every column is nullable. [`InMemoryStore::not_null`]
/// builds a store that rejects missing readings the way a table with
/// `NOT NULL` columns would.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    table: RwLock<Table>,
    reject_nulls: bool,
}

impl InMemoryStore {
    /// Creates an empty store with nullable columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose columns are all `NOT NULL`.
    #[must_use]
    pub fn not_null() -> Self {
        Self {
            table: RwLock::default(),
            reject_nulls: true,
        }
    }

    /// Returns the number of stored rows.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Returns `true` if no row has been stored.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

#[async_trait]
impl MeasurementStore for InMemoryStore {
    async fn insert(&self, sample: NewMeasurement) -> Result<MeasurementId, StoreError> {
        if self.reject_nulls {
            if let Some(column) = sample.missing_fields().first() {
                return Err(StoreError::Rejected(format!(
                    "null value in column \"{column}\" violates not-null constraint"
                )));
            }
        }

        let mut table = self.table.write().await;
        table.last_id = table.last_id.saturating_add(1);
        let id = MeasurementId::new(table.last_id);
        table.rows.insert(id, sample.with_id(id));
        Ok(id)
    }

    async fn get(&self, id: MeasurementId) -> Result<Option<Measurement>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).copied())
    }

    async fn latest(&self, limit: u32) -> Result<Vec<Measurement>, StoreError> {
        let table = self.table.read().await;
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(table.rows.values().rev().take(take).copied().collect())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let store = InMemoryStore::new();
        let sample = NewMeasurement::complete(298.15, 0.45, 101_325.0);

        let Ok(first) = store.insert(sample).await else {
            panic!("first insert failed");
        };
        let Ok(second) = store.insert(sample).await else {
            panic!("second insert failed");
        };

        assert!(second > first);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn stored_values_round_trip_exactly() {
        let store = InMemoryStore::new();
        let sample = NewMeasurement::complete(273.15, 0.123_456_789, 98_765.4321);

        let Ok(id) = store.insert(sample).await else {
            panic!("insert failed");
        };
        let Ok(Some(stored)) = store.get(id).await else {
            panic!("row not found");
        };
        assert_eq!(stored.readings(), sample);
    }

    #[tokio::test]
    async fn nullable_store_accepts_missing_readings() {
        let store = InMemoryStore::new();
        let sample = NewMeasurement {
            pressure_pa: None,
            ..NewMeasurement::complete(290.0, 0.3, 0.0)
        };

        let Ok(id) = store.insert(sample).await else {
            panic!("insert failed");
        };
        let Ok(Some(stored)) = store.get(id).await else {
            panic!("row not found");
        };
        assert_eq!(stored.pressure_pa, None);
    }

    #[tokio::test]
    async fn not_null_store_rejects_missing_readings() {
        let store = InMemoryStore::not_null();
        let sample = NewMeasurement {
            pressure_pa: None,
            ..NewMeasurement::complete(290.0, 0.3, 0.0)
        };

        let result = store.insert(sample).await;
        assert!(matches!(result, Err(StoreError::Rejected(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn latest_returns_newest_first() {
        let store = InMemoryStore::new();
        for t in [280.0, 281.0, 282.0] {
            let _ = store.insert(NewMeasurement::complete(t, 0.5, 100_000.0)).await;
        }

        let Ok(rows) = store.latest(2).await else {
            panic!("query failed");
        };
        let temps: Vec<_> = rows.iter().map(|m| m.temperature_k).collect();
        assert_eq!(temps, vec![Some(282.0), Some(281.0)]);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let store = InMemoryStore::new();
        let result = store.get(MeasurementId::new(99)).await;
        assert!(matches!(result, Ok(None)));
    }
}

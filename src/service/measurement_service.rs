//! Measurement service: stores and reads back sensor samples.

use std::sync::Arc;

use crate::domain::{Measurement, MeasurementId, NewMeasurement};
use crate::error::IngestError;
use crate::persistence::MeasurementStore;

/// Orchestration layer between the handlers and the store.
///
/// Stateless coordinator: owns a shared handle to the process-wide
/// [`MeasurementStore`]. Cloning is cheap and every clone talks to the
/// same store.
#[derive(Debug, Clone)]
pub struct MeasurementService {
    store: Arc<dyn MeasurementStore>,
}

impl MeasurementService {
    /// Creates a new `MeasurementService`.
    #[must_use]
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self { store }
    }

    /// Persists one sample as a new row.
    ///
    /// Missing readings are passed through as `NULL`; whether that is
    /// accepted is up to the table. Duplicate samples create duplicate
    /// rows.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Write`] if the store fails for any reason.
    pub async fn ingest(&self, sample: NewMeasurement) -> Result<MeasurementId, IngestError> {
        let missing = sample.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(?missing, "sample has missing readings, storing them as null");
        }

        match self.store.insert(sample).await {
            Ok(id) => {
                tracing::info!(%id, "measurement stored");
                Ok(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to store measurement");
                Err(IngestError::Write(e))
            }
        }
    }

    /// Fetches a single measurement.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::NotFound`] for an unknown id and
    /// [`IngestError::Read`] if the store fails.
    pub async fn get(&self, id: MeasurementId) -> Result<Measurement, IngestError> {
        self.store
            .get(id)
            .await
            .map_err(|e| {
                tracing::error!(%id, error = %e, "failed to read measurement");
                IngestError::Read(e)
            })?
            .ok_or(IngestError::NotFound(id))
    }

    /// Returns up to `limit` measurements, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Read`] if the store fails.
    pub async fn latest(&self, limit: u32) -> Result<Vec<Measurement>, IngestError> {
        self.store.latest(limit).await.map_err(|e| {
            tracing::error!(limit, error = %e, "failed to list measurements");
            IngestError::Read(e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::persistence::{InMemoryStore, StoreError};

    #[derive(Debug)]
    struct UnreachableStore;

    #[async_trait]
    impl MeasurementStore for UnreachableStore {
        async fn insert(&self, _: NewMeasurement) -> Result<MeasurementId, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn get(&self, _: MeasurementId) -> Result<Option<Measurement>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn latest(&self, _: u32) -> Result<Vec<Measurement>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn make_service() -> MeasurementService {
        MeasurementService::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn duplicate_samples_get_distinct_ids() {
        let service = make_service();
        let sample = NewMeasurement::complete(298.15, 0.45, 101_325.0);

        let Ok(a) = service.ingest(sample).await else {
            panic!("first ingest failed");
        };
        let Ok(b) = service.ingest(sample).await else {
            panic!("second ingest failed");
        };
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn get_returns_stored_values() {
        let service = make_service();
        let sample = NewMeasurement::complete(300.0, 55.5, 100_100.0);

        let Ok(id) = service.ingest(sample).await else {
            panic!("ingest failed");
        };
        let Ok(stored) = service.get(id).await else {
            panic!("get failed");
        };
        assert_eq!(stored.readings(), sample);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let service = make_service();
        let result = service.get(MeasurementId::new(404)).await;
        assert!(matches!(result, Err(IngestError::NotFound(_))));
    }

    #[tokio::test]
    async fn store_failures_become_write_and_read_errors() {
        let service = MeasurementService::new(Arc::new(UnreachableStore));

        let write = service.ingest(NewMeasurement::default()).await;
        assert!(matches!(write, Err(IngestError::Write(_))));

        let read = service.latest(10).await;
        assert!(matches!(read, Err(IngestError::Read(_))));

        let one = service.get(MeasurementId::new(1)).await;
        assert!(matches!(one, Err(IngestError::Read(_))));
    }
}

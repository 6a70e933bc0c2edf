//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::MeasurementStore;
use crate::service::MeasurementService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Built once at startup; the store inside lives as long as the process.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Measurement service for all business logic.
    pub measurement_service: MeasurementService,
}

impl AppState {
    /// Wraps a store into the state handed to the router.
    #[must_use]
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self {
            measurement_service: MeasurementService::new(store),
        }
    }
}

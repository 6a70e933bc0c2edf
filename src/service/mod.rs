//! Service layer: business logic between handlers and storage.

pub mod measurement_service;

pub use measurement_service::MeasurementService;

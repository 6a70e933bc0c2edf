//! Domain layer: measurement identity and value types.
//!
//! These types carry no persistence or HTTP concerns. The API layer maps
//! its Spanish wire names (`temperatura_k`, ...) onto them, and the
//! persistence layer maps them onto the `mediciones` table.

pub mod measurement;
pub mod measurement_id;

pub use measurement::{Measurement, NewMeasurement};
pub use measurement_id::MeasurementId;

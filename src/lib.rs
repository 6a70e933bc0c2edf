//! # sensor-gateway
//!
//! HTTP ingestion gateway for a weather station.
//!
//! The station (an ESP-32 with temperature, humidity and pressure
//! sensors) POSTs each sample as JSON; the gateway stores it as one row
//! of the `mediciones` table and answers with a short acknowledgment.
//!
//! ## Architecture
//!
//! ```text
//! Station (HTTP POST /api/datos)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── MeasurementService (service/)
//!     │
//!     ├── MeasurementStore (persistence/)
//!     │
//!     └── PostgreSQL `mediciones`
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

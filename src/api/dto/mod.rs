//! Data Transfer Objects for REST request/response serialization.

pub mod measurement_dto;

pub use measurement_dto::*;

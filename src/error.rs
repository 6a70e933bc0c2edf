//! Gateway error types with HTTP status code mapping.
//!
//! [`IngestError`] is the central error type for the API. Each variant
//! maps to an HTTP status code and the acknowledgment body the station
//! firmware understands.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::MeasurementId;
use crate::persistence::StoreError;

/// Message returned when a write fails for any storage reason.
pub const WRITE_FAILED_MESSAGE: &str = "Error interno del servidor al guardar los datos";

/// Message returned when a read fails for any storage reason.
pub const READ_FAILED_MESSAGE: &str = "Error interno del servidor al consultar los datos";

/// JSON acknowledgment body shared by success and error responses.
///
/// ```json
/// { "status": "error", "mensaje": "Error interno del servidor al guardar los datos" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// `"ok"` or `"error"`.
    pub status: String,
    /// Human-readable message for the device operator.
    pub mensaje: String,
}

impl StatusResponse {
    /// Builds a success acknowledgment.
    #[must_use]
    pub fn ok(mensaje: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            mensaje: mensaje.into(),
        }
    }

    /// Builds an error acknowledgment.
    #[must_use]
    pub fn error(mensaje: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            mensaje: mensaje.into(),
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant          | HTTP Status               | Body message           |
/// |------------------|---------------------------|------------------------|
/// | `InvalidPayload` | 400 Bad Request           | the validation detail  |
/// | `NotFound`       | 404 Not Found             | names the id           |
/// | `Write`          | 500 Internal Server Error | fixed, no detail       |
/// | `Read`           | 500 Internal Server Error | fixed, no detail       |
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// A field holds a value that is not a number.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// No measurement with the given id.
    #[error("measurement {0} not found")]
    NotFound(MeasurementId),

    /// The store failed while writing.
    #[error("write failed: {0}")]
    Write(#[source] StoreError),

    /// The store failed while reading.
    #[error("read failed: {0}")]
    Read(#[source] StoreError),
}

impl IngestError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Write(_) | Self::Read(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message exposed to the caller. Storage details stay in
    /// the server log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidPayload(detail) => format!("Solicitud inválida: {detail}"),
            Self::NotFound(id) => format!("Medición {id} no encontrada"),
            Self::Write(_) => WRITE_FAILED_MESSAGE.to_string(),
            Self::Read(_) => READ_FAILED_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = StatusResponse::error(self.public_message());
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_map_to_500_without_detail() {
        let err = IngestError::Write(StoreError::Unavailable("connection refused".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), WRITE_FAILED_MESSAGE);
        assert!(!err.public_message().contains("refused"));

        let err = IngestError::Read(StoreError::Rejected("syntax".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), READ_FAILED_MESSAGE);
    }

    #[test]
    fn invalid_payload_maps_to_400_with_detail() {
        let err = IngestError::InvalidPayload("presion_pa must be a number".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.public_message().contains("presion_pa"));
    }

    #[test]
    fn not_found_names_the_id() {
        let err = IngestError::NotFound(MeasurementId::new(12));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.public_message().contains("12"));
    }

    #[test]
    fn into_response_sets_status() {
        let response = IngestError::NotFound(MeasurementId::new(1)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn status_response_serializes_wire_names() {
        let json = serde_json::to_value(StatusResponse::ok("hecho")).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "status": "ok", "mensaje": "hecho" }))
        );
    }
}

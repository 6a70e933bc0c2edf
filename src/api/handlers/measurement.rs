//! Measurement handlers: ingest, list, get.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::api::dto::{
    ListParams, MeasurementDetailResponse, MeasurementDto, MeasurementListResponse,
    MeasurementRequest,
};
use crate::app_state::AppState;
use crate::domain::MeasurementId;
use crate::error::{IngestError, StatusResponse};

/// Acknowledgment message for a stored measurement.
pub const INSERTED_MESSAGE: &str = "Datos insertados correctamente";

/// `POST /api/datos` — Store one sensor sample.
///
/// # Errors
///
/// Returns [`IngestError::InvalidPayload`] for a body that is not a JSON
/// object or holds non-numeric readings, and
/// [`IngestError::Write`] if the store fails.
#[utoipa::path(
    post,
    path = "/api/datos",
    tag = "Mediciones",
    summary = "Ingest a measurement",
    description = "Stores one sample sent by the weather station. Missing readings are stored as null; duplicates create new rows.",
    request_body = MeasurementRequest,
    responses(
        (status = 201, description = "Measurement stored", body = StatusResponse),
        (status = 400, description = "Body is not a JSON object or a reading is not numeric", body = StatusResponse),
        (status = 500, description = "Storage failure", body = StatusResponse),
    )
)]
pub async fn ingest_measurement(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, IngestError> {
    tracing::info!(payload = %body, "measurement received from station");

    let sample = MeasurementRequest::try_from(body)
        .and_then(|req| req.to_measurement())
        .inspect_err(|e| {
            tracing::warn!(error = %e, "rejected measurement payload");
        })?;
    state.measurement_service.ingest(sample).await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::ok(INSERTED_MESSAGE))))
}

/// `GET /api/datos` — Latest measurements, newest first.
///
/// # Errors
///
/// Returns [`IngestError::InvalidPayload`] for a non-integer `limite` and
/// [`IngestError::Read`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/datos",
    tag = "Mediciones",
    summary = "List measurements",
    description = "Returns the most recent measurements ordered by id, newest first.",
    params(ListParams),
    responses(
        (status = 200, description = "Measurement history", body = MeasurementListResponse),
        (status = 400, description = "`limite` is not an integer", body = StatusResponse),
        (status = 500, description = "Storage failure", body = StatusResponse),
    )
)]
pub async fn list_measurements(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, IngestError> {
    let rows = state.measurement_service.latest(params.limit()?).await?;

    Ok(Json(MeasurementListResponse {
        status: "ok".to_string(),
        mediciones: rows.into_iter().map(MeasurementDto::from).collect(),
    }))
}

/// `GET /api/datos/{id}` — A single measurement.
///
/// # Errors
///
/// Returns [`IngestError::NotFound`] for an unknown id and
/// [`IngestError::Read`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/datos/{id}",
    tag = "Mediciones",
    summary = "Get a measurement",
    params(
        ("id" = i64, Path, description = "Measurement id (id_medicion)"),
    ),
    responses(
        (status = 200, description = "Measurement found", body = MeasurementDetailResponse),
        (status = 404, description = "Unknown id", body = StatusResponse),
        (status = 500, description = "Storage failure", body = StatusResponse),
    )
)]
pub async fn get_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, IngestError> {
    let measurement = state
        .measurement_service
        .get(MeasurementId::new(id))
        .await?;

    Ok(Json(MeasurementDetailResponse {
        status: "ok".to_string(),
        medicion: measurement.into(),
    }))
}

/// Measurement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/datos", get(list_measurements).post(ingest_measurement))
        .route("/datos/{id}", get(get_measurement))
}

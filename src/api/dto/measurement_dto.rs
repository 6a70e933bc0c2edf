//! Measurement DTOs for ingestion and history queries.
//!
//! Wire names follow the station firmware and the `mediciones` columns
//! (`temperatura_k`, `humedad_relativa`, `presion_pa`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Measurement, MeasurementId, NewMeasurement};
use crate::error::IngestError;

/// Default page size for `GET /api/datos`.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Largest page size accepted by `GET /api/datos`.
pub const MAX_LIST_LIMIT: u32 = 500;

/// Request body for `POST /api/datos`.
///
/// The body must be a JSON object; readings are looked up by name only.
/// Each reading may be a JSON number, a numeric string, `null`, or
/// absent. Absent and `null` readings are stored as `NULL`.
#[derive(Debug, Clone, Default, ToSchema)]
pub struct MeasurementRequest {
    /// Temperature in kelvin.
    #[schema(value_type = Option<f64>, example = 298.15)]
    pub temperatura_k: Option<Value>,
    /// Relative humidity (fraction or percent).
    #[schema(value_type = Option<f64>, example = 0.45)]
    pub humedad_relativa: Option<Value>,
    /// Pressure in pascals.
    #[schema(value_type = Option<f64>, example = 101325)]
    pub presion_pa: Option<Value>,
}

impl TryFrom<Value> for MeasurementRequest {
    type Error = IngestError;

    /// Picks the three readings out of a JSON object. Unknown keys are
    /// ignored.
    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = body else {
            return Err(IngestError::InvalidPayload(
                "el cuerpo debe ser un objeto JSON".to_string(),
            ));
        };
        Ok(Self {
            temperatura_k: fields.remove("temperatura_k"),
            humedad_relativa: fields.remove("humedad_relativa"),
            presion_pa: fields.remove("presion_pa"),
        })
    }
}

impl MeasurementRequest {
    /// Extracts the three readings.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidPayload`] naming the first field
    /// whose value is neither a number, a numeric string nor `null`.
    pub fn to_measurement(&self) -> Result<NewMeasurement, IngestError> {
        Ok(NewMeasurement {
            temperature_k: reading("temperatura_k", self.temperatura_k.as_ref())?,
            relative_humidity: reading("humedad_relativa", self.humedad_relativa.as_ref())?,
            pressure_pa: reading("presion_pa", self.presion_pa.as_ref())?,
        })
    }
}

fn reading(field: &str, value: Option<&Value>) -> Result<Option<f64>, IngestError> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Some(_) => None,
    };
    parsed.map(Some).ok_or_else(|| {
        IngestError::InvalidPayload(format!("el campo `{field}` debe ser numérico"))
    })
}

/// One stored measurement as returned by the history endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MeasurementDto {
    /// Store-assigned identifier.
    pub id_medicion: MeasurementId,
    /// Temperature in kelvin.
    pub temperatura_k: Option<f64>,
    /// Relative humidity.
    pub humedad_relativa: Option<f64>,
    /// Pressure in pascals.
    pub presion_pa: Option<f64>,
}

impl From<Measurement> for MeasurementDto {
    fn from(m: Measurement) -> Self {
        Self {
            id_medicion: m.id,
            temperatura_k: m.temperature_k,
            humedad_relativa: m.relative_humidity,
            presion_pa: m.pressure_pa,
        }
    }
}

/// Response body for `GET /api/datos`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeasurementListResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Measurements, newest first.
    pub mediciones: Vec<MeasurementDto>,
}

/// Response body for `GET /api/datos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeasurementDetailResponse {
    /// Always `"ok"`.
    pub status: String,
    /// The requested measurement.
    pub medicion: MeasurementDto,
}

/// Query parameters for `GET /api/datos`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Maximum number of rows. Out-of-range values are clamped to 1..=500.
    /// Defaults to 50.
    #[serde(default)]
    #[param(value_type = Option<i64>, example = 50)]
    pub limite: Option<String>,
}

impl ListParams {
    /// Returns the effective limit, clamped to `1..=MAX_LIST_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidPayload`] if `limite` is not an integer.
    pub fn limit(&self) -> Result<u32, IngestError> {
        let Some(raw) = self.limite.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(DEFAULT_LIST_LIMIT);
        };
        let requested: i64 = raw.parse().map_err(|_| {
            IngestError::InvalidPayload(format!("`limite` debe ser un entero, se recibió `{raw}`"))
        })?;
        let clamped = requested.clamp(1, i64::from(MAX_LIST_LIMIT));
        Ok(u32::try_from(clamped).unwrap_or(MAX_LIST_LIMIT))
    }
}

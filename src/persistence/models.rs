//! Database row model for the `mediciones` table.

use crate::domain::{Measurement, MeasurementId};

/// Column tuple returned by the `SELECT` statements.
///
/// Order: `id_medicion`, `temperatura_k`, `humedad_relativa`, `presion_pa`.
pub type MeasurementTuple = (i64, Option<f64>, Option<f64>, Option<f64>);

/// A stored row from the `mediciones` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRow {
    /// Auto-increment row ID.
    pub id_medicion: i64,
    /// Temperature in kelvin.
    pub temperatura_k: Option<f64>,
    /// Relative humidity.
    pub humedad_relativa: Option<f64>,
    /// Pressure in pascals.
    pub presion_pa: Option<f64>,
}

impl From<MeasurementTuple> for MeasurementRow {
    fn from(
        (id_medicion, temperatura_k, humedad_relativa, presion_pa): MeasurementTuple,
    ) -> Self {
        Self {
            id_medicion,
            temperatura_k,
            humedad_relativa,
            presion_pa,
        }
    }
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Self {
            id: MeasurementId::new(row.id_medicion),
            temperature_k: row.temperatura_k,
            relative_humidity: row.humedad_relativa,
            pressure_pa: row.presion_pa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_maps_columns_in_order() {
        let row = MeasurementRow::from((5, Some(290.0), None, Some(100_000.0)));
        let measurement = Measurement::from(row);
        assert_eq!(measurement.id, MeasurementId::new(5));
        assert_eq!(measurement.temperature_k, Some(290.0));
        assert_eq!(measurement.relative_humidity, None);
        assert_eq!(measurement.pressure_pa, Some(100_000.0));
    }
}

//! Sensor measurement value types.

use serde::{Deserialize, Serialize};

use super::MeasurementId;

/// The three readings of one sample, before the store assigns an id.
///
/// Every field is optional: a reading the device did not send is stored
/// as SQL `NULL`, and the table's column constraints decide whether that
/// is acceptable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurement {
    /// Temperature in kelvin.
    pub temperature_k: Option<f64>,
    /// Relative humidity. The unit (fraction or percent) is not enforced.
    pub relative_humidity: Option<f64>,
    /// Atmospheric pressure in pascals.
    pub pressure_pa: Option<f64>,
}

impl NewMeasurement {
    /// Builds a sample with all three readings present.
    #[must_use]
    pub const fn complete(temperature_k: f64, relative_humidity: f64, pressure_pa: f64) -> Self {
        Self {
            temperature_k: Some(temperature_k),
            relative_humidity: Some(relative_humidity),
            pressure_pa: Some(pressure_pa),
        }
    }

    /// Returns the names of the readings that are absent, in column order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("temperatura_k", self.temperature_k),
            ("humedad_relativa", self.relative_humidity),
            ("presion_pa", self.pressure_pa),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.is_none().then_some(name))
        .collect()
    }

    /// Attaches the store-assigned identifier.
    #[must_use]
    pub const fn with_id(self, id: MeasurementId) -> Measurement {
        Measurement {
            id,
            temperature_k: self.temperature_k,
            relative_humidity: self.relative_humidity,
            pressure_pa: self.pressure_pa,
        }
    }
}

/// A stored measurement row.
///
/// Immutable once stored; nothing in this crate updates or deletes rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Store-assigned identifier.
    pub id: MeasurementId,
    /// Temperature in kelvin.
    pub temperature_k: Option<f64>,
    /// Relative humidity.
    pub relative_humidity: Option<f64>,
    /// Atmospheric pressure in pascals.
    pub pressure_pa: Option<f64>,
}

impl Measurement {
    /// Returns the readings without the identifier.
    #[must_use]
    pub const fn readings(&self) -> NewMeasurement {
        NewMeasurement {
            temperature_k: self.temperature_k,
            relative_humidity: self.relative_humidity,
            pressure_pa: self.pressure_pa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_sample_has_no_missing_fields() {
        let sample = NewMeasurement::complete(298.15, 0.45, 101_325.0);
        assert!(sample.missing_fields().is_empty());
    }

    #[test]
    fn missing_fields_are_reported_in_column_order() {
        let sample = NewMeasurement {
            temperature_k: None,
            relative_humidity: Some(0.5),
            pressure_pa: None,
        };
        assert_eq!(sample.missing_fields(), vec!["temperatura_k", "presion_pa"]);
    }

    #[test]
    fn with_id_keeps_readings() {
        let sample = NewMeasurement::complete(280.0, 0.9, 99_000.0);
        let stored = sample.with_id(MeasurementId::new(3));
        assert_eq!(stored.id, MeasurementId::new(3));
        assert_eq!(stored.readings(), sample);
    }
}

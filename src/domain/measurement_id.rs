//! Store-assigned measurement identifier.
//!
//! [`MeasurementId`] is a newtype over the `id_medicion` column so that row
//! identifiers cannot be confused with other integers in the API layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a stored measurement.
///
/// Generated by the store on insert (auto-increment). Unique and never
/// reused; the service never creates one itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct MeasurementId(i64);

impl MeasurementId {
    /// Wraps a raw `id_medicion` value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw column value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MeasurementId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<MeasurementId> for i64 {
    fn from(id: MeasurementId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&MeasurementId::new(42)).ok();
        assert_eq!(json.as_deref(), Some("42"));
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(MeasurementId::new(7).to_string(), "7");
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(MeasurementId::new(1) < MeasurementId::new(2));
        assert_eq!(i64::from(MeasurementId::from(9)), 9);
    }
}

//! Warehouse (depot) type.

use serde::{Deserialize, Serialize};

use crate::error::SolveError;

/// The single depot all routes start and end at.
///
/// `stock` is informational: the depot is treated as an unlimited supply
/// point, so deliveries are never constrained by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    /// Warehouse identifier.
    pub id: i64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Current aggregate stock on hand.
    pub stock: f64,
}

impl Warehouse {
    pub(crate) fn validate(&self) -> Result<(), SolveError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SolveError::invalid_input(format!(
                "warehouse {} has invalid latitude {}",
                self.id, self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SolveError::invalid_input(format!(
                "warehouse {} has invalid longitude {}",
                self.id, self.longitude
            )));
        }
        Ok(())
    }
}

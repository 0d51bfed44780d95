//! Customer type with consumption rate and inventory bounds.

use serde::{Deserialize, Serialize};

use crate::error::SolveError;

/// A customer location consuming a single aggregate commodity.
///
/// Inventory depletes by `demand_rate` units per day; a delivery tops the
/// tank back up to `max_inventory`. Identifiers are unique but not assumed
/// contiguous.
///
/// # Examples
///
/// ```
/// use stockroute::models::Customer;
///
/// let c = Customer {
///     id: 7,
///     latitude: 40.7580,
///     longitude: -73.9855,
///     demand_rate: 50.0,
///     max_inventory: 1000.0,
///     current_inventory: 80.0,
///     min_inventory: 100.0,
///     priority: 1,
/// };
/// assert!(c.current_inventory < c.min_inventory);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier (unique, possibly sparse).
    pub id: i64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Units consumed per day, non-negative.
    pub demand_rate: f64,
    /// Tank capacity: upper inventory bound.
    pub max_inventory: f64,
    /// Inventory on hand at the start of the horizon.
    pub current_inventory: f64,
    /// Reorder point: deliveries trigger at or below this level.
    pub min_inventory: f64,
    /// Higher-priority customers are served earlier.
    pub priority: i32,
}

impl Customer {
    pub(crate) fn validate(&self) -> Result<(), SolveError> {
        for (name, value) in [
            ("latitude", self.latitude),
            ("longitude", self.longitude),
            ("demand_rate", self.demand_rate),
            ("max_inventory", self.max_inventory),
            ("current_inventory", self.current_inventory),
            ("min_inventory", self.min_inventory),
        ] {
            if !value.is_finite() {
                return Err(SolveError::invalid_input(format!(
                    "customer {} has non-finite {name}",
                    self.id
                )));
            }
        }
        if self.demand_rate < 0.0 {
            return Err(SolveError::invalid_input(format!(
                "customer {} has negative demand_rate",
                self.id
            )));
        }
        if self.min_inventory < 0.0 || self.min_inventory > self.max_inventory {
            return Err(SolveError::invalid_input(format!(
                "customer {}: min_inventory must satisfy 0 <= min <= max",
                self.id
            )));
        }
        if self.current_inventory < 0.0 {
            return Err(SolveError::invalid_input(format!(
                "customer {} has negative current_inventory",
                self.id
            )));
        }
        if self.current_inventory > self.max_inventory {
            return Err(SolveError::invalid_input(format!(
                "customer {}: current_inventory exceeds max_inventory",
                self.id
            )));
        }
        Ok(())
    }
}

//! Vehicle type with capacity and cost parameters.

use serde::{Deserialize, Serialize};

use crate::error::SolveError;

/// A delivery vehicle.
///
/// `max_distance` is in kilometers; zero means unconstrained. Each vehicle
/// performs at most one route per day, and `fixed_cost` applies only to
/// routes that carry at least one stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Vehicle identifier.
    pub id: i64,
    /// Load capacity in units, strictly positive.
    pub capacity: f64,
    /// Cost per kilometer traveled.
    pub cost_per_km: f64,
    /// Cost for dispatching this vehicle at all.
    pub fixed_cost: f64,
    /// Route length limit in km; 0 disables the limit.
    pub max_distance: f64,
}

impl Vehicle {
    /// Route length limit, or `None` when unconstrained.
    pub fn distance_bound_km(&self) -> Option<f64> {
        if self.max_distance > 0.0 {
            Some(self.max_distance)
        } else {
            None
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SolveError> {
        for (name, value) in [
            ("capacity", self.capacity),
            ("cost_per_km", self.cost_per_km),
            ("fixed_cost", self.fixed_cost),
            ("max_distance", self.max_distance),
        ] {
            if !value.is_finite() {
                return Err(SolveError::invalid_input(format!(
                    "vehicle {} has non-finite {name}",
                    self.id
                )));
            }
        }
        if self.capacity <= 0.0 {
            return Err(SolveError::invalid_input(format!(
                "vehicle {} must have positive capacity",
                self.id
            )));
        }
        if self.cost_per_km < 0.0 || self.fixed_cost < 0.0 || self.max_distance < 0.0 {
            return Err(SolveError::invalid_input(format!(
                "vehicle {} has a negative cost or distance field",
                self.id
            )));
        }
        Ok(())
    }
}

//! The solve request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SolveError;

use super::{Customer, Vehicle, Warehouse};

/// An immutable problem description consumed by [`Solver`](crate::Solver).
///
/// # Examples
///
/// ```
/// use stockroute::models::{OptimizeRequest, Vehicle, Warehouse};
///
/// let request = OptimizeRequest {
///     warehouse: Warehouse { id: 1, latitude: 40.7128, longitude: -74.0060, stock: 1e6 },
///     customers: vec![],
///     vehicles: vec![Vehicle {
///         id: 1, capacity: 1000.0, cost_per_km: 1.0, fixed_cost: 50.0, max_distance: 0.0,
///     }],
///     planning_horizon: 3,
///     start_date: "2024-01-01".into(),
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// The single depot.
    pub warehouse: Warehouse,
    /// Customer population; may be empty.
    pub customers: Vec<Customer>,
    /// Vehicle fleet; must be non-empty.
    pub vehicles: Vec<Vehicle>,
    /// Number of days to plan, non-negative.
    pub planning_horizon: i64,
    /// First day of the horizon, `"YYYY-MM-DD"`.
    pub start_date: String,
}

impl OptimizeRequest {
    /// Parses `start_date`.
    pub fn start_date(&self) -> Result<NaiveDate, SolveError> {
        NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d").map_err(|_| {
            SolveError::invalid_input(format!(
                "start_date {:?} is not a valid YYYY-MM-DD date",
                self.start_date
            ))
        })
    }

    /// Checks the request against the input contract.
    ///
    /// An empty fleet is [`SolveError::EmptyFleet`]; an empty customer list
    /// is fine (the plan will simply be empty).
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.vehicles.is_empty() {
            return Err(SolveError::EmptyFleet);
        }
        if self.planning_horizon < 0 {
            return Err(SolveError::invalid_input(
                "planning_horizon must be non-negative",
            ));
        }
        self.start_date()?;
        self.warehouse.validate()?;
        for customer in &self.customers {
            customer.validate()?;
        }
        for vehicle in &self.vehicles {
            vehicle.validate()?;
        }
        Ok(())
    }
}

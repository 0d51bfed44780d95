//! The solve response: plan, routes, and stops.

use serde::{Deserialize, Serialize};

/// A single delivery within a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Customer receiving the delivery.
    pub customer_id: i64,
    /// 1-based position within the route.
    pub sequence: u32,
    /// Delivered quantity in units.
    pub quantity: f64,
    /// Simulated arrival clock time, `"HH:MM"`.
    pub arrival_time: String,
}

/// One vehicle's tour for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// 1-based day index within the horizon.
    pub day: u32,
    /// Calendar date, `"YYYY-MM-DD"`.
    pub date: String,
    /// Vehicle performing the route.
    pub vehicle_id: i64,
    /// Round-trip distance in kilometers.
    pub total_distance: f64,
    /// Fixed cost plus distance cost.
    pub total_cost: f64,
    /// Sum of stop quantities in units.
    pub total_load: f64,
    /// Ordered deliveries.
    pub stops: Vec<Stop>,
}

/// The complete plan returned by [`Solver::solve`](crate::Solver::solve).
///
/// On a fatal error `success` is false, `routes` is empty, totals are zero,
/// and `message` carries the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Whether the horizon was planned.
    pub success: bool,
    /// Human-readable summary, including fallback/skip notes.
    pub message: String,
    /// Sum of route costs.
    pub total_cost: f64,
    /// Sum of route distances in kilometers.
    pub total_distance: f64,
    /// All routes, in day order.
    pub routes: Vec<Route>,
}

impl Plan {
    /// A failed plan carrying only an explanation.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            total_cost: 0.0,
            total_distance: 0.0,
            routes: Vec::new(),
        }
    }
}

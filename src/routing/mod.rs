//! Per-day routing: problem types, the primary router, and the fallback.
//!
//! One routing day is a capacitated VRP over the depot (node 0) and that
//! day's selected customers (nodes 1..N). Everything in here works on the
//! integer solver domain: meters and grams.

mod day;
mod fallback;
mod index;
mod schedule;

pub use day::GuidedDayRouter;
pub use fallback::NearestNeighborRouter;
pub use index::LocationIndex;
pub use schedule::ArrivalSimulator;

use std::time::Instant;

use crate::distance::DistanceMatrix;

/// Upper bound on any route length, in meters.
///
/// Vehicles without an explicit limit are still bounded by this sentinel so
/// route lengths stay inside the integer domain.
pub const DISTANCE_SENTINEL_M: i64 = 300_000_000;

/// A vehicle as the day router sees it: integer capacity and bound.
#[derive(Debug, Clone)]
pub struct DayVehicle {
    /// Position of this vehicle in the request fleet.
    pub fleet_index: usize,
    /// Capacity in grams.
    pub capacity_g: i64,
    /// Route length limit in meters, if constrained.
    pub max_distance_m: Option<i64>,
}

impl DayVehicle {
    /// The effective route bound: the explicit limit or the sentinel.
    pub fn bound_m(&self) -> i64 {
        self.max_distance_m.unwrap_or(DISTANCE_SENTINEL_M)
    }
}

/// One day's routing input.
#[derive(Debug, Clone)]
pub struct DayProblem {
    /// Meter distances over {depot} ∪ selected customers.
    pub matrix: DistanceMatrix,
    /// Fill-up demand per node in grams; zero at the depot (node 0).
    pub demands_g: Vec<i64>,
    /// The fleet, in request order.
    pub vehicles: Vec<DayVehicle>,
}

impl DayProblem {
    /// Number of customer nodes (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.matrix.size().saturating_sub(1)
    }

    /// Demand at a node, in grams.
    pub fn demand_g(&self, node: usize) -> i64 {
        self.demands_g[node]
    }
}

/// One vehicle's node sequence, depot excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRoute {
    /// Index into [`DayProblem::vehicles`].
    pub vehicle: usize,
    /// Customer nodes in visit order.
    pub nodes: Vec<usize>,
}

/// A day's routing outcome in node space.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// Non-empty routes, at most one per vehicle.
    pub routes: Vec<VehicleRoute>,
    /// Customer nodes no route could take.
    pub unassigned: Vec<usize>,
}

impl Assignment {
    /// Total customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.nodes.len()).sum()
    }
}

/// The per-day solving seam.
///
/// The primary router and the fallback implement the same narrow interface
/// so the plan driver can chain them, and so alternative backends can be
/// swapped in.
pub trait DayRouting {
    /// Solves one day.
    ///
    /// Returns `None` when the router could not assign any of the selected
    /// customers; the caller is expected to try the next router in line.
    fn solve_day(&self, problem: &DayProblem, deadline: Option<Instant>) -> Option<Assignment>;
}

/// Returns `true` once the deadline has passed.
pub(crate) fn expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

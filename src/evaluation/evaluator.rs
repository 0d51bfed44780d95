//! Route evaluator over the integer day problem.

use crate::routing::{DayProblem, DayVehicle};

/// A constraint violation in a candidate route.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Route load exceeds the vehicle's capacity.
    CapacityExceeded {
        /// Load carried, in grams.
        load_g: i64,
        /// Vehicle capacity, in grams.
        capacity_g: i64,
    },
    /// Route length exceeds the vehicle's bound.
    MaxDistanceExceeded {
        /// Route length, in meters.
        meters: i64,
        /// Effective bound, in meters.
        bound_m: i64,
    },
}

/// Computes route metrics and checks capacity and distance constraints.
///
/// # Examples
///
/// ```
/// use stockroute::distance::DistanceMatrix;
/// use stockroute::evaluation::RouteEvaluator;
/// use stockroute::routing::{DayProblem, DayVehicle};
///
/// let problem = DayProblem {
///     matrix: DistanceMatrix::from_data(3, vec![0, 10, 20, 10, 0, 15, 20, 15, 0]).unwrap(),
///     demands_g: vec![0, 5_000, 7_000],
///     vehicles: vec![DayVehicle { fleet_index: 0, capacity_g: 20_000, max_distance_m: None }],
/// };
/// let eval = RouteEvaluator::new(&problem);
/// assert_eq!(eval.route_meters(&[1, 2]), 10 + 15 + 20);
/// assert_eq!(eval.route_load_g(&[1, 2]), 12_000);
/// assert!(eval.check(&problem.vehicles[0], &[1, 2]).is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a DayProblem,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator over the given day problem.
    pub fn new(problem: &'a DayProblem) -> Self {
        Self { problem }
    }

    /// Round-trip length of `depot → nodes... → depot`, in meters.
    pub fn route_meters(&self, nodes: &[usize]) -> i64 {
        let Some(&first) = nodes.first() else {
            return 0;
        };
        let matrix = &self.problem.matrix;
        let mut meters = matrix.get(0, first);
        for pair in nodes.windows(2) {
            meters += matrix.get(pair[0], pair[1]);
        }
        meters + matrix.get(nodes[nodes.len() - 1], 0)
    }

    /// Total demand carried by the route, in grams.
    pub fn route_load_g(&self, nodes: &[usize]) -> i64 {
        nodes.iter().map(|&n| self.problem.demand_g(n)).sum()
    }

    /// Checks a node sequence against a vehicle's capacity and bound.
    pub fn check(&self, vehicle: &DayVehicle, nodes: &[usize]) -> Vec<Violation> {
        let mut violations = Vec::new();

        let load_g = self.route_load_g(nodes);
        if load_g > vehicle.capacity_g {
            violations.push(Violation::CapacityExceeded {
                load_g,
                capacity_g: vehicle.capacity_g,
            });
        }

        let meters = self.route_meters(nodes);
        let bound_m = vehicle.bound_m();
        if meters > bound_m {
            violations.push(Violation::MaxDistanceExceeded { meters, bound_m });
        }

        violations
    }

    /// Returns `true` if the sequence fits the vehicle.
    pub fn fits(&self, vehicle: &DayVehicle, nodes: &[usize]) -> bool {
        self.route_load_g(nodes) <= vehicle.capacity_g
            && self.route_meters(nodes) <= vehicle.bound_m()
    }
}

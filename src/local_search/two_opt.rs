//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each segment `[i..=j]` of the route, compute the cost change from
//! reversing it:
//!
//! ```text
//! delta = c(prev_i, r[j]) + c(r[i], next_j) - c(prev_i, r[i]) - c(r[j], next_j)
//! ```
//!
//! If delta < 0 the segment is reversed, provided the route's true length
//! stays inside the vehicle's bound. First-improvement, repeated until no
//! move helps.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::evaluation::RouteEvaluator;
use crate::routing::{DayProblem, DayVehicle};

use super::ArcCost;

const DEPOT: usize = 0;

/// Applies 2-opt to a single route in place.
///
/// Move deltas come from `cost`; the distance bound is checked against true
/// meters. Returns `true` if the route changed.
pub fn two_opt_improve(
    route: &mut Vec<usize>,
    problem: &DayProblem,
    vehicle: &DayVehicle,
    cost: &dyn ArcCost,
) -> bool {
    if route.len() < 2 {
        return false;
    }

    let evaluator = RouteEvaluator::new(problem);
    let bound_m = vehicle.bound_m();
    let mut changed = false;
    let mut improved = true;

    while improved {
        improved = false;
        let n = route.len();

        for i in 0..n - 1 {
            for j in (i + 1)..n {
                if reversal_delta(route, cost, i, j) < 0 {
                    route[i..=j].reverse();
                    if evaluator.route_meters(route) <= bound_m {
                        changed = true;
                        improved = true;
                    } else {
                        route[i..=j].reverse();
                    }
                }
            }
        }
    }

    changed
}

/// Cost change from reversing `route[i..=j]`.
fn reversal_delta(route: &[usize], cost: &dyn ArcCost, i: usize, j: usize) -> i64 {
    let n = route.len();
    let prev_i = if i == 0 { DEPOT } else { route[i - 1] };
    let next_j = if j == n - 1 { DEPOT } else { route[j + 1] };

    let old = cost.arc(prev_i, route[i]) + cost.arc(route[j], next_j);
    let new = cost.arc(prev_i, route[j]) + cost.arc(route[i], next_j);
    new - old
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn line_problem() -> DayProblem {
        let m = DistanceMatrix::from_data(
            4,
            vec![
                0, 1000, 2000, 3000, //
                1000, 0, 1000, 2000, //
                2000, 1000, 0, 1000, //
                3000, 2000, 1000, 0,
            ],
        )
        .expect("square");
        DayProblem {
            matrix: m,
            demands_g: vec![0, 1000, 1000, 1000],
            vehicles: vec![DayVehicle {
                fleet_index: 0,
                capacity_g: 100_000,
                max_distance_m: None,
            }],
        }
    }

    fn square_problem() -> DayProblem {
        // Unit square, 2 km sides: depot (0,0), then (0,2), (2,2), (2,0).
        let m = DistanceMatrix::from_data(
            4,
            vec![
                0, 2000, 2828, 2000, //
                2000, 0, 2000, 2828, //
                2828, 2000, 0, 2000, //
                2000, 2828, 2000, 0,
            ],
        )
        .expect("square");
        DayProblem {
            matrix: m,
            demands_g: vec![0, 1000, 1000, 1000],
            vehicles: vec![DayVehicle {
                fleet_index: 0,
                capacity_g: 100_000,
                max_distance_m: None,
            }],
        }
    }

    #[test]
    fn test_uncrosses_route() {
        let p = square_problem();
        let mut route = vec![1, 3, 2];
        let changed = two_opt_improve(&mut route, &p, &p.vehicles[0], &p.matrix);
        assert!(changed);
        let eval = RouteEvaluator::new(&p);
        // Perimeter tour: 4 × 2000 m.
        assert_eq!(eval.route_meters(&route), 8000);
    }

    #[test]
    fn test_bound_blocks_reversal() {
        let mut p = square_problem();
        // A bound below the improved tour length (8000 m) rejects the move,
        // so the crossed tour stays as-is.
        p.vehicles[0].max_distance_m = Some(7999);
        let mut route = vec![1, 3, 2];
        let changed = two_opt_improve(&mut route, &p, &p.vehicles[0], &p.matrix);
        assert!(!changed);
        assert_eq!(route, vec![1, 3, 2]);
    }

    #[test]
    fn test_optimal_route_untouched() {
        let p = line_problem();
        let mut route = vec![1, 2, 3];
        let changed = two_opt_improve(&mut route, &p, &p.vehicles[0], &p.matrix);
        assert!(!changed);
        assert_eq!(route, vec![1, 2, 3]);
    }

    #[test]
    fn test_short_routes_noop() {
        let p = line_problem();
        let mut route = vec![2];
        assert!(!two_opt_improve(&mut route, &p, &p.vehicles[0], &p.matrix));
        let mut empty: Vec<usize> = vec![];
        assert!(!two_opt_improve(&mut empty, &p, &p.vehicles[0], &p.matrix));
    }
}

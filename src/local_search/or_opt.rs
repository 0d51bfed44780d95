//! Intra-route Or-opt improvement.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive customers to a different
//! position within the same route. For each segment the removal gain is
//!
//! ```text
//! c(prev, first) + c(last, next) - c(prev, next)
//! ```
//!
//! and the insertion cost between `p` and `q` is
//!
//! ```text
//! c(p, first) + c(last, q) - c(p, q)
//! ```
//!
//! Moves with negative net delta are applied when the route's true length
//! stays within the vehicle's bound.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::evaluation::RouteEvaluator;
use crate::routing::{DayProblem, DayVehicle};

use super::ArcCost;

const DEPOT: usize = 0;

/// Applies Or-opt segment relocation to a single route in place.
///
/// Returns `true` if the route changed.
pub fn or_opt_improve(
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

        'scan: for seg_len in 1..=3usize.min(n - 1) {
            for start in 0..=(n - seg_len) {
                for insert in 0..=(n - seg_len) {
                    if insert == start {
                        continue;
                    }
                    if segment_move_delta(route, cost, start, seg_len, insert) < 0 {
                        let candidate = moved_route(route, start, seg_len, insert);
                        if evaluator.route_meters(&candidate) <= bound_m {
                            *route = candidate;
                            changed = true;
                            improved = true;
                            break 'scan;
                        }
                    }
                }
            }
        }
    }

    changed
}

/// Net cost delta from moving `route[start..start+len]` so that it begins at
/// position `insert` in the remainder.
fn segment_move_delta(
    route: &[usize],
    cost: &dyn ArcCost,
    start: usize,
    len: usize,
    insert: usize,
) -> i64 {
    let n = route.len();
    let first = route[start];
    let last = route[start + len - 1];

    let prev = if start == 0 { DEPOT } else { route[start - 1] };
    let next = if start + len == n { DEPOT } else { route[start + len] };

    let removal_gain = cost.arc(prev, first) + cost.arc(last, next) - cost.arc(prev, next);

    // Neighbors of the insertion point in the route with the segment removed.
    let remainder_at = |pos: usize| -> usize {
        // Map a remainder index to the original route, skipping the segment.
        if pos < start {
            route[pos]
        } else {
            route[pos + len]
        }
    };
    let rem_len = n - len;
    let p = if insert == 0 { DEPOT } else { remainder_at(insert - 1) };
    let q = if insert == rem_len { DEPOT } else { remainder_at(insert) };

    let insertion_cost = cost.arc(p, first) + cost.arc(last, q) - cost.arc(p, q);

    insertion_cost - removal_gain
}

/// Builds the route with `route[start..start+len]` relocated to `insert`.
fn moved_route(route: &[usize], start: usize, len: usize, insert: usize) -> Vec<usize> {
    let segment: Vec<usize> = route[start..start + len].to_vec();
    let mut remainder: Vec<usize> = Vec::with_capacity(route.len() - len);
    remainder.extend_from_slice(&route[..start]);
    remainder.extend_from_slice(&route[start + len..]);

    let mut out = Vec::with_capacity(route.len());
    out.extend_from_slice(&remainder[..insert]);
    out.extend_from_slice(&segment);
    out.extend_from_slice(&remainder[insert..]);
    out
}

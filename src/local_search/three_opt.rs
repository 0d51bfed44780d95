//! Intra-route 3-opt improvement.
//!
//! # Algorithm
//!
//! Cuts the tour at three edges, splitting it into segments A-B-C-D (A ends
//! at the depot side, D returns to it), and evaluates the seven non-identity
//! reconnections, which include the 2-opt reversals as special cases. The
//! first improving reconnection found is applied and the scan restarts.
//!
//! # Complexity
//!
//! O(n³) per pass.
//!
//! # Reference
//!
//! Lin, S. (1965). "Computer Solutions of the Traveling Salesman Problem",
//! *Bell System Technical Journal* 44(10), 2245-2269.

use crate::evaluation::RouteEvaluator;
use crate::routing::{DayProblem, DayVehicle};

use super::ArcCost;

const DEPOT: usize = 0;

/// Applies 3-opt reconnection to a single route in place.
///
/// Returns `true` if the route changed.
pub fn three_opt_improve(
    route: &mut Vec<usize>,
    problem: &DayProblem,
    vehicle: &DayVehicle,
    cost: &dyn ArcCost,
) -> bool {
    if route.len() < 4 {
        return false;
    }

    let evaluator = RouteEvaluator::new(problem);
    let bound_m = vehicle.bound_m();
    let mut changed = false;
    let mut improved = true;

    while improved {
        improved = false;
        let n = route.len();

        'scan: for i in 0..n - 2 {
            for j in (i + 1)..n - 1 {
                for k in (j + 1)..n {
                    if let Some(candidate) = best_reconnection(route, cost, i, j, k) {
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

/// Evaluates the seven reconnection patterns for cuts after positions
/// `i`, `j`, `k` and returns the best improving candidate route, if any.
///
/// Segments: A = `[..=i]`, B = `[i+1..=j]`, C = `[j+1..=k]`, D = `[k+1..]`.
fn best_reconnection(
    route: &[usize],
    cost: &dyn ArcCost,
    i: usize,
    j: usize,
    k: usize,
) -> Option<Vec<usize>> {
    let n = route.len();
    let a_end = route[i];
    let b_start = route[i + 1];
    let b_end = route[j];
    let c_start = route[j + 1];
    let c_end = route[k];
    let d_start = if k + 1 < n { route[k + 1] } else { DEPOT };

    let old = cost.arc(a_end, b_start) + cost.arc(b_end, c_start) + cost.arc(c_end, d_start);

    // (new edge triple, reverse B, swap B/C, reverse C) per pattern.
    let patterns: [(i64, bool, bool, bool); 7] = [
        // A B C' D
        (cost.arc(a_end, b_start) + cost.arc(b_end, c_end) + cost.arc(c_start, d_start), false, false, true),
        // A B' C D
        (cost.arc(a_end, b_end) + cost.arc(b_start, c_start) + cost.arc(c_end, d_start), true, false, false),
        // A B' C' D
        (cost.arc(a_end, b_end) + cost.arc(b_start, c_end) + cost.arc(c_start, d_start), true, false, true),
        // A C B D
        (cost.arc(a_end, c_start) + cost.arc(c_end, b_start) + cost.arc(b_end, d_start), false, true, false),
        // A C B' D
        (cost.arc(a_end, c_start) + cost.arc(c_end, b_end) + cost.arc(b_start, d_start), true, true, false),
        // A C' B D
        (cost.arc(a_end, c_end) + cost.arc(c_start, b_start) + cost.arc(b_end, d_start), false, true, true),
        // A C' B' D
        (cost.arc(a_end, c_end) + cost.arc(c_start, b_end) + cost.arc(b_start, d_start), true, true, true),
    ];

    let mut best: Option<(i64, usize)> = None;
    for (idx, &(new, _, _, _)) in patterns.iter().enumerate() {
        let delta = new - old;
        if delta < 0 && best.is_none_or(|(b, _)| delta < b) {
            best = Some((delta, idx));
        }
    }
    let (_, idx) = best?;
    let (_, rev_b, swap, rev_c) = patterns[idx];

    let mut seg_b: Vec<usize> = route[i + 1..=j].to_vec();
    let mut seg_c: Vec<usize> = route[j + 1..=k].to_vec();
    if rev_b {
        seg_b.reverse();
    }
    if rev_c {
        seg_c.reverse();
    }

    let mut out = Vec::with_capacity(n);
    out.extend_from_slice(&route[..=i]);
    if swap {
        out.extend(seg_c);
        out.extend(seg_b);
    } else {
        out.extend(seg_b);
        out.extend(seg_c);
    }
    out.extend_from_slice(&route[k + 1..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn line_problem() -> DayProblem {
        let mut data = vec![0i64; 36];
        for i in 0..6 {
            for j in 0..6 {
                data[i * 6 + j] = ((i as i64) - (j as i64)).abs() * 1000;
            }
        }
        DayProblem {
            matrix: DistanceMatrix::from_data(6, data).expect("square"),
            demands_g: vec![0, 1000, 1000, 1000, 1000, 1000],
            vehicles: vec![DayVehicle {
                fleet_index: 0,
                capacity_g: 100_000,
                max_distance_m: None,
            }],
        }
    }

    #[test]
    fn test_untangles_scrambled_tour() {
        let p = line_problem();
        let eval = RouteEvaluator::new(&p);
        let mut route = vec![3, 1, 4, 2, 5];
        let before = eval.route_meters(&route);
        let changed = three_opt_improve(&mut route, &p, &p.vehicles[0], &p.matrix);
        assert!(changed);
        assert!(eval.route_meters(&route) < before);
    }

    #[test]
    fn test_sorted_tour_stable() {
        let p = line_problem();
        let mut route = vec![1, 2, 3, 4, 5];
        assert!(!three_opt_improve(&mut route, &p, &p.vehicles[0], &p.matrix));
        assert_eq!(route, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_short_route_noop() {
        let p = line_problem();
        let mut route = vec![1, 3, 2];
        assert!(!three_opt_improve(&mut route, &p, &p.vehicles[0], &p.matrix));
    }

    #[test]
    fn test_preserves_node_set() {
        let p = line_problem();
        let mut route = vec![5, 2, 4, 1, 3];
        three_opt_improve(&mut route, &p, &p.vehicles[0], &p.matrix);
        let mut sorted = route.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    }
}

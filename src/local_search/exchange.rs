//! Inter-route tail exchange (2-opt*).
//!
//! # Algorithm
//!
//! Swaps tail segments between two routes: with R1 = [a₁..aᵢ, aᵢ₊₁..] and
//! R2 = [b₁..bⱼ, bⱼ₊₁..], produce R1' = [a₁..aᵢ, bⱼ₊₁..] and
//! R2' = [b₁..bⱼ, aᵢ₊₁..]. Per route pair the best improving feasible cut is
//! applied; passes repeat until nothing improves.
//!
//! # Complexity
//!
//! O(n² × R²) per pass, where n = customers per route, R = number of routes.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational
//! Research Society* 46(12), 1433-1446.

use crate::evaluation::RouteEvaluator;
use crate::routing::{DayProblem, VehicleRoute};

use super::ArcCost;

const DEPOT: usize = 0;

/// Applies tail exchange between route pairs in place.
///
/// Returns `true` if any swap was applied.
pub fn exchange_improve(
    routes: &mut [VehicleRoute],
    problem: &DayProblem,
    cost: &dyn ArcCost,
) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut changed = false;
    let mut improved = true;

    while improved {
        improved = false;

        for r1 in 0..routes.len() {
            for r2 in (r1 + 1)..routes.len() {
                if let Some((cut1, cut2)) = find_best_exchange(&routes[r1], &routes[r2], problem, cost)
                {
                    let tail1: Vec<usize> = routes[r1].nodes[cut1..].to_vec();
                    let tail2: Vec<usize> = routes[r2].nodes[cut2..].to_vec();
                    routes[r1].nodes.truncate(cut1);
                    routes[r2].nodes.truncate(cut2);
                    routes[r1].nodes.extend(tail2);
                    routes[r2].nodes.extend(tail1);
                    changed = true;
                    improved = true;
                }
            }
        }
    }

    changed
}

/// Finds the best improving, feasible tail swap between two routes.
fn find_best_exchange(
    route1: &VehicleRoute,
    route2: &VehicleRoute,
    problem: &DayProblem,
    cost: &dyn ArcCost,
) -> Option<(usize, usize)> {
    let evaluator = RouteEvaluator::new(problem);
    let vehicle1 = &problem.vehicles[route1.vehicle];
    let vehicle2 = &problem.vehicles[route2.vehicle];
    let n1 = route1.nodes.len();
    let n2 = route2.nodes.len();

    let mut best: Option<(usize, usize, i64)> = None;

    // A cut at position c keeps [..c] and hands off [c..]; cutting at 0
    // would move a whole route, which relocation already covers.
    for cut1 in 1..=n1 {
        for cut2 in 1..=n2 {
            if cut1 == n1 && cut2 == n2 {
                continue; // both tails empty
            }

            let delta = swap_delta(&route1.nodes, &route2.nodes, cost, cut1, cut2);
            if delta >= 0 || best.is_some_and(|(_, _, b)| delta >= b) {
                continue;
            }

            let mut new1: Vec<usize> = route1.nodes[..cut1].to_vec();
            new1.extend_from_slice(&route2.nodes[cut2..]);
            let mut new2: Vec<usize> = route2.nodes[..cut2].to_vec();
            new2.extend_from_slice(&route1.nodes[cut1..]);

            if evaluator.route_load_g(&new1) <= vehicle1.capacity_g
                && evaluator.route_load_g(&new2) <= vehicle2.capacity_g
                && evaluator.route_meters(&new1) <= vehicle1.bound_m()
                && evaluator.route_meters(&new2) <= vehicle2.bound_m()
            {
                best = Some((cut1, cut2, delta));
            }
        }
    }

    best.map(|(c1, c2, _)| (c1, c2))
}

/// Cost change from swapping the tails at `cut1` / `cut2`.
fn swap_delta(
    nodes1: &[usize],
    nodes2: &[usize],
    cost: &dyn ArcCost,
    cut1: usize,
    cut2: usize,
) -> i64 {
    let end1 = nodes1[cut1 - 1];
    let end2 = nodes2[cut2 - 1];
    let head1 = if cut1 < nodes1.len() { nodes1[cut1] } else { DEPOT };
    let head2 = if cut2 < nodes2.len() { nodes2[cut2] } else { DEPOT };

    let old = cost.arc(end1, head1) + cost.arc(end2, head2);
    let new = cost.arc(end1, head2) + cost.arc(end2, head1);
    new - old
}

//! Inter-route customer relocation.
//!
//! # Algorithm
//!
//! Tries moving each customer to the best insertion position in another
//! route. Each pass picks the single best improving, feasible move and
//! applies it; passes repeat until none is found. Feasibility requires the
//! receiving vehicle's capacity and both vehicles' true-meter bounds.
//!
//! # Complexity
//!
//! O(n² × R) per pass where n = customers per route, R = number of routes.

use crate::evaluation::RouteEvaluator;
use crate::routing::{DayProblem, VehicleRoute};

use super::ArcCost;

const DEPOT: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Move {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: i64,
}

/// Applies inter-route relocation to a set of routes in place.
///
/// Routes emptied by relocation are retained with zero nodes; callers drop
/// them at extraction. Returns `true` if anything moved.
pub fn relocate_improve(
    routes: &mut [VehicleRoute],
    problem: &DayProblem,
    cost: &dyn ArcCost,
) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut changed = false;
    while let Some(mv) = find_best_relocate(routes, problem, cost) {
        let node = routes[mv.from_route].nodes.remove(mv.from_pos);
        routes[mv.to_route].nodes.insert(mv.to_pos, node);
        changed = true;
    }
    changed
}

fn find_best_relocate(
    routes: &[VehicleRoute],
    problem: &DayProblem,
    cost: &dyn ArcCost,
) -> Option<Move> {
    let evaluator = RouteEvaluator::new(problem);
    let mut best: Option<Move> = None;

    for (fr, from) in routes.iter().enumerate() {
        let from_vehicle = &problem.vehicles[from.vehicle];
        for pos in 0..from.nodes.len() {
            let node = from.nodes[pos];
            let removal_gain = removal_delta(&from.nodes, cost, pos);

            for (tr, to) in routes.iter().enumerate() {
                if tr == fr {
                    continue;
                }
                let to_vehicle = &problem.vehicles[to.vehicle];
                if evaluator.route_load_g(&to.nodes) + problem.demand_g(node)
                    > to_vehicle.capacity_g
                {
                    continue;
                }

                for insert in 0..=to.nodes.len() {
                    let delta = insertion_delta(&to.nodes, cost, node, insert) - removal_gain;
                    if delta >= 0 || best.is_some_and(|b| delta >= b.delta) {
                        continue;
                    }

                    // True-meter feasibility for both affected routes.
                    let mut shrunk = from.nodes.clone();
                    shrunk.remove(pos);
                    let mut grown = to.nodes.clone();
                    grown.insert(insert, node);
                    if evaluator.route_meters(&shrunk) <= from_vehicle.bound_m()
                        && evaluator.route_meters(&grown) <= to_vehicle.bound_m()
                    {
                        best = Some(Move {
                            from_route: fr,
                            from_pos: pos,
                            to_route: tr,
                            to_pos: insert,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Cost saved by removing the node at `pos`.
fn removal_delta(nodes: &[usize], cost: &dyn ArcCost, pos: usize) -> i64 {
    let n = nodes.len();
    let prev = if pos == 0 { DEPOT } else { nodes[pos - 1] };
    let next = if pos == n - 1 { DEPOT } else { nodes[pos + 1] };
    cost.arc(prev, nodes[pos]) + cost.arc(nodes[pos], next) - cost.arc(prev, next)
}

/// Cost added by inserting `node` at `insert`.
fn insertion_delta(nodes: &[usize], cost: &dyn ArcCost, node: usize, insert: usize) -> i64 {
    let n = nodes.len();
    let p = if insert == 0 { DEPOT } else { nodes[insert - 1] };
    let q = if insert == n { DEPOT } else { nodes[insert] };
    cost.arc(p, node) + cost.arc(node, q) - cost.arc(p, q)
}

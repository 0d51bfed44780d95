//! Parallel cheapest-arc construction.
//!
//! # Algorithm
//!
//! All vehicle routes grow together. Each step scans every (open route,
//! unvisited customer) pair and commits the globally cheapest arc whose
//! extension keeps the route inside capacity and inside its distance bound
//! including the return leg to the depot. Construction stops when no pair
//! is feasible; whatever remains is left unassigned.
//!
//! Ties resolve by vehicle order, then node order, so the result is
//! deterministic for identical inputs.
//!
//! # Complexity
//!
//! O(n² × V) where n = customers, V = vehicles.

use crate::evaluation::RouteEvaluator;
use crate::routing::{Assignment, DayProblem, VehicleRoute};

/// Builds a day assignment by greedy cheapest-arc extension.
///
/// Every vehicle gets at most one route. Customers whose fill-up quantity
/// or distance fits no vehicle end up in `unassigned`.
///
/// # Examples
///
/// ```
/// use stockroute::constructive::cheapest_arc;
/// use stockroute::distance::DistanceMatrix;
/// use stockroute::routing::{DayProblem, DayVehicle};
///
/// let problem = DayProblem {
///     matrix: DistanceMatrix::from_data(3, vec![0, 10, 20, 10, 0, 15, 20, 15, 0]).unwrap(),
///     demands_g: vec![0, 5_000, 5_000],
///     vehicles: vec![DayVehicle { fleet_index: 0, capacity_g: 10_000, max_distance_m: None }],
/// };
/// let assignment = cheapest_arc(&problem);
/// assert_eq!(assignment.num_served(), 2);
/// assert!(assignment.unassigned.is_empty());
/// ```
pub fn cheapest_arc(problem: &DayProblem) -> Assignment {
    let n = problem.matrix.size();
    let evaluator = RouteEvaluator::new(problem);

    let mut visited = vec![false; n];
    if n > 0 {
        visited[0] = true; // depot
    }

    // One open route per vehicle: (nodes, load so far, meters so far, head).
    struct Open {
        nodes: Vec<usize>,
        load_g: i64,
        meters: i64,
        head: usize,
    }
    let mut open: Vec<Open> = problem
        .vehicles
        .iter()
        .map(|_| Open {
            nodes: Vec::new(),
            load_g: 0,
            meters: 0,
            head: 0,
        })
        .collect();

    loop {
        let mut best: Option<(i64, usize, usize)> = None; // (arc, vehicle, node)

        for (v, route) in open.iter().enumerate() {
            let vehicle = &problem.vehicles[v];
            for node in 1..n {
                if visited[node] {
                    continue;
                }
                if route.load_g + problem.demand_g(node) > vehicle.capacity_g {
                    continue;
                }
                let arc = problem.matrix.get(route.head, node);
                let with_return = route.meters + arc + problem.matrix.get(node, 0);
                if with_return > vehicle.bound_m() {
                    continue;
                }
                if best.is_none_or(|(b, _, _)| arc < b) {
                    best = Some((arc, v, node));
                }
            }
        }

        match best {
            Some((arc, v, node)) => {
                visited[node] = true;
                let route = &mut open[v];
                route.nodes.push(node);
                route.load_g += problem.demand_g(node);
                route.meters += arc;
                route.head = node;
            }
            None => break,
        }
    }

    let mut assignment = Assignment::default();
    for (v, route) in open.into_iter().enumerate() {
        if !route.nodes.is_empty() {
            debug_assert!(evaluator.fits(&problem.vehicles[v], &route.nodes));
            assignment.routes.push(VehicleRoute {
                vehicle: v,
                nodes: route.nodes,
            });
        }
    }
    for node in 1..n {
        if !visited[node] {
            assignment.unassigned.push(node);
        }
    }
    assignment
}

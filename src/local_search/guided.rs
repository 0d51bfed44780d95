//! Guided local search over a day assignment.
//!
//! # Algorithm
//!
//! Classic guided local search: drive the neighborhood operators to a local
//! optimum under a penalty-augmented arc cost
//!
//! ```text
//! c'(i, j) = c(i, j) + λ · penalty(i, j)
//! ```
//!
//! then raise the penalty of the used arcs with the highest utility
//! `c(i, j) / (1 + penalty(i, j))` and repeat. The augmented cost steers the
//! operators away from arcs that keep appearing in local optima; the best
//! solution is always tracked under the *true* objective
//!
//! ```text
//! Σ route-meters + span_coefficient · longest-route-meters
//! ```
//!
//! so penalties never distort what is reported. On prolonged stagnation a
//! seeded double-bridge kick perturbs the largest route; the fixed seed
//! keeps runs reproducible for identical inputs and iteration counts.
//!
//! The wall-clock deadline is the only stopping criterion.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::routing::{expired, Assignment, DayProblem, VehicleRoute};

use super::{
    exchange_improve, or_opt_improve, relocate_improve, three_opt_improve, two_opt_improve,
    ArcCost,
};

/// Scale factor between the mean used-arc cost and λ.
const LAMBDA_FACTOR: f64 = 0.1;

/// Penalization rounds without a new best before the kick fires.
const KICK_PATIENCE: u32 = 8;

/// Fixed seed for the perturbation RNG.
const KICK_SEED: u64 = 0xD05EED;

/// Arc cost augmented with feature penalties.
struct PenalizedCost<'a> {
    matrix: &'a DistanceMatrix,
    penalties: &'a [u32],
    lambda: i64,
    size: usize,
}

impl ArcCost for PenalizedCost<'_> {
    fn arc(&self, from: usize, to: usize) -> i64 {
        self.matrix.get(from, to)
            + self.lambda * self.penalties[arc_key(self.size, from, to)] as i64
    }
}

/// Unordered arc index: the matrix is symmetric, so penalties are too.
fn arc_key(size: usize, a: usize, b: usize) -> usize {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    lo * size + hi
}

/// Improves an assignment under guided local search until the deadline.
///
/// The unassigned set is untouched: improvement reorders served customers,
/// it never adds or drops them.
pub fn guided_improve(
    problem: &DayProblem,
    initial: Assignment,
    deadline: Instant,
    span_cost_coefficient: i64,
) -> Assignment {
    if initial.routes.iter().map(|r| r.nodes.len()).sum::<usize>() <= 1 {
        // A single stop has no neighborhood to search.
        return initial;
    }

    let evaluator = RouteEvaluator::new(problem);
    let size = problem.matrix.size();

    let mut current = initial.routes.clone();
    let mut best = current.clone();
    let mut best_obj = objective(&evaluator, &best, span_cost_coefficient);

    let mut penalties = vec![0u32; size * size];
    let mut lambda: i64 = 0;
    let mut rng = StdRng::seed_from_u64(KICK_SEED);
    let mut stagnation: u32 = 0;

    while !expired(Some(deadline)) {
        {
            let cost = PenalizedCost {
                matrix: &problem.matrix,
                penalties: &penalties,
                lambda,
                size,
            };
            sweep(&mut current, problem, &cost, deadline);
        }

        let obj = objective(&evaluator, &current, span_cost_coefficient);
        if obj < best_obj {
            best_obj = obj;
            best = current.clone();
            stagnation = 0;
        } else {
            stagnation += 1;
        }

        if lambda == 0 {
            lambda = initial_lambda(&evaluator, &current);
        }

        penalize_worst_arcs(problem, &current, &mut penalties, size);

        if stagnation >= KICK_PATIENCE {
            double_bridge_kick(&mut current, problem, &mut rng);
            stagnation = 0;
        }
    }

    best.retain(|r| !r.nodes.is_empty());
    Assignment {
        routes: best,
        unassigned: initial.unassigned,
    }
}

/// True objective: total meters plus the span bias on the longest route.
fn objective(evaluator: &RouteEvaluator<'_>, routes: &[VehicleRoute], span_coefficient: i64) -> i64 {
    let mut total = 0;
    let mut longest = 0;
    for route in routes {
        let meters = evaluator.route_meters(&route.nodes);
        total += meters;
        longest = longest.max(meters);
    }
    total + span_coefficient * longest
}

/// Runs all operators to a joint local optimum under `cost`.
fn sweep(
    routes: &mut Vec<VehicleRoute>,
    problem: &DayProblem,
    cost: &dyn ArcCost,
    deadline: Instant,
) {
    loop {
        let mut improved = false;

        for route in routes.iter_mut() {
            if expired(Some(deadline)) {
                return;
            }
            let vehicle = &problem.vehicles[route.vehicle];
            improved |= two_opt_improve(&mut route.nodes, problem, vehicle, cost);
            improved |= or_opt_improve(&mut route.nodes, problem, vehicle, cost);
            improved |= three_opt_improve(&mut route.nodes, problem, vehicle, cost);
        }

        if expired(Some(deadline)) {
            return;
        }
        improved |= relocate_improve(routes, problem, cost);
        improved |= exchange_improve(routes, problem, cost);

        if !improved || expired(Some(deadline)) {
            return;
        }
    }
}

/// λ sized from the mean used-arc cost of the first local optimum.
fn initial_lambda(evaluator: &RouteEvaluator<'_>, routes: &[VehicleRoute]) -> i64 {
    let arcs: i64 = routes
        .iter()
        .filter(|r| !r.nodes.is_empty())
        .map(|r| r.nodes.len() as i64 + 1)
        .sum();
    if arcs == 0 {
        return 1;
    }
    let meters: i64 = routes.iter().map(|r| evaluator.route_meters(&r.nodes)).sum();
    (((LAMBDA_FACTOR * meters as f64) / arcs as f64).round() as i64).max(1)
}

/// Raises the penalty of every used arc with maximal utility.
fn penalize_worst_arcs(
    problem: &DayProblem,
    routes: &[VehicleRoute],
    penalties: &mut [u32],
    size: usize,
) {
    let mut max_utility = 0.0f64;
    let mut worst: Vec<usize> = Vec::new();

    for route in routes {
        for (from, to) in route_arcs(&route.nodes) {
            let key = arc_key(size, from, to);
            let utility = problem.matrix.get(from, to) as f64 / (1.0 + penalties[key] as f64);
            if utility > max_utility {
                max_utility = utility;
                worst.clear();
                worst.push(key);
            } else if utility == max_utility && !worst.contains(&key) {
                worst.push(key);
            }
        }
    }

    for key in worst {
        penalties[key] += 1;
    }
}

/// Arcs of a route including both depot legs.
fn route_arcs(nodes: &[usize]) -> Vec<(usize, usize)> {
    let Some(&first) = nodes.first() else {
        return Vec::new();
    };
    let mut arcs = Vec::with_capacity(nodes.len() + 1);
    arcs.push((0, first));
    for pair in nodes.windows(2) {
        arcs.push((pair[0], pair[1]));
    }
    arcs.push((nodes[nodes.len() - 1], 0));
    arcs
}

/// Double-bridge perturbation of the largest route.
///
/// Capacity is unaffected (same node set); the move is reverted if it pushes
/// the route over its distance bound.
fn double_bridge_kick(routes: &mut [VehicleRoute], problem: &DayProblem, rng: &mut StdRng) {
    let Some(target) = routes
        .iter_mut()
        .filter(|r| r.nodes.len() >= 4)
        .max_by_key(|r| r.nodes.len())
    else {
        return;
    };

    let n = target.nodes.len();
    let mut cuts = [
        rng.random_range(1..n),
        rng.random_range(1..n),
        rng.random_range(1..n),
    ];
    cuts.sort_unstable();
    let [p1, p2, p3] = cuts;
    if p1 == p2 || p2 == p3 {
        return;
    }

    let mut kicked = Vec::with_capacity(n);
    kicked.extend_from_slice(&target.nodes[..p1]);
    kicked.extend_from_slice(&target.nodes[p2..p3]);
    kicked.extend_from_slice(&target.nodes[p1..p2]);
    kicked.extend_from_slice(&target.nodes[p3..]);

    let evaluator = RouteEvaluator::new(problem);
    let bound = problem.vehicles[target.vehicle].bound_m();
    if evaluator.route_meters(&kicked) <= bound {
        target.nodes = kicked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::distance::DistanceMatrix;
    use crate::routing::DayVehicle;

    fn line_problem(n: usize) -> DayProblem {
        let mut data = vec![0i64; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = ((i as i64) - (j as i64)).abs() * 1000;
            }
        }
        DayProblem {
            matrix: DistanceMatrix::from_data(n, data).expect("square"),
            demands_g: vec![1000; n],
            vehicles: vec![DayVehicle {
                fleet_index: 0,
                capacity_g: 1_000_000,
                max_distance_m: None,
            }],
        }
    }

    fn scrambled(problem: &DayProblem) -> Assignment {
        Assignment {
            routes: vec![VehicleRoute {
                vehicle: 0,
                nodes: (1..problem.matrix.size()).rev().collect::<Vec<_>>(),
            }],
            unassigned: vec![],
        }
    }

    #[test]
    fn test_never_worse_than_initial() {
        let mut p = line_problem(7);
        p.demands_g[0] = 0;
        let initial = scrambled(&p);
        let evaluator = RouteEvaluator::new(&p);
        let before = objective(&evaluator, &initial.routes, 100);
        let deadline = Instant::now() + Duration::from_millis(50);
        let improved = guided_improve(&p, initial, deadline, 100);
        let after = objective(&evaluator, &improved.routes, 100);
        assert!(after <= before);
    }

    #[test]
    fn test_preserves_served_set() {
        let mut p = line_problem(7);
        p.demands_g[0] = 0;
        let initial = scrambled(&p);
        let deadline = Instant::now() + Duration::from_millis(50);
        let improved = guided_improve(&p, initial, deadline, 100);
        let mut served: Vec<usize> = improved
            .routes
            .iter()
            .flat_map(|r| r.nodes.iter().copied())
            .collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3, 4, 5, 6]);
        assert!(improved.unassigned.is_empty());
    }

    #[test]
    fn test_arc_key_symmetric() {
        assert_eq!(arc_key(10, 2, 7), arc_key(10, 7, 2));
        assert_ne!(arc_key(10, 1, 2), arc_key(10, 1, 3));
    }

    #[test]
    fn test_route_arcs() {
        assert_eq!(route_arcs(&[3, 1]), vec![(0, 3), (3, 1), (1, 0)]);
        assert!(route_arcs(&[]).is_empty());
    }

    #[test]
    fn test_objective_includes_span() {
        let p = line_problem(4);
        let evaluator = RouteEvaluator::new(&p);
        let routes = vec![VehicleRoute { vehicle: 0, nodes: vec![1, 2, 3] }];
        // Route meters: 1000 + 1000 + 1000 + 3000 = 6000.
        assert_eq!(objective(&evaluator, &routes, 0), 6000);
        assert_eq!(objective(&evaluator, &routes, 100), 6000 + 100 * 6000);
    }
}

//! Sequential nearest-neighbor construction.
//!
//! # Algorithm
//!
//! Vehicles are taken one at a time in fleet order. Each starts at the
//! depot and repeatedly visits the nearest unvisited customer whose demand
//! still fits the remaining capacity, until nothing fits, then the next
//! vehicle starts. Customers left over after the last vehicle stay
//! unassigned.
//!
//! This is the fallback construction: it enforces capacity only. Per-vehicle
//! distance bounds are deliberately ignored so that a delivery still happens
//! when the bounded primary search finds nothing.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use crate::routing::{Assignment, DayProblem, VehicleRoute};

/// Builds a day assignment with the nearest-neighbor heuristic.
///
/// Deterministic: distance ties resolve to the lowest node index.
///
/// # Examples
///
/// ```
/// use stockroute::constructive::nearest_neighbor;
/// use stockroute::distance::DistanceMatrix;
/// use stockroute::routing::{DayProblem, DayVehicle};
///
/// let problem = DayProblem {
///     matrix: DistanceMatrix::from_data(3, vec![0, 10, 20, 10, 0, 15, 20, 15, 0]).unwrap(),
///     demands_g: vec![0, 5_000, 5_000],
///     vehicles: vec![DayVehicle { fleet_index: 0, capacity_g: 10_000, max_distance_m: None }],
/// };
/// let assignment = nearest_neighbor(&problem);
/// assert_eq!(assignment.num_served(), 2);
/// ```
pub fn nearest_neighbor(problem: &DayProblem) -> Assignment {
    let n = problem.matrix.size();
    let mut visited = vec![false; n];
    if n > 0 {
        visited[0] = true; // depot
    }

    let mut assignment = Assignment::default();

    for (v, vehicle) in problem.vehicles.iter().enumerate() {
        let mut current = 0usize;
        let mut remaining_g = vehicle.capacity_g;
        let mut nodes = Vec::new();

        loop {
            // Snapshot of the customers that still fit; selection happens
            // against this list, mutation happens after.
            let fitting: Vec<usize> = (1..n)
                .filter(|&c| !visited[c] && problem.demand_g(c) <= remaining_g)
                .collect();

            let Some(next) = problem.matrix.nearest(current, &fitting) else {
                break;
            };

            visited[next] = true;
            remaining_g -= problem.demand_g(next);
            nodes.push(next);
            current = next;
        }

        if !nodes.is_empty() {
            assignment.routes.push(VehicleRoute { vehicle: v, nodes });
        }

        if visited.iter().skip(1).all(|&seen| seen) {
            break;
        }
    }

    for node in 1..n {
        if !visited[node] {
            assignment.unassigned.push(node);
        }
    }
    assignment
}

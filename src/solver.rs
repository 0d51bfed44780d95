//! The rolling-horizon plan driver.

use chrono::Days;
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::inventory::InventoryProjector;
use crate::models::{OptimizeRequest, Plan, Route, Stop};
use crate::routing::{
    ArrivalSimulator, Assignment, DayProblem, DayRouting, DayVehicle, GuidedDayRouter,
    LocationIndex, NearestNeighborRouter, VehicleRoute,
};
use crate::units;

/// The inventory routing solver.
///
/// One [`solve`](Solver::solve) call plans the whole horizon: each day it
/// projects inventories, selects the customers about to run out, routes a
/// capacitated VRP over them, applies the deliveries, and consumes one day
/// of demand. Days are strictly sequential; each day's state depends on the
/// previous day's deliveries.
///
/// A solver instance holds no per-problem state, but the routing search is
/// not meant to be shared across threads; concurrent solves should each use
/// their own instance.
///
/// # Examples
///
/// ```
/// use stockroute::models::{OptimizeRequest, Vehicle, Warehouse};
/// use stockroute::{Solver, SolverConfig};
///
/// let request = OptimizeRequest {
///     warehouse: Warehouse { id: 1, latitude: 40.7128, longitude: -74.0060, stock: 1e6 },
///     customers: vec![],
///     vehicles: vec![Vehicle {
///         id: 1, capacity: 1000.0, cost_per_km: 1.0, fixed_cost: 50.0, max_distance: 0.0,
///     }],
///     planning_horizon: 3,
///     start_date: "2024-01-01".into(),
/// };
/// let plan = Solver::new(SolverConfig::default()).solve(&request);
/// assert!(plan.success);
/// assert!(plan.routes.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Plans the horizon, folding fatal errors into a failure plan.
    ///
    /// The returned plan always carries a message; on failure `routes` is
    /// empty and both totals are zero.
    pub fn solve(&self, request: &OptimizeRequest) -> Plan {
        match self.try_solve(request) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(error = %err, "solve failed");
                Plan::failure(err.to_string())
            }
        }
    }

    /// Plans the horizon, surfacing fatal errors as [`SolveError`].
    pub fn try_solve(&self, request: &OptimizeRequest) -> Result<Plan, SolveError> {
        request.validate()?;
        let start_date = request.start_date()?;

        let fleet = self.convert_fleet(request)?;
        let primary = GuidedDayRouter::new(
            self.config.day_time_limit(),
            self.config.span_cost_coefficient(),
        );
        let fallback = NearestNeighborRouter;
        let simulator = ArrivalSimulator::new(&self.config);

        let mut projector =
            InventoryProjector::new(&request.customers, self.config.lookahead_days());

        let mut routes = Vec::new();
        let mut total_cost = 0.0;
        let mut total_distance = 0.0;
        let mut fallback_days = 0u32;
        let mut deferred_visits = 0usize;

        for day in 1..=request.planning_horizon {
            let date = start_date
                .checked_add_days(Days::new((day - 1) as u64))
                .ok_or_else(|| SolveError::invalid_input("planning horizon leaves the calendar"))?;

            let selected = projector.candidates_for_day(&request.customers);
            if selected.is_empty() {
                debug!(day, "no customers need delivery");
                projector.consume_daily(&request.customers);
                continue;
            }

            let ids: Vec<i64> = selected.iter().map(|c| c.id).collect();
            let index = LocationIndex::new(&ids);

            let mut points = Vec::with_capacity(selected.len() + 1);
            points.push((request.warehouse.latitude, request.warehouse.longitude));
            points.extend(selected.iter().map(|c| (c.latitude, c.longitude)));
            let matrix = DistanceMatrix::from_points(&points)?;

            let mut quantities = vec![0.0f64];
            let mut demands_g = vec![0i64];
            for customer in &selected {
                let quantity = projector.delivery_quantity(customer);
                demands_g.push(units::grams_from_units(quantity)?);
                quantities.push(quantity);
            }

            let problem = DayProblem {
                matrix,
                demands_g,
                vehicles: fleet.clone(),
            };

            let mut used_fallback = false;
            let assignment = primary
                .solve_day(&problem, None)
                .or_else(|| {
                    warn!(day, "primary routing found no solution, trying fallback");
                    used_fallback = true;
                    fallback.solve_day(&problem, None)
                })
                .unwrap_or_else(|| Assignment {
                    routes: Vec::new(),
                    unassigned: (1..problem.matrix.size()).collect(),
                });

            if used_fallback && assignment.num_served() > 0 {
                fallback_days += 1;
            }
            deferred_visits += assignment.unassigned.len();

            let extractor = RouteExtractor {
                request,
                problem: &problem,
                index: &index,
                quantities: &quantities,
                simulator: &simulator,
                day: day as u32,
                date: date.format("%Y-%m-%d").to_string(),
            };
            for vehicle_route in &assignment.routes {
                if vehicle_route.nodes.is_empty() {
                    continue;
                }
                let route = extractor.extract(vehicle_route, &mut projector);
                total_cost += route.total_cost;
                total_distance += route.total_distance;
                routes.push(route);
            }

            debug!(
                day,
                routes = assignment.routes.len(),
                deferred = assignment.unassigned.len(),
                "day planned"
            );
            projector.consume_daily(&request.customers);
        }

        let mut message = format!(
            "planned {} routes over {} days",
            routes.len(),
            request.planning_horizon
        );
        if fallback_days > 0 {
            message.push_str(&format!(
                "; fallback routing used on {fallback_days} day(s)"
            ));
        }
        if deferred_visits > 0 {
            message.push_str(&format!("; {deferred_visits} customer visit(s) deferred"));
        }

        info!(
            routes = routes.len(),
            total_distance, total_cost, "plan complete"
        );

        Ok(Plan {
            success: true,
            message,
            total_cost,
            total_distance,
            routes,
        })
    }

    /// Scales the fleet into the integer solver domain.
    fn convert_fleet(&self, request: &OptimizeRequest) -> Result<Vec<DayVehicle>, SolveError> {
        request
            .vehicles
            .iter()
            .enumerate()
            .map(|(fleet_index, vehicle)| {
                Ok(DayVehicle {
                    fleet_index,
                    capacity_g: units::grams_from_units(vehicle.capacity)?,
                    max_distance_m: vehicle
                        .distance_bound_km()
                        .map(units::meters_from_km)
                        .transpose()?,
                })
            })
            .collect()
    }
}

/// Turns node-space routes into plan routes, applying their deliveries.
struct RouteExtractor<'a> {
    request: &'a OptimizeRequest,
    problem: &'a DayProblem,
    index: &'a LocationIndex,
    quantities: &'a [f64],
    simulator: &'a ArrivalSimulator,
    day: u32,
    date: String,
}

impl RouteExtractor<'_> {
    fn extract(&self, vehicle_route: &VehicleRoute, projector: &mut InventoryProjector) -> Route {
        let day_vehicle = &self.problem.vehicles[vehicle_route.vehicle];
        let vehicle = &self.request.vehicles[day_vehicle.fleet_index];
        let nodes = &vehicle_route.nodes;

        let mut legs_km = Vec::with_capacity(nodes.len());
        let mut meters = 0i64;
        let mut previous = 0usize;
        for &node in nodes {
            let arc = self.problem.matrix.get(previous, node);
            legs_km.push(units::km_from_meters(arc));
            meters += arc;
            previous = node;
        }
        meters += self.problem.matrix.get(previous, 0);

        let km = units::km_from_meters(meters);
        let arrival_times = self.simulator.times(&legs_km);

        let mut stops = Vec::with_capacity(nodes.len());
        let mut total_load = 0.0;
        for (position, (&node, arrival_time)) in nodes.iter().zip(arrival_times).enumerate() {
            let customer_id = self
                .index
                .customer_at(node)
                .expect("route nodes map back to selected customers");
            let quantity = self.quantities[node];
            total_load += quantity;
            projector.apply_delivery(customer_id, quantity);
            stops.push(Stop {
                customer_id,
                sequence: (position + 1) as u32,
                quantity,
                arrival_time,
            });
        }

        Route {
            day: self.day,
            date: self.date.clone(),
            vehicle_id: vehicle.id,
            total_distance: km,
            total_cost: vehicle.fixed_cost + km * vehicle.cost_per_km,
            total_load,
            stops,
        }
    }
}

//! End-to-end planning scenarios with literal inputs.

use std::time::Duration;

use stockroute::distance::distance_km;
use stockroute::inventory::InventoryProjector;
use stockroute::models::{Customer, OptimizeRequest, Vehicle, Warehouse};
use stockroute::{Solver, SolverConfig};

fn nyc_warehouse() -> Warehouse {
    Warehouse {
        id: 1,
        latitude: 40.7128,
        longitude: -74.0060,
        stock: 1_000_000.0,
    }
}

fn vehicle(id: i64, capacity: f64, max_distance: f64) -> Vehicle {
    Vehicle {
        id,
        capacity,
        cost_per_km: 1.0,
        fixed_cost: 100.0,
        max_distance,
    }
}

/// Construction-only solver: reproducible and fast.
fn solver() -> Solver {
    Solver::new(SolverConfig::default().with_day_time_limit(Duration::ZERO))
}

#[test]
fn empty_customers_yield_empty_successful_plan() {
    let request = OptimizeRequest {
        warehouse: nyc_warehouse(),
        customers: vec![],
        vehicles: vec![vehicle(1, 1000.0, 0.0)],
        planning_horizon: 3,
        start_date: "2024-01-01".into(),
    };
    let plan = solver().solve(&request);
    assert!(plan.success);
    assert!(plan.routes.is_empty());
    assert_eq!(plan.total_cost, 0.0);
    assert_eq!(plan.total_distance, 0.0);
}

#[test]
fn single_customer_single_day() {
    let request = OptimizeRequest {
        warehouse: nyc_warehouse(),
        customers: vec![Customer {
            id: 1,
            latitude: 40.7580,
            longitude: -73.9855,
            demand_rate: 50.0,
            max_inventory: 1000.0,
            current_inventory: 80.0,
            min_inventory: 100.0,
            priority: 1,
        }],
        vehicles: vec![vehicle(1, 5000.0, 0.0)],
        planning_horizon: 1,
        start_date: "2024-01-01".into(),
    };
    let plan = solver().solve(&request);
    assert!(plan.success);
    assert_eq!(plan.routes.len(), 1);

    let route = &plan.routes[0];
    assert_eq!(route.day, 1);
    assert_eq!(route.date, "2024-01-01");
    assert_eq!(route.stops.len(), 1);

    let stop = &route.stops[0];
    assert_eq!(stop.customer_id, 1);
    assert_eq!(stop.sequence, 1);
    assert_eq!(stop.quantity, 920.0); // fill-up: 1000 - 80

    // ~5.3 km out at 50 km/h from an 08:00 start.
    assert_eq!(stop.arrival_time, "08:06");

    let one_way = distance_km(40.7128, -74.0060, 40.7580, -73.9855);
    assert!((route.total_distance - 2.0 * one_way).abs() < 0.01);
    assert!((route.total_cost - (100.0 + route.total_distance)).abs() < 1e-9);
}

#[test]
fn capacity_defers_second_customer_to_next_day() {
    let fill_up_customer = |id: i64, lat: f64| Customer {
        id,
        latitude: lat,
        longitude: -74.0060,
        demand_rate: 50.0,
        max_inventory: 1000.0,
        current_inventory: 200.0,
        min_inventory: 300.0,
        priority: 1,
    };
    let request = OptimizeRequest {
        warehouse: nyc_warehouse(),
        customers: vec![
            fill_up_customer(1, 40.7500),
            fill_up_customer(2, 40.7600),
        ],
        vehicles: vec![vehicle(1, 1000.0, 0.0)],
        planning_horizon: 2,
        start_date: "2024-01-01".into(),
    };
    let plan = solver().solve(&request);
    assert!(plan.success);

    // Day 1: both need 800 units, the single vehicle fits only one.
    let day1: Vec<_> = plan.routes.iter().filter(|r| r.day == 1).collect();
    assert_eq!(day1.len(), 1);
    assert!(day1[0].total_load <= 1000.0 + 1e-6);
    assert_eq!(day1[0].stops.len(), 1);
    assert!(plan.message.contains("deferred"));

    // Day 2: the deferred customer is selected again and served.
    let day2: Vec<_> = plan.routes.iter().filter(|r| r.day == 2).collect();
    assert_eq!(day2.len(), 1);
    let served_day1 = day1[0].stops[0].customer_id;
    let served_day2 = day2[0].stops[0].customer_id;
    assert_ne!(served_day1, served_day2);
}

#[test]
fn fallback_serves_when_distance_bound_defeats_primary() {
    let request = OptimizeRequest {
        warehouse: nyc_warehouse(),
        customers: vec![Customer {
            id: 1,
            latitude: 42.0, // ~143 km north: round trip far beyond the bound
            longitude: -74.0060,
            demand_rate: 50.0,
            max_inventory: 1000.0,
            current_inventory: 200.0,
            min_inventory: 300.0,
            priority: 1,
        }],
        vehicles: vec![vehicle(1, 1000.0, 10.0)],
        planning_horizon: 1,
        start_date: "2024-01-01".into(),
    };
    let plan = Solver::new(
        SolverConfig::default().with_day_time_limit(Duration::from_secs(1)),
    )
    .solve(&request);

    assert!(plan.success);
    assert_eq!(plan.routes.len(), 1);
    assert!(plan.message.contains("fallback"));
    // Capacity still holds even though the distance bound was waived.
    assert!(plan.routes[0].total_load <= 1000.0 + 1e-6);
}

#[test]
fn multi_day_trigger_timing() {
    let request = OptimizeRequest {
        warehouse: nyc_warehouse(),
        customers: vec![Customer {
            id: 1,
            latitude: 40.7580,
            longitude: -73.9855,
            demand_rate: 100.0,
            max_inventory: 1000.0,
            current_inventory: 500.0,
            min_inventory: 100.0,
            priority: 1,
        }],
        vehicles: vec![vehicle(1, 5000.0, 0.0)],
        planning_horizon: 7,
        start_date: "2024-01-01".into(),
    };
    let plan = solver().solve(&request);
    assert!(plan.success);

    // Cover above the reorder point: 4 days, then 3, then 2 — selected on
    // day 3, filled to the brim, and untouched for the rest of the horizon.
    assert_eq!(plan.routes.len(), 1);
    let route = &plan.routes[0];
    assert_eq!(route.day, 3);
    assert_eq!(route.date, "2024-01-03");
    assert_eq!(route.stops[0].quantity, 700.0);
}

#[test]
fn priority_orders_candidates() {
    let customer = |id: i64, priority: i32| Customer {
        id,
        latitude: 40.75,
        longitude: -74.0,
        demand_rate: 50.0,
        max_inventory: 1000.0,
        current_inventory: 0.0,
        min_inventory: 100.0,
        priority,
    };
    let customers = vec![customer(101, 3), customer(102, 1), customer(103, 2)];
    let projector = InventoryProjector::new(&customers, 2.0);
    let order: Vec<i64> = projector
        .candidates_for_day(&customers)
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(order, vec![101, 103, 102]);
}

#[test]
fn identical_requests_plan_identically() {
    let request = OptimizeRequest {
        warehouse: nyc_warehouse(),
        customers: (1..=5)
            .map(|id| Customer {
                id,
                latitude: 40.70 + id as f64 * 0.01,
                longitude: -74.00 - id as f64 * 0.008,
                demand_rate: 40.0,
                max_inventory: 600.0,
                current_inventory: 90.0,
                min_inventory: 100.0,
                priority: (id % 3) as i32,
            })
            .collect(),
        vehicles: vec![vehicle(1, 1500.0, 0.0), vehicle(2, 1500.0, 0.0)],
        planning_horizon: 4,
        start_date: "2024-06-01".into(),
    };
    let a = solver().solve(&request);
    let b = solver().solve(&request);
    assert_eq!(a, b);
}

#[test]
fn request_and_plan_wire_shape() {
    let json = r#"{
        "warehouse": {"id": 1, "latitude": 40.7128, "longitude": -74.0060, "stock": 9000.0},
        "customers": [{
            "id": 7, "latitude": 40.7580, "longitude": -73.9855,
            "demand_rate": 50.0, "max_inventory": 1000.0,
            "current_inventory": 80.0, "min_inventory": 100.0, "priority": 1
        }],
        "vehicles": [{
            "id": 3, "capacity": 5000.0, "cost_per_km": 1.5,
            "fixed_cost": 100.0, "max_distance": 0.0
        }],
        "planning_horizon": 1,
        "start_date": "2024-01-01"
    }"#;
    let request: OptimizeRequest = serde_json::from_str(json).expect("parses");
    assert_eq!(request.customers[0].id, 7);

    let plan = solver().solve(&request);
    let value = serde_json::to_value(&plan).expect("serializes");
    assert_eq!(value["success"], serde_json::json!(true));
    assert_eq!(value["routes"][0]["vehicle_id"], serde_json::json!(3));
    assert_eq!(value["routes"][0]["stops"][0]["customer_id"], serde_json::json!(7));
    assert!(value["routes"][0]["stops"][0]["arrival_time"].is_string());
}

//! Domain model types for inventory routing.
//!
//! The request side carries the warehouse, the customer population with
//! per-day consumption and inventory bounds, and the vehicle fleet. The
//! response side is a day-by-day plan of routes and stops.

mod customer;
mod plan;
mod request;
mod vehicle;
mod warehouse;

pub use customer::Customer;
pub use plan::{Plan, Route, Stop};
pub use request::OptimizeRequest;
pub use vehicle::Vehicle;
pub use warehouse::Warehouse;

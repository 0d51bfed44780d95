//! Route metrics and constraint checking.

mod evaluator;

pub use evaluator::{RouteEvaluator, Violation};

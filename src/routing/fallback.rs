//! The fallback router.

use std::time::Instant;

use tracing::warn;

use crate::constructive::nearest_neighbor;

use super::{Assignment, DayProblem, DayRouting};

/// Nearest-neighbor guard used when the primary router finds nothing.
///
/// Always produces a valid (possibly incomplete) assignment: capacity is
/// respected, per-vehicle distance bounds are not. Delivering something
/// beats delivering nothing once the primary search has already failed.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighborRouter;

impl DayRouting for NearestNeighborRouter {
    fn solve_day(&self, problem: &DayProblem, _deadline: Option<Instant>) -> Option<Assignment> {
        if problem.num_customers() == 0 {
            return Some(Assignment::default());
        }

        let assignment = nearest_neighbor(problem);
        if assignment.num_served() == 0 {
            warn!(
                customers = problem.num_customers(),
                "fallback could not place any customer"
            );
            return None;
        }
        Some(assignment)
    }
}

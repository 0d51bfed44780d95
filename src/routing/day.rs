//! The primary per-day router.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::constructive::cheapest_arc;
use crate::local_search::guided;

use super::{Assignment, DayProblem, DayRouting};

/// Cheapest-arc construction followed by guided local search.
///
/// The construction phase is deterministic. With a nonzero time limit the
/// improvement phase runs until the wall-clock deadline, so the amount of
/// improvement — though not feasibility — depends on machine speed; with a
/// zero limit the construction solution is returned untouched and the output
/// is fully reproducible.
#[derive(Debug, Clone)]
pub struct GuidedDayRouter {
    time_limit: Duration,
    span_cost_coefficient: i64,
}

impl GuidedDayRouter {
    /// Creates a router with the given improvement budget and span bias.
    pub fn new(time_limit: Duration, span_cost_coefficient: i64) -> Self {
        Self {
            time_limit,
            span_cost_coefficient,
        }
    }
}

impl DayRouting for GuidedDayRouter {
    fn solve_day(&self, problem: &DayProblem, deadline: Option<Instant>) -> Option<Assignment> {
        if problem.num_customers() == 0 {
            return Some(Assignment::default());
        }

        let initial = cheapest_arc(problem);
        if initial.num_served() == 0 {
            // Nothing fit any vehicle under its bounds; hand off to the
            // fallback.
            return None;
        }

        if self.time_limit.is_zero() {
            return Some(initial);
        }

        let now = Instant::now();
        let day_deadline = now + self.time_limit;
        let deadline = match deadline {
            Some(outer) => outer.min(day_deadline),
            None => day_deadline,
        };

        let improved = guided::guided_improve(problem, initial, deadline, self.span_cost_coefficient);
        debug!(
            served = improved.num_served(),
            unassigned = improved.unassigned.len(),
            "day routing improved"
        );
        Some(improved)
    }
}

//! Local search operators for improving day assignments.
//!
//! - [`two_opt_improve()`] — intra-route 2-opt edge reversal
//! - [`three_opt_improve()`] — intra-route 3-opt reconnection
//! - [`or_opt_improve()`] — intra-route segment relocation
//! - [`relocate_improve()`] — inter-route customer relocation
//! - [`exchange_improve()`] — inter-route tail exchange (2-opt*)
//! - [`guided`] — guided-local-search metaheuristic driving all of the above
//!
//! Operators evaluate move deltas against an [`ArcCost`] view, which is
//! either the raw meter matrix or the penalty-augmented cost the guided
//! search uses. Feasibility (capacity, per-vehicle distance bound) is always
//! checked against true meters, so a penalized view can never push a route
//! over its real limits.

pub mod guided;

mod exchange;
mod or_opt;
mod relocate;
mod three_opt;
mod two_opt;

pub use exchange::exchange_improve;
pub use or_opt::or_opt_improve;
pub use relocate::relocate_improve;
pub use three_opt::three_opt_improve;
pub use two_opt::two_opt_improve;

use crate::distance::DistanceMatrix;

/// An arc-cost view used for move evaluation.
pub trait ArcCost {
    /// Cost of traveling the arc `from → to`.
    fn arc(&self, from: usize, to: usize) -> i64;
}

impl ArcCost for DistanceMatrix {
    fn arc(&self, from: usize, to: usize) -> i64 {
        self.get(from, to)
    }
}

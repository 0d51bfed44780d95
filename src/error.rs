//! Error taxonomy for the solve boundary.

use thiserror::Error;

/// Fatal errors surfaced to the caller of [`Solver::try_solve`](crate::Solver::try_solve).
///
/// Recoverable conditions (an unsolvable day, an unserved customer) are not
/// errors: they are folded into the returned plan and noted in its message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The request failed validation (malformed date, negative horizon,
    /// inconsistent inventory bounds, non-positive vehicle capacity, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request carries no vehicles at all.
    #[error("no vehicles available for routing")]
    EmptyFleet,

    /// A distance or demand would not fit the solver's integer domain
    /// after scaling.
    #[error("numeric overflow: {value} {unit} exceeds the solver's integer range")]
    NumericOverflow {
        /// Offending value, in caller units.
        value: f64,
        /// Unit of the offending value ("km" or "units").
        unit: &'static str,
    },
}

impl SolveError {
    /// Shorthand for an [`SolveError::InvalidInput`] with a formatted message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

//! Bounded integer conversions between caller units and solver units.
//!
//! The per-day routing search works on integers only: distances in meters,
//! quantities in grams. All scaling goes through this module so the rounding
//! policy is uniform and overflow is caught once, up front.
//!
//! Scaled magnitudes must fit the 32-bit range the search arithmetic assumes;
//! anything larger is rejected as [`SolveError::NumericOverflow`].

use crate::error::SolveError;

/// Largest scaled magnitude accepted by the conversions.
pub const MAX_SCALED: i64 = i32::MAX as i64;

/// Converts kilometers to whole meters.
///
/// # Examples
///
/// ```
/// use stockroute::units::meters_from_km;
///
/// assert_eq!(meters_from_km(1.2345).unwrap(), 1235);
/// assert!(meters_from_km(f64::NAN).is_err());
/// ```
pub fn meters_from_km(km: f64) -> Result<i64, SolveError> {
    scale(km, "km")
}

/// Converts inventory units to whole grams.
pub fn grams_from_units(units: f64) -> Result<i64, SolveError> {
    scale(units, "units")
}

/// Reads an integer meter count back as kilometers.
pub fn km_from_meters(meters: i64) -> f64 {
    meters as f64 / 1000.0
}

fn scale(value: f64, unit: &'static str) -> Result<i64, SolveError> {
    if !value.is_finite() {
        return Err(SolveError::NumericOverflow { value, unit });
    }
    let scaled = (value * 1000.0).round();
    if scaled.abs() > MAX_SCALED as f64 {
        return Err(SolveError::NumericOverflow { value, unit });
    }
    Ok(scaled as i64)
}

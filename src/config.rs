//! Solver policy configuration.

use std::time::Duration;

use chrono::NaiveTime;

/// Tunable policy constants for a [`Solver`](crate::Solver).
///
/// Defaults match the production policy: a two-day replenishment lookahead,
/// a 30-second routing budget per day, and an arrival-time simulation that
/// departs the depot at 08:00, travels at 50 km/h, and spends 15 minutes at
/// each stop.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stockroute::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_lookahead_days(3.0)
///     .with_day_time_limit(Duration::from_secs(5));
/// assert_eq!(config.lookahead_days(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    lookahead_days: f64,
    day_time_limit: Duration,
    avg_speed_kmh: f64,
    service_time: Duration,
    day_start: NaiveTime,
    span_cost_coefficient: i64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lookahead_days: 2.0,
            day_time_limit: Duration::from_secs(30),
            avg_speed_kmh: 50.0,
            service_time: Duration::from_secs(15 * 60),
            day_start: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
            span_cost_coefficient: 100,
        }
    }
}

impl SolverConfig {
    /// Sets the trigger window for customer selection, in days of cover.
    pub fn with_lookahead_days(mut self, days: f64) -> Self {
        self.lookahead_days = days;
        self
    }

    /// Sets the wall-clock budget for one day's routing search.
    ///
    /// A zero budget disables the improvement phase entirely: the
    /// construction solution is returned as-is, which also makes the output
    /// independent of machine speed.
    pub fn with_day_time_limit(mut self, limit: Duration) -> Self {
        self.day_time_limit = limit;
        self
    }

    /// Sets the average travel speed used for arrival-time simulation.
    pub fn with_avg_speed_kmh(mut self, kmh: f64) -> Self {
        self.avg_speed_kmh = kmh;
        self
    }

    /// Sets the per-stop service time used for arrival-time simulation.
    pub fn with_service_time(mut self, service: Duration) -> Self {
        self.service_time = service;
        self
    }

    /// Sets the depot departure time.
    pub fn with_day_start(mut self, start: NaiveTime) -> Self {
        self.day_start = start;
        self
    }

    /// Sets the depot departure time from an `"HH:MM"` string.
    ///
    /// Returns `None` if the string does not parse.
    pub fn with_day_start_hhmm(self, hhmm: &str) -> Option<Self> {
        let start = NaiveTime::parse_from_str(hhmm, "%H:%M").ok()?;
        Some(self.with_day_start(start))
    }

    /// Sets the balance bias applied to the longest route's length.
    pub fn with_span_cost_coefficient(mut self, coefficient: i64) -> Self {
        self.span_cost_coefficient = coefficient;
        self
    }

    /// Trigger window for customer selection, in days of cover.
    pub fn lookahead_days(&self) -> f64 {
        self.lookahead_days
    }

    /// Wall-clock budget for one day's routing search.
    pub fn day_time_limit(&self) -> Duration {
        self.day_time_limit
    }

    /// Average travel speed for arrival-time simulation.
    pub fn avg_speed_kmh(&self) -> f64 {
        self.avg_speed_kmh
    }

    /// Per-stop service time for arrival-time simulation.
    pub fn service_time(&self) -> Duration {
        self.service_time
    }

    /// Depot departure time.
    pub fn day_start(&self) -> NaiveTime {
        self.day_start
    }

    /// Balance bias applied to the longest route's length.
    pub fn span_cost_coefficient(&self) -> i64 {
        self.span_cost_coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.lookahead_days(), 2.0);
        assert_eq!(c.day_time_limit(), Duration::from_secs(30));
        assert_eq!(c.avg_speed_kmh(), 50.0);
        assert_eq!(c.service_time(), Duration::from_secs(900));
        assert_eq!(
            c.day_start(),
            NaiveTime::from_hms_opt(8, 0, 0).expect("valid")
        );
        assert_eq!(c.span_cost_coefficient(), 100);
    }

    #[test]
    fn test_builder() {
        let c = SolverConfig::default()
            .with_lookahead_days(1.5)
            .with_day_time_limit(Duration::ZERO)
            .with_avg_speed_kmh(60.0)
            .with_service_time(Duration::from_secs(600))
            .with_span_cost_coefficient(0);
        assert_eq!(c.lookahead_days(), 1.5);
        assert_eq!(c.day_time_limit(), Duration::ZERO);
        assert_eq!(c.avg_speed_kmh(), 60.0);
        assert_eq!(c.service_time(), Duration::from_secs(600));
        assert_eq!(c.span_cost_coefficient(), 0);
    }

    #[test]
    fn test_day_start_hhmm() {
        let c = SolverConfig::default()
            .with_day_start_hhmm("06:30")
            .expect("valid");
        assert_eq!(
            c.day_start(),
            NaiveTime::from_hms_opt(6, 30, 0).expect("valid")
        );
        assert!(SolverConfig::default().with_day_start_hhmm("25:99").is_none());
        assert!(SolverConfig::default().with_day_start_hhmm("morning").is_none());
    }
}

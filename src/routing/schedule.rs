//! Arrival-time simulation along a route.

use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveTime};

use crate::config::SolverConfig;

/// Simulates a vehicle leaving the depot at the configured start time,
/// traveling at a constant average speed, and spending the configured
/// service time at each stop.
///
/// Clock times wrap at midnight, which only matters for pathologically long
/// routes; a normal service day stays well inside it.
///
/// # Examples
///
/// ```
/// use stockroute::routing::ArrivalSimulator;
/// use stockroute::SolverConfig;
///
/// // 08:00 start, 50 km/h, 15 min service: 5 km out → arrival 08:06.
/// let sim = ArrivalSimulator::new(&SolverConfig::default());
/// assert_eq!(sim.times(&[5.0]), vec!["08:06".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct ArrivalSimulator {
    start: NaiveTime,
    speed_kmh: f64,
    service: StdDuration,
}

impl ArrivalSimulator {
    /// Builds a simulator from the solver configuration.
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            start: config.day_start(),
            speed_kmh: config.avg_speed_kmh(),
            service: config.service_time(),
        }
    }

    /// Formats arrival clock times for a route given its leg lengths in km.
    ///
    /// `legs_km[i]` is the distance driven into stop `i` (from the depot for
    /// the first stop, from the previous stop otherwise). The return leg is
    /// not an argument: nothing arrives anywhere on it.
    pub fn times(&self, legs_km: &[f64]) -> Vec<String> {
        let service = Duration::seconds(self.service.as_secs() as i64);
        let mut clock = self.start;
        let mut out = Vec::with_capacity(legs_km.len());

        for &leg in legs_km {
            let travel_secs = if self.speed_kmh > 0.0 {
                (leg / self.speed_kmh * 3600.0).round() as i64
            } else {
                0
            };
            clock = clock + Duration::seconds(travel_secs);
            out.push(clock.format("%H:%M").to_string());
            clock = clock + service;
        }

        out
    }
}

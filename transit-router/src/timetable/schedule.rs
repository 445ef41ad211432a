//! Trip times exposed to the search as a [`TripSchedule`].

use std::sync::Arc;

use crate::domain::{TripPattern, TripSchedule};

use super::{TripId, TripTimes, TripTimesError};

/// A published trip: its pattern plus one version of its times.
///
/// Both halves are shared; cloning a `ScheduledTrip` is cheap.
#[derive(Debug, Clone)]
pub struct ScheduledTrip {
    pattern: Arc<TripPattern>,
    times: Arc<TripTimes>,
}

impl ScheduledTrip {
    /// Pair a pattern with trip times. Both must have the same number of
    /// stops.
    pub fn new(pattern: Arc<TripPattern>, times: Arc<TripTimes>) -> Result<Self, TripTimesError> {
        if pattern.number_of_stops() != times.num_stops() {
            return Err(TripTimesError::PatternMismatch {
                trip: times.trip_id().clone(),
                pattern_stops: pattern.number_of_stops(),
                trip_stops: times.num_stops(),
            });
        }
        Ok(Self { pattern, times })
    }

    pub fn trip_id(&self) -> &TripId {
        self.times.trip_id()
    }

    pub fn times(&self) -> &Arc<TripTimes> {
        &self.times
    }

    pub fn pattern_arc(&self) -> &Arc<TripPattern> {
        &self.pattern
    }

    /// Same pattern, different times. Used when publishing an update.
    pub(crate) fn with_times(&self, times: Arc<TripTimes>) -> Self {
        Self {
            pattern: Arc::clone(&self.pattern),
            times,
        }
    }
}

impl TripSchedule for ScheduledTrip {
    fn pattern(&self) -> &TripPattern {
        &self.pattern
    }

    fn arrival(&self, stop_pos: usize) -> i32 {
        self.times.arrival(stop_pos)
    }

    fn departure(&self, stop_pos: usize) -> i32 {
        self.times.departure(stop_pos)
    }
}

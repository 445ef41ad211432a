//! Timetable error types.
//!
//! Mutations of trip times and snapshot updates report failures through
//! these enums. Reads never fail.

use super::TripId;

/// Which timing rule a trip violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Departure before arrival at the same stop.
    NegativeDwell,
    /// Arrival before the departure from the previous stop.
    NegativeRunning,
}

/// First stop at which a trip's times stop increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeViolation {
    pub stop: usize,
    pub kind: ViolationKind,
}

impl std::fmt::Display for TimeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ViolationKind::NegativeDwell => {
                write!(f, "negative dwell time at stop {}", self.stop)
            }
            ViolationKind::NegativeRunning => {
                write!(f, "negative running time arriving at stop {}", self.stop)
            }
        }
    }
}

/// Errors from building or mutating trip times.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripTimesError {
    /// A trip needs at least one stop time
    #[error("trip {0} has no stop times")]
    Empty(TripId),

    /// Stop position past the end of the trip
    #[error("stop {stop} out of range for trip with {num_stops} stops")]
    StopOutOfRange { stop: usize, num_stops: usize },

    /// Cancellation is terminal
    #[error("trip {0} is canceled")]
    Canceled(TripId),

    /// Time shifting only applies to trips without realtime data
    #[error("trip {0} has realtime data and cannot be time-shifted")]
    HasRealtimeData(TripId),

    /// The trip's times are not increasing
    #[error("trip {trip}: {violation}")]
    NotIncreasing {
        trip: TripId,
        violation: TimeViolation,
    },

    /// Pattern and trip times disagree on the number of stops
    #[error("pattern has {pattern_stops} stops but trip {trip} has {trip_stops}")]
    PatternMismatch {
        trip: TripId,
        pattern_stops: usize,
        trip_stops: usize,
    },
}

/// Errors from updating a timetable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("unknown trip {0}")]
    UnknownTrip(TripId),

    #[error("trip {0} already exists")]
    DuplicateTrip(TripId),

    /// The update itself failed; the previous version is kept
    #[error("update of trip {trip} failed: {source}")]
    Update {
        trip: TripId,
        #[source]
        source: TripTimesError,
    },

    /// The updated times failed validation; the previous version is kept
    #[error("update of trip {trip} rejected: {violation}")]
    Rejected {
        trip: TripId,
        violation: TimeViolation,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let trip = TripId::new("T1");

        let err = TripTimesError::Empty(trip.clone());
        assert_eq!(err.to_string(), "trip T1 has no stop times");

        let err = TripTimesError::StopOutOfRange {
            stop: 4,
            num_stops: 3,
        };
        assert_eq!(err.to_string(), "stop 4 out of range for trip with 3 stops");

        let err = TripTimesError::Canceled(trip.clone());
        assert_eq!(err.to_string(), "trip T1 is canceled");

        let err = TripTimesError::HasRealtimeData(trip.clone());
        assert_eq!(
            err.to_string(),
            "trip T1 has realtime data and cannot be time-shifted"
        );

        let violation = TimeViolation {
            stop: 2,
            kind: ViolationKind::NegativeRunning,
        };
        let err = TripTimesError::NotIncreasing {
            trip: trip.clone(),
            violation,
        };
        assert_eq!(
            err.to_string(),
            "trip T1: negative running time arriving at stop 2"
        );

        let err = TripTimesError::PatternMismatch {
            trip: trip.clone(),
            pattern_stops: 3,
            trip_stops: 2,
        };
        assert_eq!(err.to_string(), "pattern has 3 stops but trip T1 has 2");

        let err = SnapshotError::Rejected {
            trip: trip.clone(),
            violation: TimeViolation {
                stop: 0,
                kind: ViolationKind::NegativeDwell,
            },
        };
        assert_eq!(
            err.to_string(),
            "update of trip T1 rejected: negative dwell time at stop 0"
        );

        let err = SnapshotError::Update {
            trip: trip.clone(),
            source: TripTimesError::Canceled(trip.clone()),
        };
        assert_eq!(
            err.to_string(),
            "update of trip T1 failed: trip T1 is canceled"
        );

        assert_eq!(
            SnapshotError::UnknownTrip(trip.clone()).to_string(),
            "unknown trip T1"
        );
        assert_eq!(
            SnapshotError::DuplicateTrip(trip).to_string(),
            "trip T1 already exists"
        );
    }
}

//! Scheduled trip times, their realtime overlay, and snapshot publication.
//!
//! The search reads trip times through [`ScheduledTrip`] values taken from
//! one [`TimetableSnapshot`]. Realtime updates are applied to copies and
//! published as a new snapshot by [`TimetableSnapshotSource`].

mod dedup;
mod error;
mod overlay;
mod schedule;
mod snapshot;
mod trip;
mod trip_times;

pub use dedup::Deduplicator;
pub use error::{SnapshotError, TimeViolation, TripTimesError, ViolationKind};
pub use schedule::ScheduledTrip;
pub use snapshot::{SnapshotBuilder, TimetableSnapshot, TimetableSnapshotSource};
pub use trip::{BookingInfo, PickDrop, StopTime, Trip, TripId};
pub use trip_times::{RealTimeState, SemanticHash, TripTimes};

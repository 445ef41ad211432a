//! Immutable timetable snapshots and their copy-on-write publication.
//!
//! Readers take an `Arc<TimetableSnapshot>` and keep it for the length of a
//! request. A single writer assembles the next version with a
//! [`SnapshotBuilder`] and publishes it atomically; readers holding the
//! previous version are unaffected.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::domain::TripPattern;

use super::{ScheduledTrip, SnapshotError, TripId, TripTimes, TripTimesError};

/// One published version of the timetable.
#[derive(Debug, Clone, Default)]
pub struct TimetableSnapshot {
    version: u64,
    trips: HashMap<TripId, ScheduledTrip>,
}

impl TimetableSnapshot {
    /// Version number, incremented on every publish. The empty initial
    /// snapshot is version 0.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn trip(&self, id: &TripId) -> Option<&ScheduledTrip> {
        self.trips.get(id)
    }

    pub fn trip_times(&self, id: &TripId) -> Option<&Arc<TripTimes>> {
        self.trips.get(id).map(ScheduledTrip::times)
    }

    pub fn trips(&self) -> impl Iterator<Item = &ScheduledTrip> {
        self.trips.values()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Holder of the current snapshot.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use transit_router::domain::{StopIndex, TransitMode, TripPattern};
/// use transit_router::timetable::{
///     Deduplicator, StopTime, TimetableSnapshotSource, Trip, TripId, TripTimes,
/// };
///
/// let pattern = Arc::new(TripPattern::new(
///     TransitMode::Bus,
///     "L1",
///     vec![StopIndex(1), StopIndex(2)],
/// ));
/// let stop_times = [StopTime::new(0, 0, 1), StopTime::new(600, 600, 2)];
/// let times = TripTimes::new(Arc::new(Trip::new("T1")), &stop_times, &mut Deduplicator::new())
///     .unwrap();
///
/// let source = TimetableSnapshotSource::new();
/// let mut builder = source.begin_update();
/// builder.add_trip(pattern, times).unwrap();
/// builder.publish();
///
/// let before = source.snapshot();
/// let mut builder = source.begin_update();
/// builder
///     .update_trip(&TripId::new("T1"), |t| {
///         t.update_arrival_delay(1, 60)?;
///         t.update_departure_delay(1, 60)
///     })
///     .unwrap();
/// builder.publish();
///
/// let id = TripId::new("T1");
/// assert_eq!(before.trip_times(&id).unwrap().arrival(1), 600);
/// assert_eq!(source.snapshot().trip_times(&id).unwrap().arrival(1), 660);
/// ```
#[derive(Debug, Default)]
pub struct TimetableSnapshotSource {
    current: RwLock<Arc<TimetableSnapshot>>,
    writer: Mutex<()>,
}

impl TimetableSnapshotSource {
    /// Source holding an empty version-0 snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<TimetableSnapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Start assembling the next version from the current one.
    ///
    /// Blocks while another builder is alive.
    pub fn begin_update(&self) -> SnapshotBuilder<'_> {
        let guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let base = self.snapshot();
        SnapshotBuilder {
            source: self,
            _writer: guard,
            base_version: base.version,
            trips: base.trips.clone(),
            applied: 0,
            rejected: 0,
        }
    }
}

/// Writer-side working copy of the next snapshot.
///
/// Dropping a builder without publishing discards its changes.
#[derive(Debug)]
pub struct SnapshotBuilder<'a> {
    source: &'a TimetableSnapshotSource,
    _writer: MutexGuard<'a, ()>,
    base_version: u64,
    trips: HashMap<TripId, ScheduledTrip>,
    applied: usize,
    rejected: usize,
}

impl SnapshotBuilder<'_> {
    /// Add a new trip. Its times must be increasing.
    pub fn add_trip(
        &mut self,
        pattern: Arc<TripPattern>,
        times: TripTimes,
    ) -> Result<(), SnapshotError> {
        let id = times.trip_id().clone();
        if self.trips.contains_key(&id) {
            return Err(SnapshotError::DuplicateTrip(id));
        }
        if let Some(violation) = times.first_non_increasing() {
            warn!(trip = %id, stop = violation.stop, "rejecting new trip: {violation}");
            self.rejected += 1;
            return Err(SnapshotError::Rejected { trip: id, violation });
        }
        let trip = ScheduledTrip::new(pattern, Arc::new(times)).map_err(|source| {
            SnapshotError::Update {
                trip: id.clone(),
                source,
            }
        })?;
        self.trips.insert(id, trip);
        self.applied += 1;
        Ok(())
    }

    /// Apply `update` to a copy of the trip's current times.
    ///
    /// The copy replaces the current version only if `update` succeeds and
    /// the resulting times are increasing; otherwise the previous version
    /// is kept and an error returned.
    pub fn update_trip<F>(&mut self, id: &TripId, update: F) -> Result<(), SnapshotError>
    where
        F: FnOnce(&mut TripTimes) -> Result<(), TripTimesError>,
    {
        let current = self
            .trips
            .get(id)
            .ok_or_else(|| SnapshotError::UnknownTrip(id.clone()))?;

        let mut times = TripTimes::clone(current.times());
        if let Err(source) = update(&mut times) {
            warn!(trip = %id, error = %source, "realtime update failed");
            self.rejected += 1;
            return Err(SnapshotError::Update {
                trip: id.clone(),
                source,
            });
        }
        if let Some(violation) = times.first_non_increasing() {
            warn!(trip = %id, stop = violation.stop, "rejecting realtime update: {violation}");
            self.rejected += 1;
            return Err(SnapshotError::Rejected {
                trip: id.clone(),
                violation,
            });
        }

        let next = current.with_times(Arc::new(times));
        self.trips.insert(id.clone(), next);
        self.applied += 1;
        Ok(())
    }

    /// Cancel a trip.
    pub fn cancel_trip(&mut self, id: &TripId) -> Result<(), SnapshotError> {
        self.update_trip(id, |times| {
            times.cancel();
            Ok(())
        })
    }

    /// Number of changes accepted so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Number of changes rejected so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Publish the working copy as the next version and return it.
    pub fn publish(self) -> Arc<TimetableSnapshot> {
        let snapshot = Arc::new(TimetableSnapshot {
            version: self.base_version + 1,
            trips: self.trips,
        });
        debug!(
            version = snapshot.version,
            trips = snapshot.len(),
            applied = self.applied,
            rejected = self.rejected,
            "published timetable snapshot"
        );
        let mut current = self
            .source
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&snapshot);
        snapshot
    }
}

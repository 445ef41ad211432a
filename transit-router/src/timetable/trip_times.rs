//! Scheduled and realtime times of a single trip.
//!
//! A [`TripTimes`] owns a shared, immutable baseline (zero-based times plus
//! a per-trip shift) and, once realtime data arrives, an owned overlay that
//! replaces the baseline for every read. Published instances live behind an
//! `Arc`; updates clone the instance, mutate the clone and publish it.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{error, trace};

use super::overlay::RealtimeOverlay;
use super::{
    BookingInfo, Deduplicator, PickDrop, StopTime, TimeViolation, Trip, TripId, TripTimesError,
    ViolationKind,
};

/// Realtime status of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RealTimeState {
    /// No realtime data received.
    #[default]
    Scheduled,
    /// At least one per-stop value has been overridden.
    Updated,
    /// The whole trip is canceled. Terminal.
    Canceled,
}

/// Stable fingerprint of a trip's scheduled hop times.
///
/// Two trips with the same scheduled departure/arrival pair on every hop
/// have the same hash, regardless of realtime data.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemanticHash([u8; 32]);

impl SemanticHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for SemanticHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for SemanticHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SemanticHash({self})")
    }
}

/// Times of one trip at each stop of its pattern.
///
/// Stops are addressed by position in the pattern (0-based).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use transit_router::timetable::{Deduplicator, StopTime, Trip, TripTimes};
///
/// let stop_times = [StopTime::new(36_000, 36_060, 1), StopTime::new(36_600, 36_600, 2)];
/// let mut dedup = Deduplicator::new();
/// let mut times = TripTimes::new(Arc::new(Trip::new("T1")), &stop_times, &mut dedup).unwrap();
///
/// times.update_arrival_delay(1, 120).unwrap();
/// assert_eq!(times.arrival(1), 36_720);
/// assert_eq!(times.scheduled_arrival(1), 36_600);
/// ```
#[derive(Debug, Clone)]
pub struct TripTimes {
    trip: Arc<Trip>,
    service_code: Option<u32>,
    time_shift: i32,
    scheduled_arrivals: Arc<[i32]>,
    scheduled_departures: Arc<[i32]>,
    stop_sequences: Arc<[u32]>,
    timepoints: Arc<[bool]>,
    pickups: Arc<[PickDrop]>,
    dropoffs: Arc<[PickDrop]>,
    /// `None` when every stop shows the trip headsign.
    headsigns: Option<Arc<[Option<String>]>>,
    booking_infos: Arc<[Option<BookingInfo>]>,
    overlay: Option<RealtimeOverlay>,
    state: RealTimeState,
}

impl TripTimes {
    /// Build the baseline from ordered stop times.
    ///
    /// The first arrival becomes the time shift; the stored arrays are
    /// relative to it and interned through `dedup`.
    pub fn new(
        trip: Arc<Trip>,
        stop_times: &[StopTime],
        dedup: &mut Deduplicator,
    ) -> Result<Self, TripTimesError> {
        let first = stop_times
            .first()
            .ok_or_else(|| TripTimesError::Empty(trip.id.clone()))?;
        let time_shift = first.arrival;

        let arrivals = stop_times.iter().map(|st| st.arrival - time_shift).collect();
        let departures = stop_times
            .iter()
            .map(|st| st.departure - time_shift)
            .collect();
        let sequences = stop_times.iter().map(|st| st.stop_sequence).collect();
        let timepoints = stop_times.iter().map(|st| st.timepoint).collect();
        let pickups = stop_times.iter().map(|st| st.pickup).collect();
        let dropoffs = stop_times.iter().map(|st| st.dropoff).collect();
        let booking_infos = stop_times
            .iter()
            .map(|st| st.booking_info.clone())
            .collect();
        let headsigns = stop_headsigns(&trip, stop_times).map(|h| dedup.headsigns(h));

        Ok(Self {
            service_code: None,
            time_shift,
            scheduled_arrivals: dedup.times(arrivals),
            scheduled_departures: dedup.times(departures),
            stop_sequences: dedup.sequences(sequences),
            timepoints: dedup.flags(timepoints),
            pickups: dedup.pick_drops(pickups),
            dropoffs: dedup.pick_drops(dropoffs),
            headsigns,
            booking_infos: dedup.booking_infos(booking_infos),
            overlay: None,
            state: RealTimeState::Scheduled,
            trip,
        })
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip.id
    }

    pub fn num_stops(&self) -> usize {
        self.scheduled_arrivals.len()
    }

    /// Seconds added to every baseline time.
    pub fn time_shift_secs(&self) -> i32 {
        self.time_shift
    }

    pub fn service_code(&self) -> Option<u32> {
        self.service_code
    }

    /// Set the service code used by departure search. Only meaningful
    /// before the trip is published.
    pub fn set_service_code(&mut self, code: u32) {
        self.service_code = Some(code);
    }

    pub fn real_time_state(&self) -> RealTimeState {
        self.state
    }

    /// True when no realtime data has been applied.
    pub fn is_scheduled(&self) -> bool {
        self.overlay.is_none()
    }

    pub fn is_canceled(&self) -> bool {
        self.state == RealTimeState::Canceled
    }

    pub fn scheduled_arrival(&self, stop: usize) -> i32 {
        self.scheduled_arrivals[stop] + self.time_shift
    }

    pub fn scheduled_departure(&self, stop: usize) -> i32 {
        self.scheduled_departures[stop] + self.time_shift
    }

    /// Arrival at `stop`, realtime if known.
    pub fn arrival(&self, stop: usize) -> i32 {
        match &self.overlay {
            Some(overlay) => overlay.arrivals[stop],
            None => self.scheduled_arrival(stop),
        }
    }

    /// Departure from `stop`, realtime if known.
    pub fn departure(&self, stop: usize) -> i32 {
        match &self.overlay {
            Some(overlay) => overlay.departures[stop],
            None => self.scheduled_departure(stop),
        }
    }

    pub fn arrival_delay(&self, stop: usize) -> i32 {
        self.arrival(stop) - self.scheduled_arrival(stop)
    }

    pub fn departure_delay(&self, stop: usize) -> i32 {
        self.departure(stop) - self.scheduled_departure(stop)
    }

    /// Seconds the vehicle waits at `stop`.
    pub fn dwell_time(&self, stop: usize) -> i32 {
        self.departure(stop) - self.arrival(stop)
    }

    /// Seconds between departing `stop` and arriving at the next stop.
    pub fn running_time(&self, stop: usize) -> i32 {
        self.arrival(stop + 1) - self.departure(stop)
    }

    pub fn is_recorded(&self, stop: usize) -> bool {
        self.overlay.as_ref().is_some_and(|o| o.recorded[stop])
    }

    pub fn is_cancelled_stop(&self, stop: usize) -> bool {
        self.overlay.as_ref().is_some_and(|o| o.cancelled[stop])
    }

    pub fn is_prediction_inaccurate(&self, stop: usize) -> bool {
        self.overlay
            .as_ref()
            .is_some_and(|o| o.prediction_inaccurate[stop])
    }

    pub fn pickup_type(&self, stop: usize) -> PickDrop {
        match &self.overlay {
            Some(overlay) => overlay.pickups[stop],
            None => self.pickups[stop],
        }
    }

    pub fn dropoff_type(&self, stop: usize) -> PickDrop {
        match &self.overlay {
            Some(overlay) => overlay.dropoffs[stop],
            None => self.dropoffs[stop],
        }
    }

    pub fn stop_sequence(&self, stop: usize) -> u32 {
        self.stop_sequences[stop]
    }

    /// Position of the stop with GTFS sequence number `sequence`.
    pub fn position_of_sequence(&self, sequence: u32) -> Option<usize> {
        self.stop_sequences.iter().position(|&s| s == sequence)
    }

    pub fn is_timepoint(&self, stop: usize) -> bool {
        self.timepoints[stop]
    }

    /// Headsign shown at `stop`, falling back to the trip headsign.
    pub fn headsign(&self, stop: usize) -> Option<&str> {
        self.headsigns
            .as_ref()
            .and_then(|h| h[stop].as_deref())
            .or(self.trip.headsign.as_deref())
    }

    pub fn booking_info(&self, stop: usize) -> Option<&BookingInfo> {
        self.booking_infos[stop].as_ref()
    }

    /// Order trips by their departure from the first stop.
    pub fn cmp_by_first_departure(&self, other: &TripTimes) -> Ordering {
        self.departure(0).cmp(&other.departure(0))
    }

    pub fn update_arrival_time(&mut self, stop: usize, time: i32) -> Result<(), TripTimesError> {
        self.overlay_mut(stop)?.arrivals[stop] = time;
        Ok(())
    }

    pub fn update_departure_time(&mut self, stop: usize, time: i32) -> Result<(), TripTimesError> {
        self.overlay_mut(stop)?.departures[stop] = time;
        Ok(())
    }

    /// Set the arrival to the scheduled arrival plus `delay` seconds.
    pub fn update_arrival_delay(&mut self, stop: usize, delay: i32) -> Result<(), TripTimesError> {
        self.check_writable(stop)?;
        let time = self.scheduled_arrival(stop) + delay;
        self.update_arrival_time(stop, time)
    }

    /// Set the departure to the scheduled departure plus `delay` seconds.
    pub fn update_departure_delay(
        &mut self,
        stop: usize,
        delay: i32,
    ) -> Result<(), TripTimesError> {
        self.check_writable(stop)?;
        let time = self.scheduled_departure(stop) + delay;
        self.update_departure_time(stop, time)
    }

    pub fn set_cancelled_stop(&mut self, stop: usize, cancelled: bool) -> Result<(), TripTimesError> {
        self.overlay_mut(stop)?.cancelled[stop] = cancelled;
        Ok(())
    }

    pub fn set_recorded(&mut self, stop: usize, recorded: bool) -> Result<(), TripTimesError> {
        self.overlay_mut(stop)?.recorded[stop] = recorded;
        Ok(())
    }

    pub fn set_prediction_inaccurate(
        &mut self,
        stop: usize,
        inaccurate: bool,
    ) -> Result<(), TripTimesError> {
        self.overlay_mut(stop)?.prediction_inaccurate[stop] = inaccurate;
        Ok(())
    }

    pub fn set_pickup_type(&mut self, stop: usize, pickup: PickDrop) -> Result<(), TripTimesError> {
        self.overlay_mut(stop)?.pickups[stop] = pickup;
        Ok(())
    }

    pub fn set_dropoff_type(&mut self, stop: usize, dropoff: PickDrop) -> Result<(), TripTimesError> {
        self.overlay_mut(stop)?.dropoffs[stop] = dropoff;
        Ok(())
    }

    /// Cancel the whole trip.
    ///
    /// Every stop becomes unavailable and closed to passengers. There is no
    /// way back; later mutations fail with [`TripTimesError::Canceled`].
    pub fn cancel(&mut self) {
        if self.is_canceled() {
            return;
        }
        self.materialize().cancel_all();
        self.state = RealTimeState::Canceled;
    }

    /// A copy of this trip shifted so that its arrival (or departure) at
    /// `stop` is `time`.
    ///
    /// Used for frequency-based services. Only trips without realtime data
    /// can be shifted.
    pub fn time_shift(
        &self,
        stop: usize,
        time: i32,
        is_departure: bool,
    ) -> Result<TripTimes, TripTimesError> {
        if self.overlay.is_some() {
            return Err(TripTimesError::HasRealtimeData(self.trip.id.clone()));
        }
        self.check_range(stop)?;

        let current = if is_departure {
            self.departure(stop)
        } else {
            self.arrival(stop)
        };
        let mut shifted = self.clone();
        shifted.time_shift += time - current;
        Ok(shifted)
    }

    /// First stop at which dwell or running time is negative.
    pub fn first_non_increasing(&self) -> Option<TimeViolation> {
        let mut prev_departure = None;
        for stop in 0..self.num_stops() {
            let arrival = self.arrival(stop);
            let departure = self.departure(stop);

            if departure < arrival {
                return Some(TimeViolation {
                    stop,
                    kind: ViolationKind::NegativeDwell,
                });
            }
            if prev_departure.is_some_and(|prev| prev > arrival) {
                return Some(TimeViolation {
                    stop,
                    kind: ViolationKind::NegativeRunning,
                });
            }
            prev_departure = Some(departure);
        }
        None
    }

    /// Check that times never decrease along the trip, logging the first
    /// offending stop.
    pub fn times_increasing(&self) -> bool {
        match self.first_non_increasing() {
            Some(violation) => {
                error!(
                    trip = %self.trip.id,
                    stop = violation.stop,
                    "{violation}"
                );
                false
            }
            None => true,
        }
    }

    /// Like [`times_increasing`](Self::times_increasing) but as an error
    /// value and without logging.
    pub fn validate(&self) -> Result<(), TripTimesError> {
        match self.first_non_increasing() {
            Some(violation) => Err(TripTimesError::NotIncreasing {
                trip: self.trip.id.clone(),
                violation,
            }),
            None => Ok(()),
        }
    }

    /// Hash of the scheduled `(departure, next arrival)` pair of every hop.
    pub fn semantic_hash(&self) -> SemanticHash {
        let mut hasher = Sha256::new();
        for hop in 0..self.num_stops().saturating_sub(1) {
            hasher.update(self.scheduled_departure(hop).to_be_bytes());
            hasher.update(self.scheduled_arrival(hop + 1).to_be_bytes());
        }
        SemanticHash(hasher.finalize().into())
    }

    fn check_range(&self, stop: usize) -> Result<(), TripTimesError> {
        let num_stops = self.num_stops();
        if stop >= num_stops {
            return Err(TripTimesError::StopOutOfRange { stop, num_stops });
        }
        Ok(())
    }

    fn check_writable(&self, stop: usize) -> Result<(), TripTimesError> {
        if self.is_canceled() {
            return Err(TripTimesError::Canceled(self.trip.id.clone()));
        }
        self.check_range(stop)
    }

    fn overlay_mut(&mut self, stop: usize) -> Result<&mut RealtimeOverlay, TripTimesError> {
        self.check_writable(stop)?;
        Ok(self.materialize())
    }

    fn materialize(&mut self) -> &mut RealtimeOverlay {
        let overlay = match self.overlay.take() {
            Some(overlay) => overlay,
            None => {
                trace!(trip = %self.trip.id, "materializing realtime overlay");
                self.state = RealTimeState::Updated;
                RealtimeOverlay::from_schedule(
                    &self.scheduled_arrivals,
                    &self.scheduled_departures,
                    self.time_shift,
                    &self.pickups,
                    &self.dropoffs,
                )
            }
        };
        self.overlay.insert(overlay)
    }
}

/// Per-stop headsigns, or `None` when every stop shows the trip headsign.
fn stop_headsigns(trip: &Trip, stop_times: &[StopTime]) -> Option<Vec<Option<String>>> {
    let all_default = stop_times.iter().all(|st| {
        st.stop_headsign.is_none() || st.stop_headsign.as_deref() == trip.headsign.as_deref()
    });
    if all_default {
        return None;
    }
    Some(stop_times.iter().map(|st| st.stop_headsign.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UNAVAILABLE, hms};

    fn trip_times(times: &[(i32, i32)]) -> TripTimes {
        let stop_times: Vec<StopTime> = times
            .iter()
            .enumerate()
            .map(|(i, &(a, d))| StopTime::new(a, d, (i as u32 + 1) * 10))
            .collect();
        TripTimes::new(
            Arc::new(Trip::new("T1")),
            &stop_times,
            &mut Deduplicator::new(),
        )
        .unwrap()
    }

    fn three_stops() -> TripTimes {
        trip_times(&[
            (hms(10, 0, 0), hms(10, 0, 0)),
            (hms(10, 10, 0), hms(10, 11, 0)),
            (hms(10, 20, 0), hms(10, 20, 0)),
        ])
    }

    #[test]
    fn empty_stop_times_rejected() {
        let err = TripTimes::new(Arc::new(Trip::new("T9")), &[], &mut Deduplicator::new())
            .unwrap_err();
        assert_eq!(err, TripTimesError::Empty(TripId::new("T9")));
    }

    #[test]
    fn baseline_is_shifted() {
        let times = three_stops();
        assert_eq!(times.time_shift_secs(), hms(10, 0, 0));
        assert_eq!(times.num_stops(), 3);
        assert_eq!(times.scheduled_arrival(1), hms(10, 10, 0));
        assert_eq!(times.scheduled_departure(1), hms(10, 11, 0));
        assert_eq!(times.arrival(2), hms(10, 20, 0));
        assert_eq!(times.dwell_time(1), 60);
        assert_eq!(times.running_time(1), 540);
        assert!(times.is_scheduled());
        assert_eq!(times.real_time_state(), RealTimeState::Scheduled);
    }

    #[test]
    fn unmaterialized_flags_are_neutral() {
        let times = three_stops();
        assert!(!times.is_recorded(0));
        assert!(!times.is_cancelled_stop(1));
        assert!(!times.is_prediction_inaccurate(2));
        assert_eq!(times.pickup_type(0), PickDrop::Scheduled);
        assert_eq!(times.arrival_delay(1), 0);
    }

    #[test]
    fn update_materializes_overlay() {
        let mut times = three_stops();
        times.update_arrival_delay(1, 90).unwrap();

        assert!(!times.is_scheduled());
        assert_eq!(times.real_time_state(), RealTimeState::Updated);
        assert_eq!(times.arrival(1), hms(10, 11, 30));
        assert_eq!(times.arrival_delay(1), 90);
        assert_eq!(times.scheduled_arrival(1), hms(10, 10, 0));
        // Untouched stops keep their scheduled values.
        assert_eq!(times.arrival(2), hms(10, 20, 0));
        assert_eq!(times.departure(0), hms(10, 0, 0));
    }

    #[test]
    fn overlay_does_not_touch_shared_baseline() {
        let mut dedup = Deduplicator::new();
        let stop_times = [StopTime::new(0, 0, 1), StopTime::new(600, 600, 2)];
        let a = TripTimes::new(Arc::new(Trip::new("A")), &stop_times, &mut dedup).unwrap();
        let mut b = TripTimes::new(Arc::new(Trip::new("B")), &stop_times, &mut dedup).unwrap();
        assert!(Arc::ptr_eq(&a.scheduled_arrivals, &b.scheduled_arrivals));

        b.update_arrival_time(1, 700).unwrap();
        b.set_pickup_type(0, PickDrop::None).unwrap();

        assert_eq!(a.arrival(1), 600);
        assert_eq!(a.pickup_type(0), PickDrop::Scheduled);
        assert_eq!(b.arrival(1), 700);
        assert_eq!(b.pickup_type(0), PickDrop::None);
    }

    #[test]
    fn flag_setters() {
        let mut times = three_stops();
        times.set_recorded(0, true).unwrap();
        times.set_cancelled_stop(1, true).unwrap();
        times.set_prediction_inaccurate(2, true).unwrap();
        times.set_dropoff_type(2, PickDrop::CallAgency).unwrap();
        times.update_departure_delay(0, 30).unwrap();

        assert!(times.is_recorded(0));
        assert!(times.is_cancelled_stop(1));
        assert!(times.is_prediction_inaccurate(2));
        assert_eq!(times.dropoff_type(2), PickDrop::CallAgency);
        assert_eq!(times.departure_delay(0), 30);
        assert_eq!(times.real_time_state(), RealTimeState::Updated);
    }

    #[test]
    fn cancel_makes_everything_unavailable() {
        let mut times = three_stops();
        times.set_recorded(0, true).unwrap();
        times.cancel();

        assert!(times.is_canceled());
        for stop in 0..times.num_stops() {
            assert_eq!(times.arrival(stop), UNAVAILABLE);
            assert_eq!(times.departure(stop), UNAVAILABLE);
            assert_eq!(times.pickup_type(stop), PickDrop::None);
            assert_eq!(times.dropoff_type(stop), PickDrop::None);
            assert!(times.is_cancelled_stop(stop));
        }
        assert!(times.is_recorded(0));
        // Scheduled values survive for reporting.
        assert_eq!(times.scheduled_arrival(1), hms(10, 10, 0));
    }

    #[test]
    fn mutation_after_cancel_rejected() {
        let mut times = three_stops();
        times.cancel();
        times.cancel();

        let err = times.update_arrival_time(0, 5).unwrap_err();
        assert_eq!(err, TripTimesError::Canceled(TripId::new("T1")));
        assert!(times.update_departure_delay(0, 5).is_err());
        assert!(times.set_pickup_type(0, PickDrop::Scheduled).is_err());
        assert_eq!(times.arrival(0), UNAVAILABLE);
        assert_eq!(times.real_time_state(), RealTimeState::Canceled);
    }

    #[test]
    fn out_of_range_mutation_rejected() {
        let mut times = three_stops();
        let err = times.update_arrival_delay(3, 0).unwrap_err();
        assert_eq!(
            err,
            TripTimesError::StopOutOfRange {
                stop: 3,
                num_stops: 3
            }
        );
        // A rejected write does not materialize the overlay.
        assert!(times.is_scheduled());
    }

    #[test]
    fn time_shift_moves_whole_trip() {
        let times = three_stops();
        let shifted = times.time_shift(1, hms(12, 11, 0), true).unwrap();

        assert_eq!(shifted.departure(1), hms(12, 11, 0));
        assert_eq!(shifted.arrival(0), hms(12, 0, 0));
        assert_eq!(shifted.arrival(2), hms(12, 20, 0));
        // The original is untouched.
        assert_eq!(times.departure(1), hms(10, 11, 0));

        let by_arrival = times.time_shift(1, hms(8, 10, 0), false).unwrap();
        assert_eq!(by_arrival.arrival(1), hms(8, 10, 0));
    }

    #[test]
    fn time_shift_refused_with_realtime_data() {
        let mut times = three_stops();
        times.set_recorded(0, true).unwrap();
        let err = times.time_shift(0, 0, false).unwrap_err();
        assert_eq!(err, TripTimesError::HasRealtimeData(TripId::new("T1")));

        let mut canceled = three_stops();
        canceled.cancel();
        assert!(canceled.time_shift(0, 0, true).is_err());
    }

    #[test]
    fn negative_dwell_detected() {
        let mut times = three_stops();
        assert!(times.times_increasing());
        times.update_departure_time(1, hms(10, 9, 0)).unwrap();

        assert!(!times.times_increasing());
        assert_eq!(
            times.first_non_increasing(),
            Some(TimeViolation {
                stop: 1,
                kind: ViolationKind::NegativeDwell
            })
        );
    }

    #[test]
    fn negative_running_detected() {
        let mut times = three_stops();
        times.update_arrival_time(2, hms(10, 10, 30)).unwrap();
        times.update_departure_time(2, hms(10, 10, 30)).unwrap();

        assert_eq!(
            times.first_non_increasing(),
            Some(TimeViolation {
                stop: 2,
                kind: ViolationKind::NegativeRunning
            })
        );
        assert!(matches!(
            times.validate(),
            Err(TripTimesError::NotIncreasing { .. })
        ));
    }

    #[test]
    fn canceled_trip_counts_as_increasing() {
        let mut times = three_stops();
        times.cancel();
        assert!(times.times_increasing());
    }

    #[test]
    fn semantic_hash_ignores_realtime() {
        let mut times = three_stops();
        let before = times.semantic_hash();
        times.update_arrival_delay(2, 300).unwrap();
        assert_eq!(times.semantic_hash(), before);

        let other = trip_times(&[
            (hms(10, 0, 0), hms(10, 0, 0)),
            (hms(10, 10, 0), hms(10, 12, 0)),
            (hms(10, 20, 0), hms(10, 20, 0)),
        ]);
        assert_ne!(other.semantic_hash(), before);
        assert_eq!(before.to_string().len(), 64);
        assert!(
            before
                .to_string()
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn semantic_hash_depends_on_hop_times_only() {
        // Same hops, different dwell at the first stop's arrival.
        let a = trip_times(&[(hms(9, 58, 0), hms(10, 0, 0)), (hms(10, 10, 0), hms(10, 10, 0))]);
        let b = trip_times(&[(hms(9, 59, 0), hms(10, 0, 0)), (hms(10, 10, 0), hms(10, 10, 0))]);
        assert_eq!(a.semantic_hash(), b.semantic_hash());
    }

    #[test]
    fn headsigns_fall_back_to_trip() {
        let trip = Arc::new(Trip::new("T2").with_headsign("Airport"));
        let mut dedup = Deduplicator::new();

        let plain = [StopTime::new(0, 0, 1), StopTime::new(60, 60, 2).with_headsign("Airport")];
        let times = TripTimes::new(Arc::clone(&trip), &plain, &mut dedup).unwrap();
        assert!(times.headsigns.is_none());
        assert_eq!(times.headsign(0), Some("Airport"));

        let mixed = [StopTime::new(0, 0, 1).with_headsign("City"), StopTime::new(60, 60, 2)];
        let times = TripTimes::new(trip, &mixed, &mut dedup).unwrap();
        assert_eq!(times.headsign(0), Some("City"));
        assert_eq!(times.headsign(1), Some("Airport"));
    }

    #[test]
    fn stop_metadata() {
        let booking = BookingInfo {
            phone: Some("555-0100".to_string()),
            ..BookingInfo::default()
        };
        let stop_times = [
            StopTime::new(0, 0, 5),
            StopTime::new(60, 60, 9)
                .interpolated()
                .with_booking_info(booking.clone()),
        ];
        let mut times = TripTimes::new(
            Arc::new(Trip::new("T3")),
            &stop_times,
            &mut Deduplicator::new(),
        )
        .unwrap();
        times.set_service_code(7);

        assert_eq!(times.stop_sequence(1), 9);
        assert_eq!(times.position_of_sequence(9), Some(1));
        assert_eq!(times.position_of_sequence(6), None);
        assert!(times.is_timepoint(0));
        assert!(!times.is_timepoint(1));
        assert_eq!(times.booking_info(1), Some(&booking));
        assert_eq!(times.booking_info(0), None);
        assert_eq!(times.service_code(), Some(7));
    }

    #[test]
    fn ordering_by_first_departure() {
        let early = three_stops();
        let late = early.time_shift(0, hms(11, 0, 0), true).unwrap();
        assert_eq!(early.cmp_by_first_departure(&late), Ordering::Less);
        assert_eq!(late.cmp_by_first_departure(&early), Ordering::Greater);
    }
}

//! Realtime overlay on top of a trip's scheduled times.
//!
//! An overlay is created the first time a trip receives realtime data and
//! from then on holds a full copy of every per-stop value it can override.

use crate::domain::UNAVAILABLE;

use super::PickDrop;

/// Per-stop realtime values of one trip.
///
/// Times are absolute (the trip's time shift is already applied).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RealtimeOverlay {
    pub(crate) arrivals: Vec<i32>,
    pub(crate) departures: Vec<i32>,
    pub(crate) recorded: Vec<bool>,
    pub(crate) cancelled: Vec<bool>,
    pub(crate) prediction_inaccurate: Vec<bool>,
    pub(crate) pickups: Vec<PickDrop>,
    pub(crate) dropoffs: Vec<PickDrop>,
}

impl RealtimeOverlay {
    /// Copy the scheduled values, applying `time_shift` to the zero-based
    /// baseline times.
    pub(crate) fn from_schedule(
        arrivals: &[i32],
        departures: &[i32],
        time_shift: i32,
        pickups: &[PickDrop],
        dropoffs: &[PickDrop],
    ) -> Self {
        let n = arrivals.len();
        Self {
            arrivals: arrivals.iter().map(|t| t + time_shift).collect(),
            departures: departures.iter().map(|t| t + time_shift).collect(),
            recorded: vec![false; n],
            cancelled: vec![false; n],
            prediction_inaccurate: vec![false; n],
            pickups: pickups.to_vec(),
            dropoffs: dropoffs.to_vec(),
        }
    }

    pub(crate) fn num_stops(&self) -> usize {
        self.arrivals.len()
    }

    /// Mark every stop unavailable and closed to passengers.
    ///
    /// Recorded and prediction flags are left as they were.
    pub(crate) fn cancel_all(&mut self) {
        self.arrivals.fill(UNAVAILABLE);
        self.departures.fill(UNAVAILABLE);
        self.cancelled.fill(true);
        self.pickups.fill(PickDrop::None);
        self.dropoffs.fill(PickDrop::None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_schedule_applies_shift() {
        let overlay = RealtimeOverlay::from_schedule(
            &[0, 300],
            &[60, 360],
            1000,
            &[PickDrop::Scheduled, PickDrop::None],
            &[PickDrop::None, PickDrop::Scheduled],
        );

        assert_eq!(overlay.num_stops(), 2);
        assert_eq!(overlay.arrivals, vec![1000, 1300]);
        assert_eq!(overlay.departures, vec![1060, 1360]);
        assert_eq!(overlay.recorded, vec![false, false]);
        assert_eq!(overlay.pickups[1], PickDrop::None);
    }

    #[test]
    fn cancel_all_keeps_recorded_flags() {
        let mut overlay = RealtimeOverlay::from_schedule(
            &[0, 300],
            &[0, 300],
            0,
            &[PickDrop::Scheduled; 2],
            &[PickDrop::Scheduled; 2],
        );
        overlay.recorded[0] = true;

        overlay.cancel_all();

        assert_eq!(overlay.arrivals, vec![UNAVAILABLE; 2]);
        assert_eq!(overlay.departures, vec![UNAVAILABLE; 2]);
        assert_eq!(overlay.cancelled, vec![true; 2]);
        assert_eq!(overlay.pickups, vec![PickDrop::None; 2]);
        assert_eq!(overlay.dropoffs, vec![PickDrop::None; 2]);
        assert!(overlay.recorded[0]);
    }
}

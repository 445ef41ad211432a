//! Extending forward stop-arrival chains leg by leg.
//!
//! [`ForwardExtender`] applies the slack and cost models to walks and
//! rides, so the search loop (and tests) only decide *which* legs to try.

use std::sync::Arc;

use tracing::trace;

use crate::cost::CostCalculator;
use crate::domain::{RaptorTransfer, StopIndex, TripSchedule, time_to_str_long};
use crate::slack::SlackProvider;

use super::{ArrivalId, ArrivalMode, EgressId, StopArrival, StopArrivals};

/// A leg that cannot be appended to a chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtendError {
    #[error(
        "missed boarding at stop {stop}: trip departs {} but earliest boarding is {}",
        long_time(.board_time),
        long_time(.earliest)
    )]
    MissedBoarding {
        stop: StopIndex,
        board_time: i32,
        earliest: i32,
    },

    #[error("trip boards at stop {found} but the traveller is at stop {expected}")]
    WrongBoardStop {
        expected: StopIndex,
        found: StopIndex,
    },

    #[error("alight position {alight_pos} is not after board position {board_pos}")]
    AlightNotAfterBoard { board_pos: usize, alight_pos: usize },
}

fn long_time(time: &i32) -> String {
    time_to_str_long(*time)
}

/// Builds forward chains using a slack provider and a cost calculator.
///
/// # Examples
///
/// ```
/// use transit_router::config::{CostParams, SlackParams};
/// use transit_router::cost::DefaultCostCalculator;
/// use transit_router::domain::{StopIndex, Walk};
/// use transit_router::raptor::{ForwardExtender, StopArrivals};
/// use transit_router::slack::DefaultSlackProvider;
/// use transit_router::timetable::ScheduledTrip;
///
/// let extender = ForwardExtender::new(
///     DefaultCostCalculator::new(&CostParams::default(), None),
///     DefaultSlackProvider::new(&SlackParams::default()),
/// );
/// let mut arrivals: StopArrivals<ScheduledTrip> = StopArrivals::new();
/// let access = extender.access(&mut arrivals, 36_000, &Walk::new(StopIndex(1), 120));
///
/// let arrival = arrivals.get(access);
/// assert_eq!(arrival.time(), 36_120);
/// assert_eq!(arrival.cost(), 24_000);
/// ```
#[derive(Debug, Clone)]
pub struct ForwardExtender<C, S> {
    cost: C,
    slack: S,
}

impl<C: CostCalculator, S: SlackProvider> ForwardExtender<C, S> {
    pub fn new(cost: C, slack: S) -> Self {
        Self { cost, slack }
    }

    pub fn cost_calculator(&self) -> &C {
        &self.cost
    }

    pub fn slack_provider(&self) -> &S {
        &self.slack
    }

    /// Start a chain by walking from the origin at `departure_time`.
    pub fn access<T>(
        &self,
        arrivals: &mut StopArrivals<T>,
        departure_time: i32,
        walk: &impl RaptorTransfer,
    ) -> ArrivalId {
        let duration = walk.duration_in_seconds();
        arrivals.access(
            walk.stop(),
            departure_time,
            departure_time + duration,
            self.cost.walk_cost(duration),
        )
    }

    /// Walk from the previous arrival to another stop, leaving as soon as
    /// the traveller is free.
    pub fn transfer<T: TripSchedule>(
        &self,
        arrivals: &mut StopArrivals<T>,
        previous: ArrivalId,
        walk: &impl RaptorTransfer,
    ) -> ArrivalId {
        let prev = arrivals.get(previous);
        let round = prev.round();
        let from_time = self.available_time(prev);
        let duration = walk.duration_in_seconds();

        arrivals.transfer(
            round,
            walk.stop(),
            from_time,
            from_time + duration,
            self.cost.walk_cost(duration),
            previous,
        )
    }

    /// Ride `trip` from pattern position `board_pos` to `alight_pos`.
    ///
    /// The trip must board at the stop of the previous arrival, no earlier
    /// than the board slack allows (and, after another ride, no earlier
    /// than the transfer slack allows).
    pub fn ride<T: TripSchedule>(
        &self,
        arrivals: &mut StopArrivals<T>,
        previous: ArrivalId,
        trip: Arc<T>,
        board_pos: usize,
        alight_pos: usize,
    ) -> Result<ArrivalId, ExtendError> {
        if alight_pos <= board_pos {
            return Err(ExtendError::AlightNotAfterBoard {
                board_pos,
                alight_pos,
            });
        }
        let prev = arrivals.get(previous);
        let pattern = trip.pattern();
        let board_stop = pattern.stop_index(board_pos);
        let alight_stop = pattern.stop_index(alight_pos);
        if board_stop != prev.stop() {
            return Err(ExtendError::WrongBoardStop {
                expected: prev.stop(),
                found: board_stop,
            });
        }

        let board_time = trip.departure(board_pos);
        let alight_time = trip.arrival(alight_pos);
        let available = self.available_time(prev);

        let mut earliest = self.slack.earliest_board_time(available, pattern);
        if prev.is_transit() {
            earliest = earliest.max(prev.time() + self.slack.transfer_slack());
        }
        if board_time < earliest {
            return Err(ExtendError::MissedBoarding {
                stop: board_stop,
                board_time,
                earliest,
            });
        }

        let wait = board_time - available + self.slack.alight_slack(pattern);
        let ride = alight_time - board_time;
        let first_boarding = prev.mode() == ArrivalMode::Access;
        let leg_cost =
            self.cost
                .transit_arrival_cost(first_boarding, board_stop, wait, ride, alight_stop);
        let round = prev.round() + 1;

        trace!(
            route = pattern.route(),
            board = %board_stop,
            alight = %alight_stop,
            wait,
            leg_cost,
            "extending chain with transit leg"
        );
        Ok(arrivals.board_transit(
            round,
            alight_stop,
            alight_time,
            board_time,
            leg_cost,
            trip,
            previous,
        ))
    }

    /// Finish the chain by walking `duration_secs` to the destination.
    pub fn egress<T: TripSchedule>(
        &self,
        arrivals: &mut StopArrivals<T>,
        previous: ArrivalId,
        duration_secs: i32,
    ) -> EgressId {
        let from_time = self.available_time(arrivals.get(previous));
        arrivals.egress(
            from_time,
            from_time + duration_secs,
            self.cost.walk_cost(duration_secs),
            previous,
        )
    }

    /// Time the traveller is free at the stop of `arrival`.
    pub fn available_time<T: TripSchedule>(&self, arrival: &StopArrival<T>) -> i32 {
        match arrival.trip() {
            Some(trip) => self
                .slack
                .available_after_alighting(arrival.time(), trip.pattern()),
            None => arrival.time(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CostParams, SlackParams};
    use crate::cost::DefaultCostCalculator;
    use crate::domain::{TransitMode, TripPattern, Walk, hms};
    use crate::slack::DefaultSlackProvider;

    #[derive(Debug)]
    struct Fixed {
        pattern: TripPattern,
        times: Vec<i32>,
    }

    impl TripSchedule for Fixed {
        fn pattern(&self) -> &TripPattern {
            &self.pattern
        }

        fn arrival(&self, stop_pos: usize) -> i32 {
            self.times[stop_pos]
        }

        fn departure(&self, stop_pos: usize) -> i32 {
            self.times[stop_pos]
        }
    }

    fn bus(route: &str, stops: &[usize], times: &[i32]) -> Arc<Fixed> {
        Arc::new(Fixed {
            pattern: TripPattern::new(
                TransitMode::Bus,
                route,
                stops.iter().copied().map(StopIndex).collect(),
            ),
            times: times.to_vec(),
        })
    }

    fn extender() -> ForwardExtender<DefaultCostCalculator, DefaultSlackProvider> {
        ForwardExtender::new(
            DefaultCostCalculator::new(&CostParams::new(60, 120, 2.0, 0.8), None),
            DefaultSlackProvider::new(&SlackParams::new(45, 15, 60)),
        )
    }

    #[test]
    fn first_ride_costs() {
        let ext = extender();
        let mut arrivals = StopArrivals::new();
        let access = ext.access(&mut arrivals, hms(10, 0, 0), &Walk::new(StopIndex(1), 195));
        let trip = bus("L1", &[1, 2], &[hms(10, 4, 0), hms(10, 35, 0)]);
        let ride = ext.ride(&mut arrivals, access, trip, 0, 1).unwrap();

        let arrival = arrivals.get(ride);
        assert_eq!(arrival.round(), 1);
        assert_eq!(arrival.time(), hms(10, 35, 0));
        // wait 60s (45s board slack + 15s alight slack), ride 1860s, board 60s.
        assert_eq!(arrival.cost() - arrivals.get(access).cost(), 196_800);
    }

    #[test]
    fn missed_boarding_rejected() {
        let ext = extender();
        let mut arrivals = StopArrivals::new();
        let access = ext.access(&mut arrivals, hms(10, 0, 0), &Walk::new(StopIndex(1), 200));
        let trip = bus("L1", &[1, 2], &[hms(10, 4, 0), hms(10, 35, 0)]);

        let err = ext.ride(&mut arrivals, access, trip, 0, 1).unwrap_err();
        assert_eq!(
            err,
            ExtendError::MissedBoarding {
                stop: StopIndex(1),
                board_time: hms(10, 4, 0),
                earliest: hms(10, 4, 5),
            }
        );
        assert_eq!(
            err.to_string(),
            "missed boarding at stop 1: trip departs 10:04:00 but earliest boarding is 10:04:05"
        );
    }

    #[test]
    fn transfer_slack_applies_between_rides() {
        let ext = extender();
        let mut arrivals = StopArrivals::new();
        let access = ext.access(&mut arrivals, hms(9, 0, 0), &Walk::new(StopIndex(1), 0));
        let first = bus("L1", &[1, 2], &[hms(9, 1, 0), hms(9, 10, 0)]);
        let ride = ext.ride(&mut arrivals, access, first, 0, 1).unwrap();

        // Board slack and transfer slack both put the earliest boarding at 09:11:00.
        let early = bus("L2", &[2, 3], &[hms(9, 10, 59), hms(9, 20, 0)]);
        assert!(matches!(
            ext.ride(&mut arrivals, ride, early, 0, 1),
            Err(ExtendError::MissedBoarding { .. })
        ));
        let ok = bus("L2", &[2, 3], &[hms(9, 11, 0), hms(9, 20, 0)]);
        let second = ext.ride(&mut arrivals, ride, ok, 0, 1).unwrap();
        assert_eq!(arrivals.get(second).round(), 2);
    }

    #[test]
    fn wrong_stop_and_positions_rejected() {
        let ext = extender();
        let mut arrivals = StopArrivals::new();
        let access = ext.access(&mut arrivals, 0, &Walk::new(StopIndex(5), 0));
        let trip = bus("L1", &[1, 2], &[600, 900]);

        assert_eq!(
            ext.ride(&mut arrivals, access, Arc::clone(&trip), 0, 1),
            Err(ExtendError::WrongBoardStop {
                expected: StopIndex(5),
                found: StopIndex(1),
            })
        );
        assert_eq!(
            ext.ride(&mut arrivals, access, trip, 1, 1),
            Err(ExtendError::AlightNotAfterBoard {
                board_pos: 1,
                alight_pos: 1
            })
        );
    }

    #[test]
    fn walks_leave_after_alight_slack() {
        let ext = extender();
        let mut arrivals = StopArrivals::new();
        let access = ext.access(&mut arrivals, 0, &Walk::new(StopIndex(1), 0));
        let trip = bus("L1", &[1, 2], &[100, 700]);
        let ride = ext.ride(&mut arrivals, access, trip, 0, 1).unwrap();

        let walk = ext.transfer(&mut arrivals, ride, &Walk::new(StopIndex(3), 60));
        let transfer = arrivals.get(walk);
        assert_eq!(transfer.from_time(), Some(715));
        assert_eq!(transfer.time(), 775);
        assert_eq!(transfer.round(), 1);

        let egress = ext.egress(&mut arrivals, ride, 30);
        let egress = arrivals.get_egress(egress);
        assert_eq!(egress.from_time(), 715);
        assert_eq!(egress.time(), 745);
        assert_eq!(egress.cost() - arrivals.get(ride).cost(), 6_000);
    }
}

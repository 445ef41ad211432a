//! Generalized-cost calculator.
//!
//! Turns leg durations and stop properties into a single integer cost in
//! internal units (see [`super::converter`]). Costs only ever grow along a
//! chain, which is what lets the search prune labels.

use std::sync::Arc;

use crate::config::CostParams;
use crate::domain::StopIndex;

use super::converter::to_raptor_cost;

/// Cost model used by the search.
///
/// The search is generic over this trait so alternative models (for
/// example one that also charges per-stop crowding) can be plugged in.
pub trait CostCalculator {
    /// Cost of walking (access, transfer or egress) for `duration_secs`.
    fn walk_cost(&self, duration_secs: i32) -> i32;

    /// Cost of waiting for, boarding and riding one transit leg.
    ///
    /// `first_boarding` is true when the boarding follows the access leg
    /// directly; only later boardings pay the transfer penalty.
    fn transit_arrival_cost(
        &self,
        first_boarding: bool,
        board_stop: StopIndex,
        wait_secs: i32,
        ride_secs: i32,
        alight_stop: StopIndex,
    ) -> i32;

    /// Lower bound on the cost of any journey with at least this travel
    /// time and number of transfers.
    fn min_cost(&self, min_travel_time: i32, min_num_transfers: i32) -> i32;
}

/// Cost calculator configured from [`CostParams`] and an optional per-stop
/// cost table.
///
/// # Examples
///
/// ```
/// use transit_router::config::CostParams;
/// use transit_router::cost::{CostCalculator, DefaultCostCalculator};
/// use transit_router::domain::StopIndex;
///
/// let calc = DefaultCostCalculator::new(&CostParams::new(60, 120, 2.0, 0.8), None);
///
/// // 3m15s walk at reluctance 2.0
/// assert_eq!(calc.walk_cost(195), 39_000);
///
/// // First boarding: no transfer penalty
/// let cost = calc.transit_arrival_cost(true, StopIndex(1), 60, 1_860, StopIndex(2));
/// assert_eq!(cost, 196_800);
/// ```
#[derive(Debug, Clone)]
pub struct DefaultCostCalculator {
    board_cost_secs: f64,
    transfer_cost_secs: f64,
    transfer_reluctance: f64,
    wait_reluctance: f64,
    stop_costs: Option<Arc<[i32]>>,
}

impl DefaultCostCalculator {
    /// Create a calculator.
    ///
    /// `stop_costs`, when given, holds the cost of visiting each stop in
    /// internal units, indexed by [`StopIndex`]. Stops beyond the end of the
    /// table cost nothing.
    pub fn new(params: &CostParams, stop_costs: Option<Vec<i32>>) -> Self {
        Self {
            board_cost_secs: f64::from(params.board_cost_secs),
            transfer_cost_secs: f64::from(params.transfer_cost_secs),
            transfer_reluctance: params.transfer_reluctance,
            wait_reluctance: params.wait_reluctance,
            stop_costs: stop_costs.map(Arc::from),
        }
    }

    /// Cost of visiting `stop`, in internal units.
    pub fn stop_cost(&self, stop: StopIndex) -> i32 {
        self.stop_costs
            .as_ref()
            .and_then(|costs| costs.get(stop.0).copied())
            .unwrap_or(0)
    }
}

impl CostCalculator for DefaultCostCalculator {
    fn walk_cost(&self, duration_secs: i32) -> i32 {
        to_raptor_cost(f64::from(duration_secs) * self.transfer_reluctance)
    }

    fn transit_arrival_cost(
        &self,
        first_boarding: bool,
        board_stop: StopIndex,
        wait_secs: i32,
        ride_secs: i32,
        alight_stop: StopIndex,
    ) -> i32 {
        let transfer = if first_boarding {
            0.0
        } else {
            self.transfer_cost_secs
        };
        let seconds = self.board_cost_secs
            + transfer
            + self.wait_reluctance * f64::from(wait_secs)
            + f64::from(ride_secs);

        self.stop_cost(board_stop) + self.stop_cost(alight_stop) + to_raptor_cost(seconds)
    }

    fn min_cost(&self, min_travel_time: i32, min_num_transfers: i32) -> i32 {
        let boardings = f64::from(1 + min_num_transfers);
        let seconds = self.board_cost_secs * boardings
            + self.transfer_cost_secs * f64::from(min_num_transfers)
            + f64::from(min_travel_time);
        to_raptor_cost(seconds)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::cost::to_raptor_cost_secs;
    use proptest::prelude::*;

    proptest! {
        /// Longer walks never cost less
        #[test]
        fn walk_cost_monotonic(a in 0i32..100_000, b in 0i32..100_000, reluctance in 0.0f64..10.0) {
            let calc = DefaultCostCalculator::new(&CostParams::new(0, 0, reluctance, 1.0), None);
            if a <= b {
                prop_assert!(calc.walk_cost(a) <= calc.walk_cost(b));
            }
        }

        /// A transfer boarding never costs less than a first boarding
        #[test]
        fn transfer_boarding_not_cheaper(
            wait in 0i32..10_000,
            ride in 0i32..20_000,
            board in 0i32..1_000,
            transfer in 0i32..1_000,
        ) {
            let calc = DefaultCostCalculator::new(&CostParams::new(board, transfer, 2.0, 0.8), None);
            let first = calc.transit_arrival_cost(true, StopIndex(0), wait, ride, StopIndex(1));
            let later = calc.transit_arrival_cost(false, StopIndex(0), wait, ride, StopIndex(1));
            prop_assert!(later >= first);
            prop_assert_eq!(later - first, to_raptor_cost_secs(transfer));
        }

        /// Transit costs are never negative for non-negative inputs
        #[test]
        fn transit_cost_non_negative(wait in 0i32..10_000, ride in 0i32..20_000) {
            let calc = DefaultCostCalculator::new(&CostParams::default(), None);
            prop_assert!(calc.transit_arrival_cost(false, StopIndex(0), wait, ride, StopIndex(1)) >= 0);
        }
    }
}

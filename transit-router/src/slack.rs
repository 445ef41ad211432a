//! Slack provider.
//!
//! Slack is the minimum buffer a traveller needs around vehicle
//! movements: time to reach the door before boarding, time to get off
//! after the vehicle stops, and time to change between two vehicles.

use crate::config::SlackParams;
use crate::domain::TripPattern;

/// Source of boarding, alighting and transfer slack, in seconds.
///
/// Implementations may vary slack by pattern (a ferry needs more boarding
/// time than a bus). Values must never be negative.
pub trait SlackProvider {
    /// Seconds between being at the stop and boarding a trip of `pattern`.
    fn board_slack(&self, pattern: &TripPattern) -> i32;

    /// Seconds between a trip of `pattern` arriving and the traveller being
    /// free to walk away or board something else.
    fn alight_slack(&self, pattern: &TripPattern) -> i32;

    /// Minimum seconds between alighting one trip and boarding the next.
    fn transfer_slack(&self) -> i32;

    /// Earliest time a trip of `pattern` can be boarded by a traveller who
    /// is at the stop from `available_time`.
    fn earliest_board_time(&self, available_time: i32, pattern: &TripPattern) -> i32 {
        available_time + self.board_slack(pattern)
    }

    /// Time the traveller is free at the stop after a trip of `pattern`
    /// arrives at `arrival_time`.
    fn available_after_alighting(&self, arrival_time: i32, pattern: &TripPattern) -> i32 {
        arrival_time + self.alight_slack(pattern)
    }

    /// Window in which a walking transfer can take place between alighting
    /// `from` at `alight_time` and boarding `to` at `board_time`.
    ///
    /// The window is empty (start after end) when the connection is missed.
    fn transfer_window(
        &self,
        alight_time: i32,
        from: &TripPattern,
        board_time: i32,
        to: &TripPattern,
    ) -> (i32, i32) {
        (
            self.available_after_alighting(alight_time, from),
            board_time - self.board_slack(to),
        )
    }
}

/// Slack provider returning fixed configured values for every pattern.
///
/// # Examples
///
/// ```
/// use transit_router::config::SlackParams;
/// use transit_router::domain::{StopIndex, TransitMode, TripPattern};
/// use transit_router::slack::{DefaultSlackProvider, SlackProvider};
///
/// let slack = DefaultSlackProvider::new(&SlackParams::new(45, 15, 60));
/// let pattern = TripPattern::new(TransitMode::Bus, "L11", vec![StopIndex(1), StopIndex(2)]);
///
/// assert_eq!(slack.board_slack(&pattern), 45);
/// assert_eq!(slack.earliest_board_time(36_195, &pattern), 36_240);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSlackProvider {
    board_slack: i32,
    alight_slack: i32,
    transfer_slack: i32,
}

impl DefaultSlackProvider {
    /// Create a provider from configuration.
    pub fn new(params: &SlackParams) -> Self {
        Self {
            board_slack: params.board_slack_secs,
            alight_slack: params.alight_slack_secs,
            transfer_slack: params.transfer_slack_secs,
        }
    }
}

impl Default for DefaultSlackProvider {
    fn default() -> Self {
        Self::new(&SlackParams::default())
    }
}

impl SlackProvider for DefaultSlackProvider {
    fn board_slack(&self, _pattern: &TripPattern) -> i32 {
        self.board_slack
    }

    fn alight_slack(&self, _pattern: &TripPattern) -> i32 {
        self.alight_slack
    }

    fn transfer_slack(&self) -> i32 {
        self.transfer_slack
    }
}

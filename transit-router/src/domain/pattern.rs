//! Trip patterns and the trip-schedule capability.
//!
//! A `TripPattern` is the ordered list of stops shared by every trip of a
//! route variant. A `TripSchedule` is one trip running along a pattern: it
//! answers "when does this vehicle arrive at / depart from position N".

use std::fmt;

use super::StopIndex;

/// Vehicle mode of a pattern. Only used for labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitMode {
    Bus,
    Tram,
    Rail,
    Subway,
    Ferry,
    Coach,
}

impl TransitMode {
    /// Upper-case label used in debug strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitMode::Bus => "BUS",
            TransitMode::Tram => "TRAM",
            TransitMode::Rail => "RAIL",
            TransitMode::Subway => "SUBWAY",
            TransitMode::Ferry => "FERRY",
            TransitMode::Coach => "COACH",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered stops visited by all trips of one route variant.
///
/// # Examples
///
/// ```
/// use transit_router::domain::{StopIndex, TransitMode, TripPattern};
///
/// let pattern = TripPattern::new(TransitMode::Bus, "L11", vec![StopIndex(1), StopIndex(2)]);
/// assert_eq!(pattern.debug_info(), "BUS L11");
/// assert_eq!(pattern.number_of_stops(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPattern {
    mode: TransitMode,
    route: String,
    stops: Vec<StopIndex>,
}

impl TripPattern {
    /// Creates a pattern.
    pub fn new(mode: TransitMode, route: impl Into<String>, stops: Vec<StopIndex>) -> Self {
        Self {
            mode,
            route: route.into(),
            stops,
        }
    }

    /// Returns the vehicle mode.
    pub fn mode(&self) -> TransitMode {
        self.mode
    }

    /// Returns the route short name.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the stop at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a valid position in the pattern.
    pub fn stop_index(&self, pos: usize) -> StopIndex {
        self.stops[pos]
    }

    /// Returns all stops in visiting order.
    pub fn stops(&self) -> &[StopIndex] {
        &self.stops
    }

    /// Returns the number of stops in the pattern.
    pub fn number_of_stops(&self) -> usize {
        self.stops.len()
    }

    /// Label used in path strings, e.g. "BUS L11".
    pub fn debug_info(&self) -> String {
        format!("{} {}", self.mode, self.route)
    }
}

/// A single trip along a pattern, as seen by the search.
///
/// Times are absolute service-day seconds. Implementations backed by a
/// realtime overlay return the updated times.
pub trait TripSchedule {
    /// The pattern this trip runs on.
    fn pattern(&self) -> &TripPattern;

    /// Arrival time at the given pattern position.
    fn arrival(&self, stop_pos: usize) -> i32;

    /// Departure time from the given pattern position.
    fn departure(&self, stop_pos: usize) -> i32;

    /// Find the position where this trip departs from `stop` at `time`.
    ///
    /// Patterns may visit a stop more than once, so the time is used to
    /// pick the right visit. Returns `None` if no visit matches.
    fn find_departure_stop_position(&self, time: i32, stop: StopIndex) -> Option<usize> {
        let pattern = self.pattern();
        (0..pattern.number_of_stops())
            .find(|&pos| pattern.stop_index(pos) == stop && self.departure(pos) == time)
    }

    /// Find the position where this trip arrives at `stop` at `time`.
    fn find_arrival_stop_position(&self, time: i32, stop: StopIndex) -> Option<usize> {
        let pattern = self.pattern();
        (0..pattern.number_of_stops())
            .rev()
            .find(|&pos| pattern.stop_index(pos) == stop && self.arrival(pos) == time)
    }
}

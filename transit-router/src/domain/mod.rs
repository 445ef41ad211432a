//! Domain types shared by the router components.
//!
//! Stops are dense indices, times are service-day seconds, and the two
//! collaborator capabilities (street transfers and trip schedules) are
//! traits so the router can be driven by any timetable source.

mod pattern;
mod stop;
mod time;
mod transfer;

pub use pattern::{TransitMode, TripPattern, TripSchedule};
pub use stop::StopIndex;
pub use time::{
    TimeError, UNAVAILABLE, duration_to_str, hms, is_available, parse_time, time_to_str_compact,
    time_to_str_long, to_datetime,
};
pub use transfer::{RaptorTransfer, Walk};

//! Transfer capability consumed from the street-routing subsystem.
//!
//! Access, egress and stop-to-stop transfers all reach the router as "get
//! to this stop in this many seconds". How the duration was computed
//! (walking, cycling, driving to a park-and-ride) is not the router's
//! concern.

use super::{StopIndex, duration_to_str};

/// A street-side connection to or from a stop.
pub trait RaptorTransfer {
    /// The stop this transfer reaches (or leaves, for egress).
    fn stop(&self) -> StopIndex;

    /// Time needed to traverse the transfer, in seconds.
    fn duration_in_seconds(&self) -> i32;
}

/// A walk of fixed duration to or from a stop.
///
/// # Examples
///
/// ```
/// use transit_router::domain::{RaptorTransfer, StopIndex, Walk};
///
/// let walk = Walk::new(StopIndex(3), 225);
/// assert_eq!(walk.stop(), StopIndex(3));
/// assert_eq!(walk.duration_in_seconds(), 225);
/// assert_eq!(walk.to_string(), "Walk 3m45s ~ 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walk {
    stop: StopIndex,
    duration: i32,
}

impl Walk {
    /// Creates a walk reaching `stop` in `duration` seconds.
    pub fn new(stop: StopIndex, duration: i32) -> Self {
        Self { stop, duration }
    }
}

impl RaptorTransfer for Walk {
    fn stop(&self) -> StopIndex {
        self.stop
    }

    fn duration_in_seconds(&self) -> i32 {
        self.duration
    }
}

impl std::fmt::Display for Walk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Walk {} ~ {}", duration_to_str(self.duration), self.stop)
    }
}

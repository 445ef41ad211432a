//! Trip identity and per-stop input records.

use std::fmt;
use std::sync::Arc;

/// Feed-level identifier of a trip.
///
/// Cheap to clone; the string is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(Arc<str>);

impl TripId {
    /// Create an identifier.
    pub fn new(id: &str) -> Self {
        TripId(Arc::from(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.0)
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TripId {
    fn from(value: &str) -> Self {
        TripId::new(value)
    }
}

/// Static description of a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub id: TripId,
    /// Headsign shown for every stop that has no stop-specific one.
    pub headsign: Option<String>,
}

impl Trip {
    /// Creates a trip without a headsign.
    pub fn new(id: impl Into<TripId>) -> Self {
        Self {
            id: id.into(),
            headsign: None,
        }
    }

    /// Sets the trip headsign.
    pub fn with_headsign(mut self, headsign: impl Into<String>) -> Self {
        self.headsign = Some(headsign.into());
        self
    }
}

/// Whether passengers may board (pickup) or alight (dropoff) at a stop.
///
/// Mirrors the GTFS `pickup_type` / `drop_off_type` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PickDrop {
    /// Regularly scheduled (code 0).
    #[default]
    Scheduled,
    /// Not available (code 1).
    None,
    /// Must phone the agency (code 2).
    CallAgency,
    /// Must coordinate with the driver (code 3).
    CoordinateWithDriver,
}

impl PickDrop {
    /// Parse a GTFS code. Unknown codes yield `None`.
    pub fn from_gtfs(code: i32) -> Option<Self> {
        match code {
            0 => Some(PickDrop::Scheduled),
            1 => Some(PickDrop::None),
            2 => Some(PickDrop::CallAgency),
            3 => Some(PickDrop::CoordinateWithDriver),
            _ => None,
        }
    }

    /// Returns the GTFS code.
    pub fn gtfs_code(self) -> i32 {
        match self {
            PickDrop::Scheduled => 0,
            PickDrop::None => 1,
            PickDrop::CallAgency => 2,
            PickDrop::CoordinateWithDriver => 3,
        }
    }

    /// Returns true unless passengers are barred entirely.
    pub fn is_routable(self) -> bool {
        self != PickDrop::None
    }
}

/// Booking requirements for demand-responsive stops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BookingInfo {
    pub message: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    /// Minimum notice, in seconds, required before departure.
    pub minimum_notice_secs: Option<i32>,
}

/// One scheduled stop of a trip, as delivered by the feed loader.
///
/// Times are absolute service-day seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub arrival: i32,
    pub departure: i32,
    /// GTFS `stop_sequence`; increasing but not necessarily contiguous.
    pub stop_sequence: u32,
    pub timepoint: bool,
    pub pickup: PickDrop,
    pub dropoff: PickDrop,
    pub stop_headsign: Option<String>,
    pub booking_info: Option<BookingInfo>,
}

impl StopTime {
    /// Creates a regular stop time marked as a timepoint.
    pub fn new(arrival: i32, departure: i32, stop_sequence: u32) -> Self {
        Self {
            arrival,
            departure,
            stop_sequence,
            timepoint: true,
            pickup: PickDrop::Scheduled,
            dropoff: PickDrop::Scheduled,
            stop_headsign: None,
            booking_info: None,
        }
    }

    /// Sets the stop headsign.
    pub fn with_headsign(mut self, headsign: impl Into<String>) -> Self {
        self.stop_headsign = Some(headsign.into());
        self
    }

    /// Sets pickup and dropoff types.
    pub fn with_pick_drop(mut self, pickup: PickDrop, dropoff: PickDrop) -> Self {
        self.pickup = pickup;
        self.dropoff = dropoff;
        self
    }

    /// Marks the stop time as interpolated rather than a timepoint.
    pub fn interpolated(mut self) -> Self {
        self.timepoint = false;
        self
    }

    /// Attaches booking information.
    pub fn with_booking_info(mut self, booking_info: BookingInfo) -> Self {
        self.booking_info = Some(booking_info);
        self
    }
}

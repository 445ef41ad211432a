//! Path error types.

use std::fmt;

use crate::domain::{StopIndex, time_to_str_long};

/// The four kinds of path leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegKind {
    Access,
    Transit,
    Transfer,
    Egress,
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LegKind::Access => "access",
            LegKind::Transit => "transit",
            LegKind::Transfer => "transfer",
            LegKind::Egress => "egress",
        };
        f.write_str(s)
    }
}

fn long_time(time: &i32) -> String {
    time_to_str_long(*time)
}

/// Errors from building or inspecting a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A typed accessor was used on the wrong kind of leg
    #[error("expected {expected} leg, found {found} leg")]
    LegKind { expected: LegKind, found: LegKind },

    /// Access legs have no origin stop, egress legs no destination stop
    #[error("{kind} leg has no {end} stop")]
    NoStop { kind: LegKind, end: &'static str },

    /// Leg sequence breaks the access / transit / egress structure
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    #[error("leg {index} ends at stop {to} but leg {} starts at stop {from}", .index + 1)]
    Disconnected {
        index: usize,
        to: StopIndex,
        from: StopIndex,
    },

    #[error("leg {} starts before leg {index} ends", .index + 1)]
    Overlap { index: usize },

    /// The trip has no visit matching the stop arrival
    #[error("{route} does not serve stop {stop} at {}", long_time(.time))]
    TripTimeNotFound {
        route: String,
        stop: StopIndex,
        time: i32,
    },
}

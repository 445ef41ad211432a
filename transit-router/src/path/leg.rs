//! Legs of an assembled path.
//!
//! Times are absolute service-day seconds, costs are domain units (see
//! [`crate::cost::to_domain_cost`]).

use std::fmt;
use std::sync::Arc;

use crate::domain::{StopIndex, TripSchedule, duration_to_str, time_to_str_compact};

use super::{LegKind, PathError};

/// Walk from the origin to the first stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessLeg {
    pub from_time: i32,
    pub to_time: i32,
    pub to_stop: StopIndex,
    pub generalized_cost: i32,
}

/// Ride on one trip.
#[derive(Debug)]
pub struct TransitLeg<T> {
    pub from_stop: StopIndex,
    pub to_stop: StopIndex,
    pub from_time: i32,
    pub to_time: i32,
    pub generalized_cost: i32,
    pub trip: Arc<T>,
    /// Pattern positions boarded and alighted.
    pub board_pos: usize,
    pub alight_pos: usize,
}

impl<T: TripSchedule> TransitLeg<T> {
    /// Route label, e.g. "BUS L11".
    pub fn route_label(&self) -> String {
        self.trip.pattern().debug_info()
    }

    /// Number of stops passed without alighting.
    pub fn intermediate_stop_count(&self) -> usize {
        self.alight_pos.saturating_sub(self.board_pos + 1)
    }
}

impl<T> Clone for TransitLeg<T> {
    fn clone(&self) -> Self {
        Self {
            from_stop: self.from_stop,
            to_stop: self.to_stop,
            from_time: self.from_time,
            to_time: self.to_time,
            generalized_cost: self.generalized_cost,
            trip: Arc::clone(&self.trip),
            board_pos: self.board_pos,
            alight_pos: self.alight_pos,
        }
    }
}

/// Two transit legs are equal when they ride the same trip instance
/// between the same positions at the same times and cost.
impl<T> PartialEq for TransitLeg<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.trip, &other.trip)
            && self.from_stop == other.from_stop
            && self.to_stop == other.to_stop
            && self.from_time == other.from_time
            && self.to_time == other.to_time
            && self.generalized_cost == other.generalized_cost
            && self.board_pos == other.board_pos
            && self.alight_pos == other.alight_pos
    }
}

impl<T> Eq for TransitLeg<T> {}

/// Walk between two stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferLeg {
    pub from_stop: StopIndex,
    pub to_stop: StopIndex,
    pub from_time: i32,
    pub to_time: i32,
    pub generalized_cost: i32,
}

/// Walk from the last stop to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EgressLeg {
    pub from_stop: StopIndex,
    pub from_time: i32,
    pub to_time: i32,
    pub generalized_cost: i32,
}

/// One leg of a [`Path`](super::Path).
#[derive(Debug)]
pub enum PathLeg<T> {
    Access(AccessLeg),
    Transit(TransitLeg<T>),
    Transfer(TransferLeg),
    Egress(EgressLeg),
}

impl<T> Clone for PathLeg<T> {
    fn clone(&self) -> Self {
        match self {
            PathLeg::Access(leg) => PathLeg::Access(*leg),
            PathLeg::Transit(leg) => PathLeg::Transit(leg.clone()),
            PathLeg::Transfer(leg) => PathLeg::Transfer(*leg),
            PathLeg::Egress(leg) => PathLeg::Egress(*leg),
        }
    }
}

impl<T> PartialEq for PathLeg<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathLeg::Access(a), PathLeg::Access(b)) => a == b,
            (PathLeg::Transit(a), PathLeg::Transit(b)) => a == b,
            (PathLeg::Transfer(a), PathLeg::Transfer(b)) => a == b,
            (PathLeg::Egress(a), PathLeg::Egress(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> Eq for PathLeg<T> {}

impl<T> PathLeg<T> {
    pub fn kind(&self) -> LegKind {
        match self {
            PathLeg::Access(_) => LegKind::Access,
            PathLeg::Transit(_) => LegKind::Transit,
            PathLeg::Transfer(_) => LegKind::Transfer,
            PathLeg::Egress(_) => LegKind::Egress,
        }
    }

    pub fn from_time(&self) -> i32 {
        match self {
            PathLeg::Access(leg) => leg.from_time,
            PathLeg::Transit(leg) => leg.from_time,
            PathLeg::Transfer(leg) => leg.from_time,
            PathLeg::Egress(leg) => leg.from_time,
        }
    }

    pub fn to_time(&self) -> i32 {
        match self {
            PathLeg::Access(leg) => leg.to_time,
            PathLeg::Transit(leg) => leg.to_time,
            PathLeg::Transfer(leg) => leg.to_time,
            PathLeg::Egress(leg) => leg.to_time,
        }
    }

    /// Seconds from start to end of the leg.
    pub fn duration(&self) -> i32 {
        self.to_time() - self.from_time()
    }

    /// Cost of this leg alone, domain units.
    pub fn generalized_cost(&self) -> i32 {
        match self {
            PathLeg::Access(leg) => leg.generalized_cost,
            PathLeg::Transit(leg) => leg.generalized_cost,
            PathLeg::Transfer(leg) => leg.generalized_cost,
            PathLeg::Egress(leg) => leg.generalized_cost,
        }
    }

    /// Stop the leg starts at. Access legs start at the origin.
    pub fn from_stop(&self) -> Result<StopIndex, PathError> {
        match self {
            PathLeg::Access(_) => Err(PathError::NoStop {
                kind: LegKind::Access,
                end: "from",
            }),
            PathLeg::Transit(leg) => Ok(leg.from_stop),
            PathLeg::Transfer(leg) => Ok(leg.from_stop),
            PathLeg::Egress(leg) => Ok(leg.from_stop),
        }
    }

    /// Stop the leg ends at. Egress legs end at the destination.
    pub fn to_stop(&self) -> Result<StopIndex, PathError> {
        match self {
            PathLeg::Access(leg) => Ok(leg.to_stop),
            PathLeg::Transit(leg) => Ok(leg.to_stop),
            PathLeg::Transfer(leg) => Ok(leg.to_stop),
            PathLeg::Egress(_) => Err(PathError::NoStop {
                kind: LegKind::Egress,
                end: "to",
            }),
        }
    }

    pub fn is_access(&self) -> bool {
        matches!(self, PathLeg::Access(_))
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, PathLeg::Transit(_))
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, PathLeg::Transfer(_))
    }

    pub fn is_egress(&self) -> bool {
        matches!(self, PathLeg::Egress(_))
    }

    pub fn as_access_leg(&self) -> Result<&AccessLeg, PathError> {
        match self {
            PathLeg::Access(leg) => Ok(leg),
            other => Err(other.mismatch(LegKind::Access)),
        }
    }

    pub fn as_transit_leg(&self) -> Result<&TransitLeg<T>, PathError> {
        match self {
            PathLeg::Transit(leg) => Ok(leg),
            other => Err(other.mismatch(LegKind::Transit)),
        }
    }

    pub fn as_transfer_leg(&self) -> Result<&TransferLeg, PathError> {
        match self {
            PathLeg::Transfer(leg) => Ok(leg),
            other => Err(other.mismatch(LegKind::Transfer)),
        }
    }

    pub fn as_egress_leg(&self) -> Result<&EgressLeg, PathError> {
        match self {
            PathLeg::Egress(leg) => Ok(leg),
            other => Err(other.mismatch(LegKind::Egress)),
        }
    }

    fn mismatch(&self, expected: LegKind) -> PathError {
        PathError::LegKind {
            expected,
            found: self.kind(),
        }
    }
}

impl<T: TripSchedule> PathLeg<T> {
    /// Label used in debug strings: "Walk" or the route, e.g. "BUS L11".
    pub fn label(&self) -> String {
        match self {
            PathLeg::Transit(leg) => leg.route_label(),
            _ => "Walk".to_string(),
        }
    }

    /// Single-leg debug string, e.g. `BUS L11 10:04-10:35(31m) ~ 2`.
    pub fn as_string(&self) -> String {
        let mut s = format!(
            "{} {}-{}({})",
            self.label(),
            time_to_str_compact(self.from_time()),
            time_to_str_compact(self.to_time()),
            duration_to_str(self.duration()),
        );
        if let Ok(stop) = self.to_stop() {
            s.push_str(&format!(" ~ {stop}"));
        }
        s
    }
}

impl<T: TripSchedule> fmt::Display for PathLeg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TransitMode, TripPattern, hms};

    #[derive(Debug)]
    struct Fixed(TripPattern);

    impl TripSchedule for Fixed {
        fn pattern(&self) -> &TripPattern {
            &self.0
        }

        fn arrival(&self, _stop_pos: usize) -> i32 {
            0
        }

        fn departure(&self, _stop_pos: usize) -> i32 {
            0
        }
    }

    fn trip() -> Arc<Fixed> {
        Arc::new(Fixed(TripPattern::new(
            TransitMode::Bus,
            "L11",
            vec![StopIndex(1), StopIndex(7), StopIndex(2)],
        )))
    }

    fn transit(trip: Arc<Fixed>) -> PathLeg<Fixed> {
        PathLeg::Transit(TransitLeg {
            from_stop: StopIndex(1),
            to_stop: StopIndex(2),
            from_time: hms(10, 4, 0),
            to_time: hms(10, 35, 0),
            generalized_cost: 1998,
            trip,
            board_pos: 0,
            alight_pos: 2,
        })
    }

    fn access() -> PathLeg<Fixed> {
        PathLeg::Access(AccessLeg {
            from_time: hms(10, 0, 0),
            to_time: hms(10, 3, 15),
            to_stop: StopIndex(1),
            generalized_cost: 390,
        })
    }

    fn egress() -> PathLeg<Fixed> {
        PathLeg::Egress(EgressLeg {
            from_stop: StopIndex(5),
            from_time: hms(11, 52, 15),
            to_time: hms(12, 0, 0),
            generalized_cost: 930,
        })
    }

    #[test]
    fn leg_strings() {
        assert_eq!(access().as_string(), "Walk 10:00-10:03:15(3m15s) ~ 1");
        assert_eq!(
            transit(trip()).as_string(),
            "BUS L11 10:04-10:35(31m) ~ 2"
        );
        assert_eq!(egress().as_string(), "Walk 11:52:15-12:00(7m45s)");
        assert_eq!(egress().to_string(), egress().as_string());
    }

    #[test]
    fn accessors() {
        let leg = transit(trip());
        assert_eq!(leg.kind(), LegKind::Transit);
        assert_eq!(leg.duration(), 31 * 60);
        assert_eq!(leg.generalized_cost(), 1998);
        assert_eq!(leg.from_stop(), Ok(StopIndex(1)));
        assert_eq!(leg.to_stop(), Ok(StopIndex(2)));
        assert!(leg.is_transit() && !leg.is_access() && !leg.is_transfer() && !leg.is_egress());

        let transit_leg = leg.as_transit_leg().unwrap();
        assert_eq!(transit_leg.intermediate_stop_count(), 1);
        assert_eq!(transit_leg.route_label(), "BUS L11");
    }

    #[test]
    fn missing_stops_are_errors() {
        assert_eq!(
            access().from_stop(),
            Err(PathError::NoStop {
                kind: LegKind::Access,
                end: "from"
            })
        );
        assert_eq!(
            egress().to_stop(),
            Err(PathError::NoStop {
                kind: LegKind::Egress,
                end: "to"
            })
        );
        assert_eq!(egress().from_stop(), Ok(StopIndex(5)));
    }

    #[test]
    fn wrong_kind_accessors() {
        let leg = access();
        assert!(leg.as_access_leg().is_ok());
        assert_eq!(
            leg.as_transit_leg().unwrap_err(),
            PathError::LegKind {
                expected: LegKind::Transit,
                found: LegKind::Access
            }
        );
        assert!(leg.as_transfer_leg().is_err());
        assert!(leg.as_egress_leg().is_err());
        assert!(egress().as_egress_leg().is_ok());
    }

    #[test]
    fn transit_equality_is_by_trip_identity() {
        let shared = trip();
        assert_eq!(transit(Arc::clone(&shared)), transit(Arc::clone(&shared)));
        assert_ne!(transit(shared), transit(trip()));
        assert_eq!(access().clone(), access());
        assert_ne!(access(), egress());
    }
}

//! The assembled path.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{
    StopIndex, TripSchedule, duration_to_str, time_to_str_compact, time_to_str_long, to_datetime,
};

use super::{AccessLeg, EgressLeg, PathError, PathLeg, TransitLeg};

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - First leg is access, last leg is egress, neither appears elsewhere
/// - At least one transit leg
/// - Transfers only between two transit legs
/// - Each leg starts at the stop the previous one ends at, and no earlier
///   than it ends
#[derive(Debug)]
pub struct Path<T> {
    legs: Vec<PathLeg<T>>,
    access: AccessLeg,
    egress: EgressLeg,
    generalized_cost: i32,
}

impl<T> Clone for Path<T> {
    fn clone(&self) -> Self {
        Self {
            legs: self.legs.clone(),
            access: self.access,
            egress: self.egress,
            generalized_cost: self.generalized_cost,
        }
    }
}

impl<T> PartialEq for Path<T> {
    fn eq(&self, other: &Self) -> bool {
        self.generalized_cost == other.generalized_cost && self.legs == other.legs
    }
}

impl<T> Eq for Path<T> {}

impl<T> Path<T> {
    /// Build a path from legs in travel order and the total cost in domain
    /// units.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the legs break any of the structural invariants.
    pub fn new(legs: Vec<PathLeg<T>>, generalized_cost: i32) -> Result<Self, PathError> {
        let access = match legs.first() {
            Some(PathLeg::Access(access)) => *access,
            _ => return Err(PathError::InvalidPath("first leg must be access")),
        };
        let egress = match legs.last() {
            Some(PathLeg::Egress(egress)) if legs.len() > 1 => *egress,
            _ => return Err(PathError::InvalidPath("last leg must be egress")),
        };

        let middle = &legs[1..legs.len() - 1];
        if middle.iter().any(|leg| leg.is_access() || leg.is_egress()) {
            return Err(PathError::InvalidPath(
                "access and egress only at the ends",
            ));
        }
        if !middle.iter().any(PathLeg::is_transit) {
            return Err(PathError::InvalidPath("no transit leg"));
        }
        if middle
            .iter()
            .any(|leg| matches!(leg, PathLeg::Transit(t) if t.alight_pos <= t.board_pos))
        {
            return Err(PathError::InvalidPath(
                "transit leg must alight after boarding",
            ));
        }

        for (index, pair) in legs.windows(2).enumerate() {
            let (leg, next) = (&pair[0], &pair[1]);
            if next.is_transfer() && !leg.is_transit() {
                return Err(PathError::InvalidPath(
                    "transfer must follow a transit leg",
                ));
            }
            if leg.is_transfer() && !next.is_transit() {
                return Err(PathError::InvalidPath(
                    "transfer must be followed by a transit leg",
                ));
            }
            let to = leg.to_stop()?;
            let from = next.from_stop()?;
            if to != from {
                return Err(PathError::Disconnected { index, to, from });
            }
            if next.from_time() < leg.to_time() {
                return Err(PathError::Overlap { index });
            }
        }

        Ok(Self {
            legs,
            access,
            egress,
            generalized_cost,
        })
    }

    pub fn legs(&self) -> &[PathLeg<T>] {
        &self.legs
    }

    pub fn access_leg(&self) -> &AccessLeg {
        &self.access
    }

    pub fn egress_leg(&self) -> &EgressLeg {
        &self.egress
    }

    pub fn transit_legs(&self) -> impl Iterator<Item = &TransitLeg<T>> {
        self.legs.iter().filter_map(|leg| leg.as_transit_leg().ok())
    }

    /// The first transit leg after the leg at `index`.
    pub fn next_transit_leg(&self, index: usize) -> Option<&TransitLeg<T>> {
        self.legs
            .iter()
            .skip(index + 1)
            .find_map(|leg| leg.as_transit_leg().ok())
    }

    pub fn start_time(&self) -> i32 {
        self.access.from_time
    }

    pub fn end_time(&self) -> i32 {
        self.egress.to_time
    }

    /// Door-to-door seconds.
    pub fn duration(&self) -> i32 {
        self.end_time() - self.start_time()
    }

    /// Total cost, domain units.
    pub fn generalized_cost(&self) -> i32 {
        self.generalized_cost
    }

    pub fn number_of_transfers(&self) -> usize {
        self.transit_legs().count().saturating_sub(1)
    }

    /// Stops visited in order: where each leg but the egress ends.
    pub fn stops(&self) -> Vec<StopIndex> {
        self.legs
            .iter()
            .filter_map(|leg| leg.to_stop().ok())
            .collect()
    }

    /// Departure from the origin on the given service date.
    pub fn start_datetime(&self, service_date: NaiveDate) -> Option<NaiveDateTime> {
        to_datetime(service_date, self.start_time())
    }

    /// Arrival at the destination on the given service date.
    pub fn end_datetime(&self, service_date: NaiveDate) -> Option<NaiveDateTime> {
        to_datetime(service_date, self.end_time())
    }
}

impl<T: TripSchedule> fmt::Display for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for leg in &self.legs {
            match leg {
                PathLeg::Access(access) => write!(
                    f,
                    "Walk {} ~ {} ~ ",
                    duration_to_str(leg.duration()),
                    access.to_stop
                )?,
                PathLeg::Transit(transit) => write!(
                    f,
                    "{} {} {} ~ {} ~ ",
                    transit.route_label(),
                    time_to_str_compact(transit.from_time),
                    time_to_str_compact(transit.to_time),
                    transit.to_stop
                )?,
                PathLeg::Transfer(transfer) => write!(
                    f,
                    "Walk {} ~ {} ~ ",
                    duration_to_str(leg.duration()),
                    transfer.to_stop
                )?,
                PathLeg::Egress(_) => write!(f, "Walk {} ", duration_to_str(leg.duration()))?,
            }
        }
        write!(
            f,
            "[{} {} {}, cost: {}]",
            time_to_str_long(self.start_time()),
            time_to_str_long(self.end_time()),
            duration_to_str(self.duration()),
            self.generalized_cost
        )
    }
}

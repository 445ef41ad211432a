//! Turning a finished stop-arrival chain into a [`Path`].
//!
//! A forward search produces chains running origin to destination, a
//! reverse search chains running destination to origin. Both assemble to
//! the same forward-ordered path.

use std::sync::Arc;

use tracing::debug;

use crate::cost::to_domain_cost;
use crate::domain::{StopIndex, TripSchedule};
use crate::raptor::{ArrivalKind, ChainNode, EgressId, SearchDirection, StopArrival, StopArrivals};

use super::{AccessLeg, EgressLeg, Path, PathError, PathLeg, TransferLeg, TransitLeg};

/// Assembles paths from chains produced by a search in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathAssembler {
    direction: SearchDirection,
}

impl PathAssembler {
    pub fn new(direction: SearchDirection) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Build the path ending in `egress`.
    ///
    /// Leg costs are the cost added by each arrival; the path cost is the
    /// chain's final accumulated cost. Both are converted to domain units.
    pub fn assemble<T: TripSchedule>(
        &self,
        arrivals: &StopArrivals<T>,
        egress: EgressId,
    ) -> Result<Path<T>, PathError> {
        // Tail first: egress, ..., access.
        let nodes: Vec<ChainNode<'_, T>> = arrivals.chain(egress).collect();
        let total = to_domain_cost(arrivals.get_egress(egress).cost());

        let legs = match self.direction {
            SearchDirection::Forward => forward_legs(&nodes)?,
            SearchDirection::Reverse => reverse_legs(&nodes)?,
        };
        let path = Path::new(legs, total)?;

        debug!(
            direction = ?self.direction,
            legs = path.legs().len(),
            cost = path.generalized_cost(),
            "assembled path"
        );
        Ok(path)
    }
}

/// Cost added by `nodes[i]` over the node it extends, in domain units.
fn leg_cost<T>(nodes: &[ChainNode<'_, T>], i: usize) -> i32 {
    let previous = nodes.get(i + 1).map_or(0, |node| node.cost());
    to_domain_cost(nodes[i].cost() - previous)
}

/// Stop of the arrival `nodes[i]` extends.
fn previous_stop<T>(nodes: &[ChainNode<'_, T>], i: usize) -> Result<StopIndex, PathError> {
    nodes
        .get(i + 1)
        .and_then(|node| node.stop().ok())
        .ok_or(PathError::InvalidPath("arrival has no predecessor stop"))
}

const FORWARD: SearchDirection = SearchDirection::Forward;
const REVERSE: SearchDirection = SearchDirection::Reverse;

/// Forward chain: each node is where a leg ends.
fn forward_legs<T: TripSchedule>(nodes: &[ChainNode<'_, T>]) -> Result<Vec<PathLeg<T>>, PathError> {
    let mut legs = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate().rev() {
        let generalized_cost = leg_cost(nodes, i);
        let leg = match *node {
            ChainNode::Egress(egress) => {
                check_walk(FORWARD, egress.from_time(), egress.time())?;
                PathLeg::Egress(EgressLeg {
                    from_stop: previous_stop(nodes, i)?,
                    from_time: egress.from_time(),
                    to_time: egress.time(),
                    generalized_cost,
                })
            }
            ChainNode::Arrival(arrival) => match arrival.kind() {
                ArrivalKind::Access { from_time } => {
                    check_walk(FORWARD, *from_time, arrival.time())?;
                    PathLeg::Access(AccessLeg {
                        from_time: *from_time,
                        to_time: arrival.time(),
                        to_stop: arrival.stop(),
                        generalized_cost,
                    })
                }
                ArrivalKind::Transfer { from_time } => {
                    check_walk(FORWARD, *from_time, arrival.time())?;
                    PathLeg::Transfer(TransferLeg {
                        from_stop: previous_stop(nodes, i)?,
                        to_stop: arrival.stop(),
                        from_time: *from_time,
                        to_time: arrival.time(),
                        generalized_cost,
                    })
                }
                ArrivalKind::Transit { .. } => transit_leg(FORWARD, arrival, generalized_cost)?,
            },
        };
        legs.push(leg);
    }
    Ok(legs)
}

/// Reverse chain: each node is where a leg starts, and time runs
/// backwards, so node times become leg start times.
fn reverse_legs<T: TripSchedule>(nodes: &[ChainNode<'_, T>]) -> Result<Vec<PathLeg<T>>, PathError> {
    let mut legs = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        let generalized_cost = leg_cost(nodes, i);
        let leg = match *node {
            ChainNode::Egress(egress) => {
                check_walk(REVERSE, egress.from_time(), egress.time())?;
                PathLeg::Access(AccessLeg {
                    from_time: egress.time(),
                    to_time: egress.from_time(),
                    to_stop: previous_stop(nodes, i)?,
                    generalized_cost,
                })
            }
            ChainNode::Arrival(arrival) => match arrival.kind() {
                ArrivalKind::Access { from_time } => {
                    check_walk(REVERSE, *from_time, arrival.time())?;
                    PathLeg::Egress(EgressLeg {
                        from_stop: arrival.stop(),
                        from_time: arrival.time(),
                        to_time: *from_time,
                        generalized_cost,
                    })
                }
                ArrivalKind::Transfer { from_time } => {
                    check_walk(REVERSE, *from_time, arrival.time())?;
                    PathLeg::Transfer(TransferLeg {
                        from_stop: arrival.stop(),
                        to_stop: previous_stop(nodes, i)?,
                        from_time: arrival.time(),
                        to_time: *from_time,
                        generalized_cost,
                    })
                }
                ArrivalKind::Transit { .. } => transit_leg(REVERSE, arrival, generalized_cost)?,
            },
        };
        legs.push(leg);
    }
    Ok(legs)
}

/// A walk node must not end before it starts in search order.
fn check_walk(direction: SearchDirection, from_time: i32, to_time: i32) -> Result<(), PathError> {
    if direction.duration_between(from_time, to_time) < 0 {
        return Err(PathError::InvalidPath("walk ends before it starts"));
    }
    Ok(())
}

/// Transit leg for a ride node.
///
/// Both ends are matched by stop and time, so routes that visit a stop
/// more than once resolve to the same positions in either direction.
fn transit_leg<T: TripSchedule>(
    direction: SearchDirection,
    arrival: &StopArrival<T>,
    generalized_cost: i32,
) -> Result<PathLeg<T>, PathError> {
    let ArrivalKind::Transit {
        board_stop,
        board_time,
        trip,
    } = arrival.kind()
    else {
        return Err(PathError::InvalidPath("expected a transit arrival"));
    };
    if direction.is_before(arrival.time(), *board_time) {
        return Err(PathError::InvalidPath("ride arrives before it is boarded"));
    }

    let ((from_stop, from_time), (to_stop, to_time)) = if direction.is_forward() {
        ((*board_stop, *board_time), (arrival.stop(), arrival.time()))
    } else {
        ((arrival.stop(), arrival.time()), (*board_stop, *board_time))
    };

    let trip_ref = trip.as_ref();
    let pattern = trip_ref.pattern();
    let board_pos = trip_ref
        .find_departure_stop_position(from_time, from_stop)
        .ok_or_else(|| not_found(trip_ref, from_stop, from_time))?;
    let alight_pos = (board_pos + 1..pattern.number_of_stops())
        .find(|&p| pattern.stop_index(p) == to_stop && trip_ref.arrival(p) == to_time)
        .ok_or_else(|| not_found(trip_ref, to_stop, to_time))?;

    Ok(PathLeg::Transit(TransitLeg {
        from_stop,
        to_stop,
        from_time,
        to_time,
        generalized_cost,
        trip: Arc::clone(trip),
        board_pos,
        alight_pos,
    }))
}

fn not_found<T: TripSchedule>(trip: &T, stop: StopIndex, time: i32) -> PathError {
    PathError::TripTimeNotFound {
        route: trip.pattern().debug_info(),
        stop,
        time,
    }
}

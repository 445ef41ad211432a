//! Stop-arrival chains built by the round-based search.
//!
//! Every time the search reaches a stop (or the destination) it records a
//! stop arrival pointing back at the arrival it was extended from. A chain
//! always starts with an access arrival and, once complete, ends with an
//! egress arrival. Arrivals are immutable once created and live in an
//! arena owned by the request.

use std::fmt;
use std::sync::Arc;

use id_arena::{Arena, ArenaBehavior};

use crate::domain::StopIndex;

/// Handle of an access, transit or transfer arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrivalId {
    arena_id: u32,
    index: usize,
}

/// Handle of a completed chain's egress arrival.
///
/// Distinct from [`ArrivalId`] so an egress can never be extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EgressId {
    arena_id: u32,
    index: usize,
}

#[derive(Debug, Clone)]
struct ArrivalIds;

impl ArenaBehavior for ArrivalIds {
    type Id = ArrivalId;

    fn new_id(arena_id: u32, index: usize) -> ArrivalId {
        ArrivalId { arena_id, index }
    }

    fn index(id: ArrivalId) -> usize {
        id.index
    }

    fn arena_id(id: ArrivalId) -> u32 {
        id.arena_id
    }
}

#[derive(Debug, Clone)]
struct EgressIds;

impl ArenaBehavior for EgressIds {
    type Id = EgressId;

    fn new_id(arena_id: u32, index: usize) -> EgressId {
        EgressId { arena_id, index }
    }

    fn index(id: EgressId) -> usize {
        id.index
    }

    fn arena_id(id: EgressId) -> u32 {
        id.arena_id
    }
}

/// How a stop arrival was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrivalMode {
    Access,
    Transit,
    Transfer,
    Egress,
}

impl fmt::Display for ArrivalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArrivalMode::Access => "Access",
            ArrivalMode::Transit => "Transit",
            ArrivalMode::Transfer => "Transfer",
            ArrivalMode::Egress => "Egress",
        };
        f.write_str(s)
    }
}

/// Data specific to each kind of non-terminal arrival.
#[derive(Debug)]
pub enum ArrivalKind<T> {
    /// Walk from the origin (forward) or destination (reverse).
    Access { from_time: i32 },
    /// Ride on `trip`, boarded at `board_stop` at `board_time`.
    ///
    /// In a reverse search `board_stop` is where the trip is left and
    /// `board_time` is the trip's arrival there.
    Transit {
        board_stop: StopIndex,
        board_time: i32,
        trip: Arc<T>,
    },
    /// Walk between two stops.
    Transfer { from_time: i32 },
}

/// An access, transit or transfer arrival at a stop.
///
/// `time` is the arrival time in search direction: the time the stop is
/// reached in a forward search, the time it must be left in a reverse one.
#[derive(Debug)]
pub struct StopArrival<T> {
    round: u32,
    stop: StopIndex,
    time: i32,
    cost: i32,
    previous: Option<ArrivalId>,
    kind: ArrivalKind<T>,
}

impl<T> StopArrival<T> {
    /// Number of transit boardings up to and including this arrival.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn stop(&self) -> StopIndex {
        self.stop
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    /// Accumulated generalized cost, internal units.
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// The arrival this one extends. `None` only for access.
    pub fn previous(&self) -> Option<ArrivalId> {
        self.previous
    }

    pub fn kind(&self) -> &ArrivalKind<T> {
        &self.kind
    }

    pub fn mode(&self) -> ArrivalMode {
        match self.kind {
            ArrivalKind::Access { .. } => ArrivalMode::Access,
            ArrivalKind::Transit { .. } => ArrivalMode::Transit,
            ArrivalKind::Transfer { .. } => ArrivalMode::Transfer,
        }
    }

    /// Start time of the walk for access and transfer arrivals.
    pub fn from_time(&self) -> Option<i32> {
        match self.kind {
            ArrivalKind::Access { from_time } | ArrivalKind::Transfer { from_time } => {
                Some(from_time)
            }
            ArrivalKind::Transit { .. } => None,
        }
    }

    /// Time the trip was boarded, for transit arrivals.
    pub fn board_time(&self) -> Option<i32> {
        match self.kind {
            ArrivalKind::Transit { board_time, .. } => Some(board_time),
            _ => None,
        }
    }

    /// The trip ridden, for transit arrivals.
    pub fn trip(&self) -> Option<&Arc<T>> {
        match &self.kind {
            ArrivalKind::Transit { trip, .. } => Some(trip),
            _ => None,
        }
    }

    pub fn is_transit(&self) -> bool {
        matches!(self.kind, ArrivalKind::Transit { .. })
    }
}

/// The terminal arrival at the destination (forward) or origin (reverse).
///
/// It is not at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EgressArrival {
    round: u32,
    from_time: i32,
    time: i32,
    cost: i32,
    previous: ArrivalId,
}

impl EgressArrival {
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn from_time(&self) -> i32 {
        self.from_time
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn previous(&self) -> ArrivalId {
        self.previous
    }
}

/// Any node of a chain, as seen while walking it.
#[derive(Debug)]
pub enum ChainNode<'a, T> {
    Arrival(&'a StopArrival<T>),
    Egress(&'a EgressArrival),
}

impl<T> Clone for ChainNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ChainNode<'_, T> {}

impl<'a, T> ChainNode<'a, T> {
    pub fn round(self) -> u32 {
        match self {
            ChainNode::Arrival(a) => a.round(),
            ChainNode::Egress(e) => e.round(),
        }
    }

    pub fn time(self) -> i32 {
        match self {
            ChainNode::Arrival(a) => a.time(),
            ChainNode::Egress(e) => e.time(),
        }
    }

    pub fn cost(self) -> i32 {
        match self {
            ChainNode::Arrival(a) => a.cost(),
            ChainNode::Egress(e) => e.cost(),
        }
    }

    pub fn mode(self) -> ArrivalMode {
        match self {
            ChainNode::Arrival(a) => a.mode(),
            ChainNode::Egress(_) => ArrivalMode::Egress,
        }
    }

    pub fn previous(self) -> Option<ArrivalId> {
        match self {
            ChainNode::Arrival(a) => a.previous(),
            ChainNode::Egress(e) => Some(e.previous()),
        }
    }

    /// The stop reached. Egress arrivals have none.
    pub fn stop(self) -> Result<StopIndex, ChainError> {
        match self {
            ChainNode::Arrival(a) => Ok(a.stop()),
            ChainNode::Egress(_) => Err(ChainError::NoStop),
        }
    }

    pub fn as_arrival(self) -> Option<&'a StopArrival<T>> {
        match self {
            ChainNode::Arrival(a) => Some(a),
            ChainNode::Egress(_) => None,
        }
    }
}

/// Broken chain invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("egress arrival has no stop")]
    NoStop,

    /// Positions count from the access arrival (0).
    #[error("cost decreases at position {position}: {previous} -> {cost}")]
    CostDecreased {
        position: usize,
        previous: i32,
        cost: i32,
    },

    #[error("round decreases at position {position}: {previous} -> {round}")]
    RoundDecreased {
        position: usize,
        previous: u32,
        round: u32,
    },

    #[error("round increases at position {position} without boarding a new trip")]
    UnexpectedRoundIncrease { position: usize },

    #[error("chain does not start with an access arrival")]
    MissingAccess,
}

/// Arena of stop arrivals for one search request.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use transit_router::domain::StopIndex;
/// use transit_router::raptor::StopArrivals;
/// use transit_router::timetable::ScheduledTrip;
///
/// let mut arrivals: StopArrivals<ScheduledTrip> = StopArrivals::new();
/// let access = arrivals.access(StopIndex(1), 36_000, 36_195, 39_000);
/// let egress = arrivals.egress(36_195, 36_300, 1_000, access);
///
/// assert_eq!(arrivals.get_egress(egress).cost(), 40_000);
/// assert_eq!(arrivals.chain(egress).count(), 2);
/// assert!(arrivals.validate_chain(egress).is_ok());
/// ```
#[derive(Debug)]
pub struct StopArrivals<T> {
    arrivals: Arena<StopArrival<T>, ArrivalIds>,
    egresses: Arena<EgressArrival, EgressIds>,
}

impl<T> Default for StopArrivals<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StopArrivals<T> {
    pub fn new() -> Self {
        Self {
            arrivals: Arena::new(),
            egresses: Arena::new(),
        }
    }

    /// Root arrival: walked from `from_time` to reach `stop` at `to_time`.
    pub fn access(&mut self, stop: StopIndex, from_time: i32, to_time: i32, cost: i32) -> ArrivalId {
        self.arrivals.alloc(StopArrival {
            round: 0,
            stop,
            time: to_time,
            cost,
            previous: None,
            kind: ArrivalKind::Access { from_time },
        })
    }

    /// Ride `trip` from the previous arrival's stop, boarded at
    /// `board_time`, to `alight_stop`.
    pub fn board_transit(
        &mut self,
        round: u32,
        alight_stop: StopIndex,
        arrival_time: i32,
        board_time: i32,
        leg_cost: i32,
        trip: Arc<T>,
        previous: ArrivalId,
    ) -> ArrivalId {
        let prev = &self.arrivals[previous];
        let arrival = StopArrival {
            round,
            stop: alight_stop,
            time: arrival_time,
            cost: prev.cost + leg_cost,
            previous: Some(previous),
            kind: ArrivalKind::Transit {
                board_stop: prev.stop,
                board_time,
                trip,
            },
        };
        self.arrivals.alloc(arrival)
    }

    /// Walk from the previous arrival's stop to `to_stop`.
    pub fn transfer(
        &mut self,
        round: u32,
        to_stop: StopIndex,
        from_time: i32,
        to_time: i32,
        leg_cost: i32,
        previous: ArrivalId,
    ) -> ArrivalId {
        let cost = self.arrivals[previous].cost + leg_cost;
        self.arrivals.alloc(StopArrival {
            round,
            stop: to_stop,
            time: to_time,
            cost,
            previous: Some(previous),
            kind: ArrivalKind::Transfer { from_time },
        })
    }

    /// Complete a chain. The egress keeps the previous arrival's round.
    pub fn egress(&mut self, from_time: i32, to_time: i32, leg_cost: i32, previous: ArrivalId) -> EgressId {
        let prev = &self.arrivals[previous];
        let egress = EgressArrival {
            round: prev.round,
            from_time,
            time: to_time,
            cost: prev.cost + leg_cost,
            previous,
        };
        self.egresses.alloc(egress)
    }

    /// # Panics
    ///
    /// Panics if `id` belongs to another arena.
    pub fn get(&self, id: ArrivalId) -> &StopArrival<T> {
        &self.arrivals[id]
    }

    /// # Panics
    ///
    /// Panics if `id` belongs to another arena.
    pub fn get_egress(&self, id: EgressId) -> &EgressArrival {
        &self.egresses[id]
    }

    /// Number of arrivals held, egress included.
    pub fn len(&self) -> usize {
        self.arrivals.len() + self.egresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walk a completed chain from the egress back to the access.
    pub fn chain(&self, egress: EgressId) -> Chain<'_, T> {
        Chain {
            arrivals: self,
            next: Some(ChainNode::Egress(self.get_egress(egress))),
        }
    }

    /// Walk from `id` back to the access.
    pub fn ancestors(&self, id: ArrivalId) -> Chain<'_, T> {
        Chain {
            arrivals: self,
            next: Some(ChainNode::Arrival(self.get(id))),
        }
    }

    /// Check cost monotonicity and round rules along a completed chain.
    pub fn validate_chain(&self, egress: EgressId) -> Result<(), ChainError> {
        let mut nodes: Vec<ChainNode<'_, T>> = self.chain(egress).collect();
        nodes.reverse();

        match nodes.first() {
            Some(node) if node.mode() == ArrivalMode::Access => {}
            _ => return Err(ChainError::MissingAccess),
        }

        for (position, pair) in nodes.windows(2).enumerate() {
            let (prev, node) = (pair[0], pair[1]);
            let position = position + 1;

            if node.cost() < prev.cost() {
                return Err(ChainError::CostDecreased {
                    position,
                    previous: prev.cost(),
                    cost: node.cost(),
                });
            }
            if node.round() < prev.round() {
                return Err(ChainError::RoundDecreased {
                    position,
                    previous: prev.round(),
                    round: node.round(),
                });
            }
            if node.round() > prev.round() && !boards_new_trip(prev, node) {
                return Err(ChainError::UnexpectedRoundIncrease { position });
            }
        }
        Ok(())
    }
}

/// True if `node` is a transit arrival on a different trip than `prev`.
fn boards_new_trip<T>(prev: ChainNode<'_, T>, node: ChainNode<'_, T>) -> bool {
    let Some(trip) = node.as_arrival().and_then(StopArrival::trip) else {
        return false;
    };
    match prev.as_arrival().and_then(StopArrival::trip) {
        Some(prev_trip) => !Arc::ptr_eq(prev_trip, trip),
        None => true,
    }
}

/// Iterator from a node back to the access arrival.
pub struct Chain<'a, T> {
    arrivals: &'a StopArrivals<T>,
    next: Option<ChainNode<'a, T>>,
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = ChainNode<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current
            .previous()
            .map(|id| ChainNode::Arrival(self.arrivals.get(id)));
        Some(current)
    }
}

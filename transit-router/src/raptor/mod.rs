//! Round-based search state.
//!
//! The search loop itself lives with the caller; this module provides the
//! stop-arrival arena it writes to, direction-agnostic time arithmetic and
//! a helper that extends forward chains with the configured slack and cost
//! models.

mod direction;
mod extend;
mod stop_arrival;

pub use direction::SearchDirection;
pub use extend::{ExtendError, ForwardExtender};
pub use stop_arrival::{
    ArrivalId, ArrivalKind, ArrivalMode, Chain, ChainError, ChainNode, EgressArrival, EgressId,
    StopArrival, StopArrivals,
};

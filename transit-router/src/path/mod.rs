//! Paths assembled from finished stop-arrival chains.
//!
//! A [`Path`] is the immutable, forward-ordered result handed back to the
//! caller: one access leg, one or more transit legs with optional walking
//! transfers between them, and one egress leg.

mod assembler;
mod error;
mod itinerary;
mod leg;


pub use assembler::PathAssembler;
pub use error::{LegKind, PathError};
pub use itinerary::Path;
pub use leg::{AccessLeg, EgressLeg, PathLeg, TransferLeg, TransitLeg};

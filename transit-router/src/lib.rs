//! Transit router core.
//!
//! Building blocks of a round-based (RAPTOR-style) public transit router:
//! trip times with a realtime overlay, a generalized cost model, slack
//! rules, the stop-arrival chains a search produces, and the assembly of
//! those chains into paths.

pub mod config;
pub mod cost;
pub mod domain;
pub mod path;
pub mod raptor;
pub mod slack;
pub mod timetable;

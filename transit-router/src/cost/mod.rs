//! Generalized cost model.
//!
//! Costs combine time and weighted penalties (waiting, boarding,
//! transferring, walking) into one integer so arrivals can be compared.

mod calculator;
mod converter;

pub use calculator::{CostCalculator, DefaultCostCalculator};
pub use converter::{
    COST_SCALE, to_domain_cost, to_raptor_cost, to_raptor_cost_secs, to_raptor_costs,
};

//! Conversion between domain costs and the router's fixed-point costs.
//!
//! The search compares costs millions of times per request, so it works in
//! integers scaled by 100: one internal unit is a hundredth of a
//! time-equivalent second. Everything outside the router sees whole units.

/// Internal units per domain unit.
pub const COST_SCALE: i32 = 100;

/// Convert a domain cost (seconds, possibly fractional) to internal units.
///
/// # Examples
///
/// ```
/// use transit_router::cost::to_raptor_cost;
///
/// assert_eq!(to_raptor_cost(390.0), 39_000);
/// assert_eq!(to_raptor_cost(0.255), 26);
/// ```
pub fn to_raptor_cost(domain_cost: f64) -> i32 {
    (domain_cost * f64::from(COST_SCALE)).round() as i32
}

/// Convert a whole number of domain units to internal units.
pub fn to_raptor_cost_secs(domain_cost: i32) -> i32 {
    domain_cost * COST_SCALE
}

/// Convert per-stop costs given in seconds to internal units.
pub fn to_raptor_costs(domain_costs: &[i32]) -> Vec<i32> {
    domain_costs.iter().map(|&c| to_raptor_cost_secs(c)).collect()
}

/// Convert internal units back to the nearest whole domain unit.
///
/// Halves round up, so a value already expressed in whole domain units
/// survives a round trip through [`to_raptor_cost`] unchanged.
///
/// # Examples
///
/// ```
/// use transit_router::cost::to_domain_cost;
///
/// assert_eq!(to_domain_cost(818_400), 8184);
/// assert_eq!(to_domain_cost(149), 1);
/// assert_eq!(to_domain_cost(150), 2);
/// ```
pub fn to_domain_cost(raptor_cost: i32) -> i32 {
    (raptor_cost + COST_SCALE / 2).div_euclid(COST_SCALE)
}

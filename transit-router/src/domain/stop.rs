//! Stop index type.

use std::fmt;

/// Index of a stop in the transit network's stop table.
///
/// The router never looks at stop names or coordinates; it only needs a
/// dense index it can use to address per-stop tables such as stop costs.
///
/// # Examples
///
/// ```
/// use transit_router::domain::StopIndex;
///
/// let a = StopIndex(1);
/// assert_eq!(a.to_string(), "1");
/// assert_eq!(usize::from(a), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Returns the raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopIndex {
    fn from(value: usize) -> Self {
        StopIndex(value)
    }
}

impl From<StopIndex> for usize {
    fn from(value: StopIndex) -> Self {
        value.0
    }
}

//! Direction-agnostic time arithmetic.
//!
//! A forward search moves later in time from the origin; a reverse search
//! moves earlier from the destination. Code written against
//! [`SearchDirection`] works for both.

/// Which way a search runs through time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Reverse,
}

impl SearchDirection {
    pub fn is_forward(self) -> bool {
        self == SearchDirection::Forward
    }

    /// True if `a` is reached strictly before `b` when searching.
    pub fn is_before(self, a: i32, b: i32) -> bool {
        match self {
            SearchDirection::Forward => a < b,
            SearchDirection::Reverse => a > b,
        }
    }

    /// Non-negative seconds from `from` to `to` when `to` is not before
    /// `from`.
    pub fn duration_between(self, from: i32, to: i32) -> i32 {
        match self {
            SearchDirection::Forward => to - from,
            SearchDirection::Reverse => from - to,
        }
    }
}

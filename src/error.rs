//! Errors raised by [`Tree`][crate::Tree] operations.

use thiserror::Error;

use crate::value::{Value, ValueFamily};

/// Every failure a tree operation can report. All of them are invalid-argument conditions: they are
/// returned to the immediate caller and never retried or swallowed internally. Deleting a value that
/// isn't present is *not* an error (see [`Tree::delete`][crate::Tree::delete]).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The value has no place in a total order (a `NaN` float).
    #[error("value {0} is not totally ordered")]
    Unordered(Value),

    /// The value belongs to a different family than the values already in the tree.
    #[error("{value} is a {found} value but the tree holds {expected} values")]
    MixedFamily {
        /// The rejected value.
        value: Value,
        /// The family the tree is committed to.
        expected: ValueFamily,
        /// The family of `value`.
        found: ValueFamily,
    },

    /// A range whose start lies after its end.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange {
        /// Lower bound as given.
        start: Value,
        /// Upper bound as given.
        end: Value,
    },
}

impl Error {
    /// Whether this error stems from a bad argument. Always true today; kept so callers can tell
    /// argument errors apart should other kinds ever appear.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::Unordered(_) | Self::MixedFamily { .. } | Self::InvalidRange { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

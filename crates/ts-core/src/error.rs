//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

/// Errors raised by `ts-core` primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A value was rejected at the point of construction or mutation.
    #[error("invalid argument `{what}`: {reason}")]
    InvalidArgument {
        what:   &'static str,
        reason: String,
    },

    /// A non-looping segment chain ran out before the travel budget did.
    #[error("travel budget exceeds path length by {remainder}")]
    BudgetExceedsPathLength { remainder: f64 },
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidArgument`].
    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument { what, reason: reason.into() }
    }
}

/// Shorthand result type for `ts-core`.
pub type CoreResult<T> = Result<T, CoreError>;

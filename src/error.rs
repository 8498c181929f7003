// src/error.rs

use thiserror::Error;

/// Errors raised by tracker construction and fit conversion.
///
/// Every variant is a caller programming error reported synchronously at the
/// call that caused it. The tracker performs no I/O and cannot fail
/// transiently, so there is no recoverable/fatal split and nothing to retry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackingError {
    /// A tracker was constructed with a history capacity of zero. A
    /// zero-capacity buffer never retains a fit, which would make the
    /// smoothed mean undefined.
    #[error("history capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// A coefficient slice did not hold exactly the 3 values of a
    /// quadratic fit.
    #[error("expected 3 polynomial coefficients, got {len}")]
    MalformedFit { len: usize },

    /// A coefficient was NaN or infinite. Index is the position (0 = a,
    /// 1 = b, 2 = c) of the first offending value.
    #[error("non-finite polynomial coefficient at index {index}")]
    NonFiniteCoefficient { index: usize },
}

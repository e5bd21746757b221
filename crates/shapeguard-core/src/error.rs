//! # Error Types
//!
//! Errors raised while moving values across the JSON boundary. Validation
//! failures are not errors at this level: they are data, recorded in the
//! validation tree by `shapeguard-schema`.

use thiserror::Error;

/// Error converting a [`Value`](crate::Value) to JSON.
#[derive(Error, Debug)]
pub enum ValueError {
    /// JSON has no representation for NaN or infinities.
    #[error("number {0} cannot be represented in JSON")]
    NonFiniteNumber(f64),
}

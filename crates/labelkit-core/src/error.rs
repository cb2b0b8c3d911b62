//! Geometry errors
//!
//! The interactive editing paths never fail: stale references degrade to
//! no-ops and bad geometry is clamped. These types cover the places where a
//! caller hands the core a value it cannot use at all.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a value cannot describe a usable rectangle or size.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate or length is NaN or infinite
    #[error("Non-finite value for {what}: {value}")]
    NonFinite {
        /// Which quantity was rejected.
        what: String,
        /// The offending value.
        value: f64,
    },

    /// A size has a negative dimension
    #[error("Invalid size {width}x{height}")]
    InvalidSize {
        /// The requested width.
        width: f64,
        /// The requested height.
        height: f64,
    },
}

/// Reject NaN and infinite values.
pub fn ensure_finite(what: &str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::NonFinite {
            what: what.to_string(),
            value,
        })
    }
}

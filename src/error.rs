//! Error types for the simulation.
//!
//! Only construction and configuration can fail. Runtime outcomes such as a
//! full field or a click on empty space are no-ops, not errors.

use thiserror::Error;

/// Errors that can occur while building bodies, worlds or settings.
#[derive(Debug, Error)]
pub enum SimError {
    /// Body radius must be finite and strictly positive.
    #[error("invalid geometry: radius must be positive, got {radius}")]
    InvalidGeometry {
        /// The rejected radius.
        radius: f64,
    },

    /// Restitution must lie in [0, 1].
    #[error("invalid restitution {0}: expected a value in [0, 1]")]
    InvalidRestitution(f64),

    /// Field dimensions must be finite and strictly positive.
    #[error("invalid field: {width}x{height}")]
    InvalidField {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// A settings value is out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Reading a settings file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

//! Ball Field - a 2D field of colliding balls
//!
//! Core modules:
//! - `sim`: Simulation engine (bodies, collisions, boundaries, placement)
//! - `settings`: Data-driven simulation tuning
//! - `render`: Drawable capability for a presentation layer
//! - `error`: Error types
//! - `web`: wasm-bindgen host bindings (wasm32 only)

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Result, SimError};
pub use settings::SimSettings;
pub use sim::{Body, BodyId, Color, InteractionMode, World};

/// Simulation configuration constants
pub mod consts {
    /// Body density (mass = density * π * r²)
    pub const DENSITY: f64 = 1.0;
    /// Default restitution for new bodies and wall bounces
    pub const RESTITUTION: f64 = 0.5;
    /// Velocity decay per tick
    pub const FRICTION: f64 = 0.001;

    /// Field defaults
    pub const FIELD_WIDTH: f64 = 800.0;
    pub const FIELD_HEIGHT: f64 = 600.0;

    /// Cue (pointer) body
    pub const CUE_RADIUS: f64 = 12.0;
    /// Fraction of pointer velocity transferred to the cue body
    pub const CUE_STRENGTH: f64 = 0.3;

    /// Random placement
    pub const MIN_SPAWN_RADIUS: f64 = 25.0;
    /// Largest random radius is min(width, height) / ratio
    pub const SPAWN_RADIUS_RATIO: f64 = 10.0;
    pub const SPAWN_MAX_SPEED: f64 = 10.0;
    /// Rejection sampling cap, keeps placement bounded on a full field
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Debug velocity vectors are drawn this many ticks long
    pub const DEBUG_VECTOR_SCALE: f64 = 10.0;
}

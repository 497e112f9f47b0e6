//! Simulation module
//!
//! All physics lives here. This module is pure and synchronous:
//! - One `World::update()` per tick, run to completion
//! - Seeded RNG only (placement)
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod frame;
pub mod geometry;
pub mod spawner;
pub mod world;

pub use body::{Body, BodyId, Color};
pub use frame::{FrameInput, advance};
pub use geometry::Field;
pub use spawner::{Placement, Spawner};
pub use world::{InteractionMode, Snapshot, World, resolve_border};

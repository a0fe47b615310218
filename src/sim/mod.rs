//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick cadence only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tether;
pub mod tick;
pub mod world;

pub use camera::Camera;
pub use collision::{PickupResult, find_anchor};
pub use state::{
    Attachment, Collectible, CollectibleKind, Entity, GameEvent, GamePhase, GameState, Hazard, Obstacle,
    ObstacleKind, Particle, Snapshot, StiffnessBoost, Tether, TetherPhase, WebShot,
};
pub use tick::{TickInput, tick};

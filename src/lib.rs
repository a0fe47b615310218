//! Webster - A side-scrolling web-swinging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, tether, collisions, world generation, game state)
//! - `tuning`: Data-driven game balance
//! - `error`: Fatal configuration errors
//!
//! Rendering, audio and raw input polling live outside this crate. They read
//! [`sim::GameState`] each frame and forward player commands into it.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Viewport dimensions in world units
    pub const VIEWPORT_WIDTH: f32 = 640.0;
    pub const VIEWPORT_HEIGHT: f32 = 480.0;

    /// Canonical start position (viewport center)
    pub const ENTITY_START: Vec2 = Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0);
    pub const ENTITY_RADIUS: f32 = 15.0;

    /// Falling below this world y ends the run
    pub const FALL_LIMIT: f32 = 1500.0;

    /// Wobble amplitude (world units) and angular rate (radians per tick)
    pub const WOBBLE_AMPLITUDE: f32 = 5.0;
    pub const WOBBLE_RATE: f32 = 0.1;

    /// Cosmetic background themes (RGB)
    pub const THEMES: [[u8; 3]; 3] = [[30, 60, 90], [90, 30, 60], [60, 90, 30]];
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t
}

/// Vertical wobble of a platform at the given tick
#[inline]
pub fn wobble_offset(tick: u64, phase: f32) -> f32 {
    consts::WOBBLE_AMPLITUDE * ((tick as f32 + phase) * consts::WOBBLE_RATE).sin()
}

/// Sign of `value` as ±1, or `None` for zero
#[inline]
pub fn sign_nonzero(value: f32) -> Option<f32> {
    if value > 0.0 {
        Some(1.0)
    } else if value < 0.0 {
        Some(-1.0)
    } else {
        None
    }
}

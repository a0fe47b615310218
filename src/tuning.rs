//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults reproduce the
//! shipped game; a JSON file may override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Half-open interval `[min, max)` used for random draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Empty or inverted spans would panic inside the RNG
    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Balance table for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Constant acceleration added to velocity each tick
    pub gravity: Vec2,
    /// Velocity multiplier each tick (1.0 = no damping)
    pub damping: f32,
    /// Rope stiffness factor
    pub rope_stiffness: f32,
    /// Web shot travel per tick
    pub shot_speed: f32,
    /// Stiffness multiplier while the boost is active
    pub boost_factor: f32,
    pub boost_duration_ticks: u64,

    // === Game flow ===
    pub countdown_secs: u32,
    /// World units of forward travel per score point
    pub score_divisor: f32,
    pub fall_limit: f32,
    /// Per-tick lerp factor of the camera toward the entity
    pub camera_smoothing: f32,

    // === Obstacles ===
    /// Spawn when `entity.x + viewport_width - margin` passes the cursor
    pub obstacle_spawn_margin: f32,
    /// Distance ahead of the cursor at which a platform is placed
    pub obstacle_spawn_offset: f32,
    pub obstacle_gap: Span,
    pub obstacle_width: Span,
    pub obstacle_height: f32,
    pub obstacle_y: Span,
    pub wobble_phase: Span,
    /// Padding around a platform when hit-testing an aim point
    pub anchor_margin: f32,

    // === Collectibles ===
    pub collectible_interval_ticks: u64,
    pub collectible_chance: f32,
    /// Chance that a spawned collectible is a bonus (else a hazard trigger)
    pub bonus_chance: f32,
    /// Spawn distance ahead of the entity
    pub collectible_ahead: Span,
    pub collectible_y: Span,
    pub pickup_radius: f32,

    // === Hazards ===
    pub hazard_interval_ticks: u64,
    pub hazard_chance: f32,
    pub hazard_ahead: Span,
    pub hazard_y: Span,
    pub hazard_speed: Span,
    pub hazard_radius: f32,

    // === Particles (cosmetic) ===
    pub particle_interval_ticks: u64,
    pub particle_life: u32,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Physics
            gravity: Vec2::new(0.0, 0.08),
            damping: 1.0,
            rope_stiffness: 0.5,
            shot_speed: 15.0,
            boost_factor: 1.5,
            boost_duration_ticks: 5 * TICKS_PER_SECOND as u64,

            // Game flow
            countdown_secs: 3,
            score_divisor: 10.0,
            fall_limit: FALL_LIMIT,
            camera_smoothing: 0.1,

            // Obstacles
            obstacle_spawn_margin: 50.0,
            obstacle_spawn_offset: 500.0,
            obstacle_gap: Span::new(200.0, 500.0),
            obstacle_width: Span::new(80.0, 150.0),
            obstacle_height: 20.0,
            obstacle_y: Span::new(VIEWPORT_HEIGHT - 25.0, VIEWPORT_HEIGHT + 0.5),
            wobble_phase: Span::new(0.0, 100_000.0),
            anchor_margin: 20.0,

            // Collectibles
            collectible_interval_ticks: 60,
            collectible_chance: 0.6,
            bonus_chance: 0.7,
            collectible_ahead: Span::new(VIEWPORT_WIDTH, VIEWPORT_WIDTH + 600.0),
            collectible_y: Span::new(50.0, VIEWPORT_HEIGHT + 500.0),
            pickup_radius: 30.0,

            // Hazards
            hazard_interval_ticks: 100,
            hazard_chance: 0.7,
            hazard_ahead: Span::new(VIEWPORT_WIDTH, VIEWPORT_WIDTH + 600.0),
            hazard_y: Span::new(100.0, VIEWPORT_HEIGHT + 500.0),
            hazard_speed: Span::new(2.0, 4.0),
            hazard_radius: 40.0,

            // Particles
            particle_interval_ticks: 5,
            particle_life: 30,
            max_particles: 256,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON table and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON table from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject tables that cannot drive a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.obstacle_gap.validate("obstacle_gap")?;
        self.obstacle_width.validate("obstacle_width")?;
        self.obstacle_y.validate("obstacle_y")?;
        self.wobble_phase.validate("wobble_phase")?;
        self.collectible_ahead.validate("collectible_ahead")?;
        self.collectible_y.validate("collectible_y")?;
        self.hazard_ahead.validate("hazard_ahead")?;
        self.hazard_y.validate("hazard_y")?;
        self.hazard_speed.validate("hazard_speed")?;

        for (name, value) in [
            ("collectible_chance", self.collectible_chance),
            ("bonus_chance", self.bonus_chance),
            ("hazard_chance", self.hazard_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        for (name, value) in [
            ("damping", self.damping),
            ("camera_smoothing", self.camera_smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }

        for (name, value) in [
            ("shot_speed", self.shot_speed),
            ("score_divisor", self.score_divisor),
            ("boost_factor", self.boost_factor),
            ("obstacle_height", self.obstacle_height),
            ("pickup_radius", self.pickup_radius),
            ("hazard_radius", self.hazard_radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        // Spacing and size must move the frontier cursor forward
        for (name, value) in [
            ("obstacle_gap", self.obstacle_gap.min),
            ("obstacle_width", self.obstacle_width.min),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        for (name, value) in [
            ("rope_stiffness", self.rope_stiffness),
            ("anchor_margin", self.anchor_margin),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        for (name, finite) in [
            ("gravity", self.gravity.is_finite()),
            ("fall_limit", self.fall_limit.is_finite()),
            ("obstacle_spawn_offset", self.obstacle_spawn_offset.is_finite()),
            ("obstacle_spawn_margin", self.obstacle_spawn_margin.is_finite()),
        ] {
            if !finite {
                return Err(ConfigError::NonFinite { name });
            }
        }

        for (name, value) in [
            ("collectible_interval_ticks", self.collectible_interval_ticks),
            ("hazard_interval_ticks", self.hazard_interval_ticks),
            ("particle_interval_ticks", self.particle_interval_ticks),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval { name });
            }
        }

        Ok(())
    }
}

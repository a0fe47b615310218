//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Collaborators
//! (renderer, audio, input glue) only read it or call its command methods.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use crate::consts::*;
use crate::error::ConfigError;
use crate::tuning::Tuning;
use crate::wobble_offset;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the begin command
    Start,
    /// Counting down to play
    Countdown,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Lifecycle of the web, derived from the shot and the tether
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TetherPhase {
    Idle,
    /// A shot is in flight, the entity is free
    Aiming,
    /// Anchored, rope force applies
    Attached,
}

/// Discrete notifications for audio and feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WebShotFired,
    WebAttached,
    BonusCollected,
    GameOver,
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// The player-controlled spider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Mirrors [`Tether::is_active`]
    pub attached: bool,
    /// Facing (±1), presentation only
    pub swing_direction: f32,
}

impl Entity {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: ENTITY_RADIUS,
            attached: false,
            swing_direction: 1.0,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(ENTITY_START)
    }
}

/// Anchor point and the rope length fixed at attach time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub anchor: Vec2,
    pub rest_length: f32,
}

/// Single-segment rope linking the entity to an anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tether {
    pub attachment: Option<Attachment>,
    /// Current stiffness (boosted while a stiffness boost is active)
    pub stiffness: f32,
}

impl Tether {
    pub fn new(stiffness: f32) -> Self {
        Self {
            attachment: None,
            stiffness,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.attachment.map(|a| a.anchor)
    }

    pub fn rest_length(&self) -> Option<f32> {
        self.attachment.map(|a| a.rest_length)
    }
}

/// Web projectile travelling toward its anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebShot {
    /// Where the shot left the entity
    pub origin: Vec2,
    pub pos: Vec2,
    pub target: Vec2,
    pub speed: f32,
}

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Cloud,
}

/// A floating platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Left edge
    pub x: f32,
    pub base_y: f32,
    pub width: f32,
    pub height: f32,
    /// Per-instance wobble phase (ticks)
    pub wobble_phase: f32,
}

impl Obstacle {
    /// Top surface at the given tick, wobble included
    #[inline]
    pub fn top(&self, tick: u64) -> f32 {
        self.base_y + wobble_offset(tick, self.wobble_phase)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Fly: adds to the bonus count
    Bonus,
    /// Bee: picking it up ends the run
    HazardTrigger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub pos: Vec2,
}

/// Roaming enemy drifting toward decreasing x
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    /// World units per tick
    pub speed: f32,
}

/// Trail particle left behind while swinging (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Remaining ticks
    pub life: u32,
}

/// Expiring stiffness boost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StiffnessBoost {
    pub active: bool,
    pub expires_at_tick: u64,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// One game session (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (advances in every phase)
    pub time_ticks: u64,
    /// Wall-clock deadline of the countdown (ms)
    pub countdown_deadline_ms: Option<f64>,
    pub score: u64,
    pub bonus_count: u32,
    /// Index into [`THEMES`]
    pub theme: usize,
    pub entity: Entity,
    pub tether: Tether,
    pub web_shot: Option<WebShot>,
    pub boost: StiffnessBoost,
    /// Platforms in spawn order
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub hazards: Vec<Hazard>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Frontier cursor for platform generation
    pub last_spawn_x: f32,
    pub camera: Camera,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new session, rejecting a malformed tuning table up front
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let theme = rng.random_range(0..THEMES.len());
        let entity = Entity::default();

        Self {
            seed,
            rng,
            phase: GamePhase::Start,
            time_ticks: 0,
            countdown_deadline_ms: None,
            score: 0,
            bonus_count: 0,
            theme,
            camera: Camera::centered_on(entity.pos),
            entity,
            tether: Tether::new(tuning.rope_stiffness),
            web_shot: None,
            boost: StiffnessBoost::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            hazards: Vec::new(),
            particles: Vec::new(),
            last_spawn_x: 0.0,
            tuning,
            events: Vec::new(),
        }
    }

    /// Replace this session with a fresh one seeded from the current RNG.
    ///
    /// Pending events survive so collaborators still see the previous run's
    /// final notifications.
    pub(crate) fn reset_session(&mut self) {
        let seed = self.rng.random::<u64>();
        let events = std::mem::take(&mut self.events);
        *self = Self::build(seed, self.tuning.clone());
        self.events = events;
    }

    pub fn tether_phase(&self) -> TetherPhase {
        if self.tether.is_active() {
            TetherPhase::Attached
        } else if self.web_shot.is_some() {
            TetherPhase::Aiming
        } else {
            TetherPhase::Idle
        }
    }

    /// Switch phase and announce it
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.push_event(GameEvent::PhaseChanged { from, to });
    }

    /// End the run. Idempotent: only the first call has any effect.
    pub(crate) fn end_run(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.set_phase(GamePhase::GameOver);
        self.push_event(GameEvent::GameOver);
        log::info!("Game over: score {}, bonuses {}", self.score, self.bonus_count);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Translation from world to screen space
    pub fn camera_offset(&self) -> Vec2 {
        self.camera.offset
    }

    /// Whole seconds left on the countdown (0 when not counting down)
    pub fn countdown_remaining(&self, now_ms: f64) -> u32 {
        match self.countdown_deadline_ms {
            Some(deadline) => ((deadline - now_ms) / 1000.0).ceil().max(0.0) as u32,
            None => 0,
        }
    }

    /// Current top surface of a platform
    pub fn wobble_top(&self, obstacle: &Obstacle) -> f32 {
        obstacle.top(self.time_ticks)
    }

    pub fn theme_color(&self) -> [u8; 3] {
        THEMES[self.theme % THEMES.len()]
    }

    /// Borrowed read-only view for renderers and debug dumps
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            time_ticks: self.time_ticks,
            score: self.score,
            bonus_count: self.bonus_count,
            theme_color: self.theme_color(),
            camera_offset: self.camera.offset,
            entity: &self.entity,
            tether: &self.tether,
            tether_phase: self.tether_phase(),
            web_shot: self.web_shot.as_ref(),
            obstacles: &self.obstacles,
            collectibles: &self.collectibles,
            hazards: &self.hazards,
            particles: &self.particles,
        }
    }
}

/// Per-frame view of a session
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub score: u64,
    pub bonus_count: u32,
    pub theme_color: [u8; 3],
    pub camera_offset: Vec2,
    pub entity: &'a Entity,
    pub tether: &'a Tether,
    pub tether_phase: TetherPhase,
    pub web_shot: Option<&'a WebShot>,
    pub obstacles: &'a [Obstacle],
    pub collectibles: &'a [Collectible],
    pub hazards: &'a [Hazard],
    pub particles: &'a [Particle],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.entity.pos, ENTITY_START);
        assert_eq!(state.entity.vel, Vec2::ZERO);
        assert!(!state.entity.attached);
        assert_eq!(state.tether_phase(), TetherPhase::Idle);
        assert!(state.theme < THEMES.len());
        assert_eq!(state.camera_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_with_tuning_rejects_bad_table() {
        let mut tuning = Tuning::default();
        tuning.hazard_speed.max = tuning.hazard_speed.min;
        assert!(GameState::with_tuning(1, tuning).is_err());
    }

    #[test]
    fn test_end_run_is_idempotent() {
        let mut state = GameState::new(7);
        state.phase = GamePhase::Playing;
        state.end_run();
        state.end_run();
        let events = state.drain_events();
        let game_overs = events.iter().filter(|e| **e == GameEvent::GameOver).count();
        assert_eq!(game_overs, 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_countdown_remaining() {
        let mut state = GameState::new(1);
        assert_eq!(state.countdown_remaining(0.0), 0);
        state.countdown_deadline_ms = Some(3000.0);
        assert_eq!(state.countdown_remaining(0.0), 3);
        assert_eq!(state.countdown_remaining(500.0), 3);
        assert_eq!(state.countdown_remaining(1000.0), 2);
        assert_eq!(state.countdown_remaining(2999.0), 1);
        assert_eq!(state.countdown_remaining(3000.0), 0);
        assert_eq!(state.countdown_remaining(4500.0), 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Start\""));
    }
}

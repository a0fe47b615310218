//! Fixed-cadence simulation tick
//!
//! Drives the game phases and, while playing, runs the per-tick pipeline:
//! camera, physics, collisions, world generation, web shot, score.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState, TetherPhase, WebShot};
use super::{collision, physics, tether, world};
use crate::consts::ENTITY_START;

/// Commands buffered by the input glue for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall clock (ms), used only by the countdown
    pub now_ms: f64,
    /// Click on the title screen
    pub begin: bool,
    /// Shoot a web at this screen-space aim point
    pub shoot_at: Option<Vec2>,
    /// Shoot control released: cancel the shot or let go of the web
    pub release: bool,
    /// Click on the game-over screen
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.begin {
        state.begin(input.now_ms);
    }
    if input.restart {
        state.restart(input.now_ms);
    }
    if let Some(screen) = input.shoot_at {
        let aim = state.camera.screen_to_world(screen);
        state.shoot_web(aim);
    }
    if input.release {
        state.cancel_or_release();
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {}
        GamePhase::Countdown => {
            if state.countdown_remaining(input.now_ms) == 0 {
                state.countdown_deadline_ms = None;
                state.set_phase(GamePhase::Playing);
            }
        }
        GamePhase::Playing => run_pipeline(state),
    }
}

fn run_pipeline(state: &mut GameState) {
    let base_stiffness = state.tuning.rope_stiffness;
    tether::expire_boost(&mut state.boost, &mut state.tether, base_stiffness, state.time_ticks);

    state.camera.follow(state.entity.pos, state.tuning.camera_smoothing);

    let prev_y = state.entity.pos.y;
    let force = tether::spring_force(state.entity.pos, &state.tether);
    physics::update(&mut state.entity, state.tuning.gravity, force, state.tuning.damping);

    collision::resolve(state, prev_y);
    if state.phase != GamePhase::Playing {
        // Score freezes at its last value
        return;
    }

    world::update(state);

    if tether::update_shot(&mut state.web_shot, &mut state.entity, &mut state.tether) {
        state.push_event(GameEvent::WebAttached);
    }

    update_score(state);
}

/// Score is forward progress past the start, in divisor-sized steps
fn update_score(state: &mut GameState) {
    let progress = state.entity.pos.x - ENTITY_START.x;
    if progress > 0.0 {
        state.score = (progress / state.tuning.score_divisor).floor() as u64;
    }
}

impl GameState {
    /// Leave the title screen and start the countdown
    pub fn begin(&mut self, now_ms: f64) {
        if self.phase != GamePhase::Start {
            log::debug!("Ignored begin in {:?}", self.phase);
            return;
        }
        self.start_countdown(now_ms);
    }

    /// Start a fresh run from the game-over screen
    pub fn restart(&mut self, now_ms: f64) {
        if self.phase != GamePhase::GameOver {
            log::debug!("Ignored restart in {:?}", self.phase);
            return;
        }
        let (score, bonuses) = (self.score, self.bonus_count);
        self.reset_session();
        log::info!("Restarted (last run: score {}, bonuses {}), seed {}", score, bonuses, self.seed);
        self.start_countdown(now_ms);
    }

    fn start_countdown(&mut self, now_ms: f64) {
        self.countdown_deadline_ms = Some(now_ms + f64::from(self.tuning.countdown_secs) * 1000.0);
        self.set_phase(GamePhase::Countdown);
    }

    /// Fire a web toward a world-space aim point.
    ///
    /// Ignored unless playing, detached and idle, and the point is over a
    /// platform. Returns whether a shot was fired.
    pub fn shoot_web(&mut self, aim: Vec2) -> bool {
        if self.phase != GamePhase::Playing {
            log::debug!("Ignored shot in {:?}", self.phase);
            return false;
        }
        if self.tether_phase() != TetherPhase::Idle {
            log::debug!("Ignored shot while {:?}", self.tether_phase());
            return false;
        }
        let Some(target) = collision::find_anchor(&self.obstacles, aim, self.time_ticks, self.tuning.anchor_margin)
        else {
            log::debug!("No platform under aim point ({:.0}, {:.0})", aim.x, aim.y);
            return false;
        };

        self.web_shot = Some(WebShot::new(self.entity.pos, target, self.tuning.shot_speed));
        self.push_event(GameEvent::WebShotFired);
        true
    }

    /// Cancel an in-flight shot and let go of an attached web.
    /// Returns whether anything changed.
    pub fn cancel_or_release(&mut self) -> bool {
        let cancelled = self.web_shot.take().is_some();
        if cancelled {
            log::debug!("Web shot cancelled");
        }
        let released = tether::release(&mut self.entity, &mut self.tether);
        cancelled || released
    }

    /// Temporarily stiffen the rope
    pub fn activate_stiffness_boost(&mut self) {
        tether::activate_boost(
            &mut self.boost,
            &mut self.tether,
            self.tuning.rope_stiffness,
            self.tuning.boost_factor,
            self.time_ticks,
            self.tuning.boost_duration_ticks,
        );
    }
}

//! Procedural world generation
//!
//! Content is spawned ahead of the entity and dropped once it trails more
//! than a viewport behind, so every collection stays O(viewport) in size.

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, CollectibleKind, GameState, Hazard, Obstacle, ObstacleKind, Particle};
use crate::consts::VIEWPORT_WIDTH;

/// Advance generation for one playing tick
pub fn update(state: &mut GameState) {
    spawn_obstacles(state);
    despawn_obstacles(state);
    spawn_collectibles(state);
    spawn_hazards(state);
    drift_hazards(&mut state.hazards);
    update_particles(state);
}

/// Place the next platform once the entity gets close to the frontier
pub fn spawn_obstacles(state: &mut GameState) {
    let tuning = &state.tuning;
    if state.entity.pos.x + VIEWPORT_WIDTH - tuning.obstacle_spawn_margin <= state.last_spawn_x {
        return;
    }

    let rng = &mut state.rng;
    let gap = rng.random_range(tuning.obstacle_gap.min..tuning.obstacle_gap.max);
    let base_y = rng.random_range(tuning.obstacle_y.min..tuning.obstacle_y.max);
    let obstacle = Obstacle {
        kind: ObstacleKind::Cloud,
        x: state.last_spawn_x + tuning.obstacle_spawn_offset,
        base_y,
        width: rng.random_range(tuning.obstacle_width.min..tuning.obstacle_width.max),
        height: tuning.obstacle_height,
        wobble_phase: rng.random_range(tuning.wobble_phase.min..tuning.wobble_phase.max),
    };
    log::trace!("Spawned platform at x = {:.0}", obstacle.x);

    state.obstacles.push(obstacle);
    state.last_spawn_x += gap;
}

/// Drop platforms whose right edge is more than a viewport behind
pub fn despawn_obstacles(state: &mut GameState) {
    let limit = state.entity.pos.x - VIEWPORT_WIDTH;
    state.obstacles.retain(|obs| obs.right() >= limit);
}

/// Periodically maybe spawn a collectible ahead of the entity
pub fn spawn_collectibles(state: &mut GameState) {
    let tuning = &state.tuning;
    if state.time_ticks % tuning.collectible_interval_ticks != 0 {
        return;
    }

    let rng = &mut state.rng;
    if !rng.random_bool(f64::from(tuning.collectible_chance)) {
        return;
    }
    let x = state.entity.pos.x + rng.random_range(tuning.collectible_ahead.min..tuning.collectible_ahead.max);
    let y = rng.random_range(tuning.collectible_y.min..tuning.collectible_y.max);
    let kind = if rng.random_bool(f64::from(tuning.bonus_chance)) {
        CollectibleKind::Bonus
    } else {
        CollectibleKind::HazardTrigger
    };
    log::trace!("Spawned {:?} at ({:.0}, {:.0})", kind, x, y);

    state.collectibles.push(Collectible {
        kind,
        pos: Vec2::new(x, y),
    });
}

/// Periodically maybe spawn a hazard ahead of the entity
pub fn spawn_hazards(state: &mut GameState) {
    let tuning = &state.tuning;
    if state.time_ticks % tuning.hazard_interval_ticks != 0 {
        return;
    }

    let rng = &mut state.rng;
    if !rng.random_bool(f64::from(tuning.hazard_chance)) {
        return;
    }
    let x = state.entity.pos.x + rng.random_range(tuning.hazard_ahead.min..tuning.hazard_ahead.max);
    let y = rng.random_range(tuning.hazard_y.min..tuning.hazard_y.max);
    let speed = rng.random_range(tuning.hazard_speed.min..tuning.hazard_speed.max);
    log::trace!("Spawned hazard at ({:.0}, {:.0})", x, y);

    state.hazards.push(Hazard {
        pos: Vec2::new(x, y),
        speed,
    });
}

/// Hazards drift toward decreasing x every tick
pub fn drift_hazards(hazards: &mut [Hazard]) {
    for hazard in hazards {
        hazard.pos.x -= hazard.speed;
    }
}

/// Emit trail particles while attached and age the existing ones
pub fn update_particles(state: &mut GameState) {
    let tuning = &state.tuning;
    for particle in state.particles.iter_mut() {
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    if state.entity.attached
        && state.time_ticks % tuning.particle_interval_ticks == 0
        && state.particles.len() < tuning.max_particles
    {
        state.particles.push(Particle {
            pos: state.entity.pos,
            life: tuning.particle_life,
        });
    }
}

//! Collision detection and response
//!
//! Platforms are one-way: the entity lands on them from above and passes
//! through from below. Collectibles and hazards are simple radius checks.

use glam::Vec2;

use super::state::{Collectible, CollectibleKind, Entity, GameEvent, GamePhase, GameState, Hazard, Obstacle};

/// Outcome of a collectible sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickupResult {
    /// Bonus items picked up this tick
    pub bonuses: u32,
    /// A hazard trigger was picked up
    pub hazard_triggered: bool,
}

/// Attach point for an aim point in world space.
///
/// The first platform (spawn order) whose padded, wobbled box contains the
/// point wins. The anchor keeps the aim x and sits on the platform's current
/// top surface.
pub fn find_anchor(obstacles: &[Obstacle], point: Vec2, tick: u64, margin: f32) -> Option<Vec2> {
    obstacles.iter().find_map(|obs| {
        let top = obs.top(tick);
        let inside = point.x >= obs.x - margin
            && point.x <= obs.right() + margin
            && point.y >= top - margin
            && point.y <= top + obs.height + margin;
        inside.then(|| Vec2::new(point.x, top))
    })
}

/// Snap a falling entity onto any platform it reached this tick.
///
/// `prev_y` is the entity's center before integration; an entity that was
/// already below a surface is never pulled up onto it. Returns true if it
/// landed.
pub fn land_on_platforms(entity: &mut Entity, prev_y: f32, obstacles: &[Obstacle], tick: u64) -> bool {
    let mut landed = false;
    for obs in obstacles {
        let overlaps = entity.pos.x + entity.radius > obs.x && entity.pos.x - entity.radius < obs.right();
        if !overlaps {
            continue;
        }

        let top = obs.top(tick);
        if entity.vel.y >= 0.0 && entity.bottom() >= top && prev_y < top {
            entity.pos.y = top - entity.radius;
            entity.vel.y = 0.0;
            landed = true;
        }
    }
    landed
}

/// Remove every collectible within `radius` of `pos`
pub fn collect_pickups(pos: Vec2, collectibles: &mut Vec<Collectible>, radius: f32) -> PickupResult {
    let mut result = PickupResult::default();
    collectibles.retain(|c| {
        if c.pos.distance(pos) >= radius {
            return true;
        }
        match c.kind {
            CollectibleKind::Bonus => result.bonuses += 1,
            CollectibleKind::HazardTrigger => result.hazard_triggered = true,
        }
        false
    });
    result
}

/// Check if any hazard is within `radius` of `pos`
pub fn hazard_hit(pos: Vec2, hazards: &[Hazard], radius: f32) -> bool {
    hazards.iter().any(|h| h.pos.distance(pos) < radius)
}

/// Drop hazards that fell more than `distance` behind `entity_x`
pub fn despawn_trailing_hazards(hazards: &mut Vec<Hazard>, entity_x: f32, distance: f32) -> usize {
    let before = hazards.len();
    hazards.retain(|h| h.pos.x >= entity_x - distance);
    before - hazards.len()
}

/// Check if the entity fell past the limit
#[inline]
pub fn fell_out(entity: &Entity, fall_limit: f32) -> bool {
    entity.pos.y > fall_limit
}

/// Run every collision check for one playing tick
pub fn resolve(state: &mut GameState, prev_y: f32) {
    let tick = state.time_ticks;
    land_on_platforms(&mut state.entity, prev_y, &state.obstacles, tick);

    let pickups = collect_pickups(state.entity.pos, &mut state.collectibles, state.tuning.pickup_radius);
    for _ in 0..pickups.bonuses {
        state.bonus_count += 1;
        state.push_event(GameEvent::BonusCollected);
    }
    if pickups.hazard_triggered {
        log::debug!("Picked up a hazard trigger");
        state.end_run();
    }

    let removed = despawn_trailing_hazards(&mut state.hazards, state.entity.pos.x, crate::consts::VIEWPORT_WIDTH);
    if removed > 0 {
        log::trace!("Despawned {} hazards", removed);
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    if hazard_hit(state.entity.pos, &state.hazards, state.tuning.hazard_radius) {
        log::debug!("Hit a hazard");
        state.end_run();
        return;
    }

    if fell_out(&state.entity, state.tuning.fall_limit) {
        log::debug!("Fell past y = {}", state.tuning.fall_limit);
        state.end_run();
    }
}

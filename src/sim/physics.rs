//! Entity integration
//!
//! Semi-implicit Euler at a fixed per-tick cadence: forces change velocity
//! first, then velocity moves the position.

use glam::Vec2;

use super::state::Entity;
use crate::sign_nonzero;

/// Advance the entity by one tick.
///
/// `tether_force` is the rope pull for this tick (zero when detached or slack).
/// No clamping is applied to position or velocity.
pub fn update(entity: &mut Entity, gravity: Vec2, tether_force: Vec2, damping: f32) {
    entity.vel += gravity;

    if tether_force != Vec2::ZERO {
        entity.vel += tether_force;
        if let Some(dir) = sign_nonzero(entity.vel.x) {
            entity.swing_direction = dir;
        }
    }

    entity.vel *= damping;
    entity.pos += entity.vel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GRAVITY: Vec2 = Vec2::new(0.0, 0.08);

    #[test]
    fn test_single_tick_from_rest() {
        let mut entity = Entity::new(Vec2::ZERO);
        update(&mut entity, GRAVITY, Vec2::ZERO, 1.0);
        assert_eq!(entity.vel, Vec2::new(0.0, 0.08));
        assert_eq!(entity.pos, Vec2::new(0.0, 0.08));
    }

    #[test]
    fn test_damping_scales_velocity() {
        let mut entity = Entity::new(Vec2::ZERO);
        entity.vel = Vec2::new(10.0, 0.0);
        update(&mut entity, Vec2::ZERO, Vec2::ZERO, 0.5);
        assert_eq!(entity.vel, Vec2::new(5.0, 0.0));
        assert_eq!(entity.pos, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_swing_direction_follows_pull() {
        let mut entity = Entity::new(Vec2::ZERO);
        update(&mut entity, GRAVITY, Vec2::new(-1.0, 0.0), 1.0);
        assert_eq!(entity.swing_direction, -1.0);

        // Free fall leaves the facing alone
        entity.vel = Vec2::new(3.0, 0.0);
        update(&mut entity, GRAVITY, Vec2::ZERO, 1.0);
        assert_eq!(entity.swing_direction, -1.0);

        // Pull that leaves zero horizontal velocity keeps the previous facing
        entity.vel = Vec2::new(-2.0, 0.0);
        update(&mut entity, Vec2::ZERO, Vec2::new(2.0, 1.0), 1.0);
        assert_eq!(entity.vel.x, 0.0);
        assert_eq!(entity.swing_direction, -1.0);
    }

    proptest! {
        #[test]
        fn prop_free_fall_vertical_velocity_increases(
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            ticks in 1usize..200,
        ) {
            let mut entity = Entity::new(Vec2::ZERO);
            entity.vel = Vec2::new(vx, vy);
            let mut last_vy = entity.vel.y;
            for _ in 0..ticks {
                update(&mut entity, GRAVITY, Vec2::ZERO, 1.0);
                prop_assert!(entity.vel.y > last_vy);
                last_vy = entity.vel.y;
            }
        }
    }
}

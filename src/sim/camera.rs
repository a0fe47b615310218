//! Camera offset
//!
//! The camera is a translation that keeps the entity near the viewport
//! center. The core only computes it; applying it as a draw transform is the
//! renderer's job. Input glue uses [`Camera::screen_to_world`] to hit-test
//! aim points.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lerp_vec;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World-to-screen translation
    pub offset: Vec2,
}

impl Camera {
    /// Offset that places `pos` exactly at the viewport center
    pub fn target_offset(pos: Vec2) -> Vec2 {
        Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0) - pos
    }

    pub fn centered_on(pos: Vec2) -> Self {
        Self {
            offset: Self::target_offset(pos),
        }
    }

    /// Ease toward the entity (0 = frozen, 1 = snap)
    pub fn follow(&mut self, pos: Vec2, smoothing: f32) {
        self.offset = lerp_vec(self.offset, Self::target_offset(pos), smoothing);
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen - self.offset
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_on_start_is_zero() {
        assert_eq!(Camera::centered_on(ENTITY_START).offset, Vec2::ZERO);
    }

    #[test]
    fn test_follow_eases_toward_target() {
        let mut camera = Camera::centered_on(ENTITY_START);
        let pos = ENTITY_START + Vec2::new(100.0, 0.0);
        camera.follow(pos, 0.1);
        assert!((camera.offset.x - -10.0).abs() < 1e-4);

        for _ in 0..200 {
            camera.follow(pos, 0.1);
        }
        assert!((camera.offset - Camera::target_offset(pos)).length() < 1e-3);
    }

    #[test]
    fn test_screen_world_inverse() {
        let camera = Camera {
            offset: Vec2::new(-250.0, 40.0),
        };
        let screen = Vec2::new(12.0, 300.0);
        let world = camera.screen_to_world(screen);
        assert_eq!(world, Vec2::new(262.0, 260.0));
        assert_eq!(camera.world_to_screen(world), screen);
    }
}

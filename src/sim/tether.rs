//! Web tether: rope force, attach/release, web shot flight and the
//! stiffness boost
//!
//! The rope is unilateral. It pulls the entity toward the anchor once
//! stretched past its rest length and never pushes.

use glam::Vec2;

use super::state::{Attachment, Entity, StiffnessBoost, Tether, WebShot};

/// Rope force on an entity at `pos` (zero when detached or slack)
pub fn spring_force(pos: Vec2, tether: &Tether) -> Vec2 {
    let Some(attachment) = tether.attachment else {
        return Vec2::ZERO;
    };

    let to_anchor = attachment.anchor - pos;
    let distance = to_anchor.length();
    if distance > attachment.rest_length {
        to_anchor / distance * ((distance - attachment.rest_length) * tether.stiffness)
    } else {
        Vec2::ZERO
    }
}

/// Anchor the entity; the rest length is its distance to the anchor right now
pub fn attach(entity: &mut Entity, tether: &mut Tether, anchor: Vec2) {
    let rest_length = entity.pos.distance(anchor);
    tether.attachment = Some(Attachment {
        anchor,
        rest_length,
    });
    entity.attached = true;
    log::debug!("Web attached at ({:.1}, {:.1}), rest length {:.1}", anchor.x, anchor.y, rest_length);
}

/// Drop the anchor. Returns whether anything was attached.
pub fn release(entity: &mut Entity, tether: &mut Tether) -> bool {
    let was_attached = tether.attachment.take().is_some();
    entity.attached = false;
    if was_attached {
        log::debug!("Web released");
    }
    was_attached
}

impl WebShot {
    pub fn new(origin: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            origin,
            pos: origin,
            target,
            speed,
        }
    }

    /// Move one tick toward the target. Returns true on arrival.
    pub fn advance(&mut self) -> bool {
        let to_target = self.target - self.pos;
        let distance = to_target.length();
        if distance <= self.speed {
            self.pos = self.target;
            true
        } else {
            self.pos += to_target / distance * self.speed;
            false
        }
    }
}

/// Fly the in-flight shot, promoting it to an attachment on arrival.
///
/// Returns true on the tick the web attaches.
pub fn update_shot(shot: &mut Option<WebShot>, entity: &mut Entity, tether: &mut Tether) -> bool {
    let Some(active) = shot.as_mut() else {
        return false;
    };
    if !active.advance() {
        return false;
    }

    let target = active.target;
    *shot = None;
    attach(entity, tether, target);
    true
}

/// Multiply stiffness for a while. A pickup during an active boost only
/// extends it; the factor never compounds.
pub fn activate_boost(
    boost: &mut StiffnessBoost,
    tether: &mut Tether,
    base_stiffness: f32,
    factor: f32,
    now_tick: u64,
    duration_ticks: u64,
) {
    boost.active = true;
    boost.expires_at_tick = now_tick + duration_ticks;
    tether.stiffness = base_stiffness * factor;
    log::debug!("Stiffness boost until tick {}", boost.expires_at_tick);
}

/// Revert an expired boost. Returns true on the tick it expires.
pub fn expire_boost(boost: &mut StiffnessBoost, tether: &mut Tether, base_stiffness: f32, now_tick: u64) -> bool {
    if !boost.active || now_tick < boost.expires_at_tick {
        return false;
    }
    *boost = StiffnessBoost::default();
    tether.stiffness = base_stiffness;
    log::debug!("Stiffness boost expired");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn attached_at(anchor: Vec2, rest_length: f32) -> Tether {
        Tether {
            attachment: Some(Attachment {
                anchor,
                rest_length,
            }),
            stiffness: 0.5,
        }
    }

    #[test]
    fn test_detached_has_no_force() {
        let tether = Tether::new(0.5);
        assert_eq!(spring_force(Vec2::new(10.0, 10.0), &tether), Vec2::ZERO);
    }

    #[test]
    fn test_force_right_after_attach_is_zero() {
        let mut entity = Entity::new(Vec2::new(320.0, 240.0));
        let mut tether = Tether::new(0.5);
        let anchor = Vec2::new(417.3, 101.9);
        attach(&mut entity, &mut tether, anchor);

        assert!(entity.attached);
        assert_eq!(tether.rest_length(), Some(entity.pos.distance(anchor)));
        assert_eq!(spring_force(entity.pos, &tether), Vec2::ZERO);
    }

    #[test]
    fn test_stretched_rope_pulls_toward_anchor() {
        let tether = attached_at(Vec2::ZERO, 100.0);
        let force = spring_force(Vec2::new(0.0, 110.0), &tether);
        // (110 - 100) * 0.5 = 5, straight up
        assert!((force - Vec2::new(0.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn test_release_clears_both_sides() {
        let mut entity = Entity::new(Vec2::ZERO);
        let mut tether = Tether::new(0.5);
        assert!(!release(&mut entity, &mut tether));

        attach(&mut entity, &mut tether, Vec2::new(0.0, -50.0));
        assert!(release(&mut entity, &mut tether));
        assert!(!entity.attached);
        assert!(tether.anchor().is_none());
        assert!(tether.rest_length().is_none());
    }

    #[test]
    fn test_shot_arrives_after_ceil_distance_over_speed() {
        let mut entity = Entity::new(Vec2::ZERO);
        let mut tether = Tether::new(0.5);
        let target = Vec2::new(60.0, -80.0); // 100 away
        let mut shot = Some(WebShot::new(entity.pos, target, 15.0));

        for _ in 0..6 {
            assert!(!update_shot(&mut shot, &mut entity, &mut tether));
            assert!(!entity.attached);
        }
        assert!(update_shot(&mut shot, &mut entity, &mut tether));
        assert!(shot.is_none());
        assert!(entity.attached);
        assert_eq!(tether.anchor(), Some(target));
        assert!((tether.rest_length().unwrap() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_shot_is_noop() {
        let mut entity = Entity::new(Vec2::ZERO);
        let mut tether = Tether::new(0.5);
        let mut shot = None;
        assert!(!update_shot(&mut shot, &mut entity, &mut tether));
        assert!(!tether.is_active());
    }

    #[test]
    fn test_boost_expires_and_does_not_compound() {
        let mut boost = StiffnessBoost::default();
        let mut tether = Tether::new(0.5);

        activate_boost(&mut boost, &mut tether, 0.5, 1.5, 10, 300);
        activate_boost(&mut boost, &mut tether, 0.5, 1.5, 100, 300);
        assert_eq!(tether.stiffness, 0.75);
        assert_eq!(boost.expires_at_tick, 400);

        assert!(!expire_boost(&mut boost, &mut tether, 0.5, 399));
        assert!(expire_boost(&mut boost, &mut tether, 0.5, 400));
        assert_eq!(tether.stiffness, 0.5);
        assert!(!boost.active);
        assert!(!expire_boost(&mut boost, &mut tether, 0.5, 401));
    }

    proptest! {
        #[test]
        fn prop_slack_rope_never_pulls(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            px in -500.0f32..500.0, py in -500.0f32..500.0,
            extra in 0.0f32..200.0,
        ) {
            let anchor = Vec2::new(ax, ay);
            let pos = Vec2::new(px, py);
            let tether = attached_at(anchor, pos.distance(anchor) + extra);
            prop_assert_eq!(spring_force(pos, &tether), Vec2::ZERO);
        }

        #[test]
        fn prop_taut_rope_pulls_toward_anchor(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            px in -500.0f32..500.0, py in -500.0f32..500.0,
            slack in 0.1f32..0.9,
        ) {
            let anchor = Vec2::new(ax, ay);
            let pos = Vec2::new(px, py);
            let distance = pos.distance(anchor);
            prop_assume!(distance > 1.0);

            let tether = attached_at(anchor, distance * slack);
            let force = spring_force(pos, &tether);
            prop_assert!(force.length() > 0.0);
            prop_assert!(force.dot(anchor - pos) > 0.0);
        }
    }
}

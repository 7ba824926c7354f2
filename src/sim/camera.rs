//! Follow camera with world-bounds clamping and screen shake
//!
//! `position` is the world point at the center of the viewport. The camera
//! never owns what it follows: it stores a [`FollowTarget`] handle and the
//! caller resolves it to a position each tick. A handle that no longer
//! resolves (dead enemy) leaves the camera where it is.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::{CAMERA_REFERENCE_FRAME_MS, CAMERA_SHAKE_DAMPING};

/// Non-owning reference to the entity the camera tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowTarget {
    Player,
    Enemy(u32),
}

/// Transient shake state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Shake {
    pub offset: Vec2,
    pub remaining_ms: f32,
    pub intensity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec2,
    pub viewport: Vec2,
    pub follow: Option<FollowTarget>,
    /// Fraction of the remaining distance covered per reference frame (0-1)
    pub follow_speed: f32,
    pub bounds: Option<Aabb>,
    pub shake: Shake,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
            follow: None,
            follow_speed: crate::consts::CAMERA_FOLLOW_SPEED,
            bounds: None,
            shake: Shake::default(),
        }
    }

    pub fn follow(&mut self, target: FollowTarget, speed: f32) {
        self.follow = Some(target);
        self.follow_speed = speed.clamp(0.0, 1.0);
    }

    pub fn unfollow(&mut self) {
        self.follow = None;
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.position = pos;
    }

    pub fn set_bounds(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.bounds = Some(Aabb::new(x, y, width, height));
    }

    /// Start a shake. A new shake replaces any shake in progress.
    pub fn start_shake<R: Rng>(&mut self, intensity: f32, duration_ms: f32, rng: &mut R) {
        let intensity = intensity.max(0.0);
        self.shake = Shake {
            offset: Vec2::new(
                (rng.random::<f32>() - 0.5) * intensity,
                (rng.random::<f32>() - 0.5) * intensity,
            ),
            remaining_ms: duration_ms.max(0.0),
            intensity,
        };
    }

    /// Advance smoothing, clamping and shake by `dt_ms`.
    ///
    /// `target` is the resolved position of the followed entity, if any.
    pub fn update<R: Rng>(&mut self, dt_ms: f32, target: Option<Vec2>, rng: &mut R) {
        if let (Some(_), Some(target)) = (self.follow, target) {
            // Exponential smoothing scaled to frame length
            let frames = (dt_ms / CAMERA_REFERENCE_FRAME_MS).max(0.0);
            let alpha = 1.0 - (1.0 - self.follow_speed).powf(frames);
            self.position = self.position.lerp(target, alpha);
        }

        if let Some(bounds) = self.bounds {
            let half = self.viewport / 2.0;
            self.position.x = crate::clamp(self.position.x, bounds.x + half.x, bounds.right() - half.x);
            self.position.y = crate::clamp(self.position.y, bounds.y + half.y, bounds.bottom() - half.y);
        }

        self.update_shake(dt_ms, rng);
    }

    fn update_shake<R: Rng>(&mut self, dt_ms: f32, rng: &mut R) {
        if self.shake.remaining_ms <= 0.0 {
            return;
        }

        self.shake.remaining_ms -= dt_ms;
        if self.shake.remaining_ms <= 0.0 {
            self.shake = Shake::default();
            return;
        }

        let intensity = self.shake.intensity;
        let nudge = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * intensity;
        self.shake.offset = ((self.shake.offset + nudge) * CAMERA_SHAKE_DAMPING)
            .clamp_length_max(intensity);
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.remaining_ms > 0.0
    }

    /// View center including shake
    pub fn view_center(&self) -> Vec2 {
        self.position + self.shake.offset
    }

    /// World coordinate of the top-left screen pixel (renderer translate origin)
    pub fn view_origin(&self) -> Vec2 {
        self.view_center() - self.viewport / 2.0
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.view_origin()
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.view_origin()
    }

    /// Whether a world point falls inside the viewport grown by `padding`
    pub fn is_in_view(&self, point: Vec2, padding: f32) -> bool {
        let half = self.viewport / 2.0 + Vec2::splat(padding);
        Aabb::new(
            self.position.x - half.x,
            self.position.y - half.y,
            half.x * 2.0,
            half.y * 2.0,
        )
        .contains_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_clamps_to_world_bounds() {
        let mut rng = rng();
        let mut cam = Camera::new(800.0, 600.0);
        cam.set_bounds(0.0, 0.0, 2000.0, 2000.0);
        cam.follow(FollowTarget::Player, 0.1);

        for _ in 0..300 {
            cam.update(16.0, Some(Vec2::new(2500.0, 2500.0)), &mut rng);
        }
        assert_eq!(cam.position, Vec2::new(1600.0, 1700.0));

        for _ in 0..300 {
            cam.update(16.0, Some(Vec2::new(-300.0, -300.0)), &mut rng);
        }
        assert_eq!(cam.position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_smoothing_scales_with_dt() {
        let mut rng = rng();
        let target = Some(Vec2::new(1000.0, 0.0));

        let mut one = Camera::new(800.0, 600.0);
        one.follow(FollowTarget::Player, 0.1);
        one.update(CAMERA_REFERENCE_FRAME_MS * 2.0, target, &mut rng);

        let mut two = Camera::new(800.0, 600.0);
        two.follow(FollowTarget::Player, 0.1);
        two.update(CAMERA_REFERENCE_FRAME_MS, target, &mut rng);
        two.update(CAMERA_REFERENCE_FRAME_MS, target, &mut rng);

        assert!((one.position.x - two.position.x).abs() < 1e-2);
        assert!((two.position.x - 190.0).abs() < 1e-2);
    }

    #[test]
    fn test_missing_target_holds_position() {
        let mut rng = rng();
        let mut cam = Camera::new(800.0, 600.0);
        cam.set_position(Vec2::new(500.0, 500.0));
        cam.follow(FollowTarget::Enemy(3), 0.5);
        cam.update(16.0, None, &mut rng);
        assert_eq!(cam.position, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_unfollow_clears_target() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.follow(FollowTarget::Player, 0.2);
        assert_eq!(cam.follow, Some(FollowTarget::Player));
        assert_eq!(cam.follow_speed, 0.2);

        cam.unfollow();
        assert_eq!(cam.follow, None);
    }

    #[test]
    fn test_shake_bounded_and_resets() {
        let mut rng = rng();
        let mut cam = Camera::new(800.0, 600.0);
        cam.start_shake(8.0, 100.0, &mut rng);
        assert!(cam.is_shaking());

        for _ in 0..6 {
            cam.update(16.0, None, &mut rng);
            assert!(cam.shake.offset.length() <= 8.0 + 1e-4);
        }
        cam.update(16.0, None, &mut rng);
        assert!(!cam.is_shaking());
        assert_eq!(cam.shake.offset, Vec2::ZERO);
    }

    #[test]
    fn test_screen_world_round_trip_and_culling() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.set_position(Vec2::new(1000.0, 1000.0));
        assert_eq!(cam.view_origin(), Vec2::new(600.0, 700.0));
        assert_eq!(cam.screen_to_world(Vec2::ZERO), Vec2::new(600.0, 700.0));
        assert_eq!(cam.world_to_screen(Vec2::new(1000.0, 1000.0)), Vec2::new(400.0, 300.0));

        assert!(cam.is_in_view(Vec2::new(1390.0, 1000.0), 0.0));
        assert!(!cam.is_in_view(Vec2::new(1410.0, 1000.0), 0.0));
        assert!(cam.is_in_view(Vec2::new(1410.0, 1000.0), 20.0));
    }
}

//! Willager Arena - wave-based arena combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (AI, combat, waves, camera, game loop)
//! - `settings`: Runtime configuration with validation

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Upper bound for a single frame delta (ms). Larger gaps are clamped.
    pub const MAX_FRAME_DT_MS: f32 = 100.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 2000.0;
    pub const WORLD_HEIGHT: f32 = 2000.0;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 52.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_HEALTH: f32 = 100.0;
    pub const PLAYER_ATTACK_DAMAGE: f32 = 25.0;
    pub const PLAYER_ATTACK_RANGE: f32 = 45.0;
    pub const PLAYER_ATTACK_COOLDOWN_MS: f64 = 600.0;
    /// How long a sword swing stays active
    pub const PLAYER_ATTACK_DURATION_MS: f64 = 300.0;
    /// Height of the swing hitbox
    pub const PLAYER_SWING_HEIGHT: f32 = 40.0;

    /// Diagonal input scale (≈ 1/√2)
    pub const DIAGONAL_SCALE: f32 = 0.707;

    /// Wave curve
    pub const ENEMIES_PER_WAVE: u32 = 3;
    pub const MAX_ENEMIES: u32 = 10;
    /// Last regular wave; the boss arrives with it
    pub const FINAL_WAVE: u32 = 5;
    /// Wave from which archers can appear
    pub const RANGED_FROM_WAVE: u32 = 3;
    pub const RANGED_CHANCE: f64 = 0.5;
    pub const WAVE_SPAWN_DELAY_MS: f64 = 2000.0;

    /// Spawn layout: loose horizontal line with jitter
    pub const SPAWN_ORIGIN_X: f32 = 300.0;
    pub const SPAWN_SPACING_X: f32 = 150.0;
    pub const SPAWN_JITTER_X: f32 = 100.0;
    pub const SPAWN_ORIGIN_Y: f32 = 100.0;
    pub const SPAWN_JITTER_Y: f32 = 200.0;

    /// Boss entrance position
    pub const BOSS_SPAWN_X: f32 = 1000.0;
    pub const BOSS_SPAWN_Y: f32 = 500.0;

    /// Ranged grunts keep this distance while chasing
    pub const RANGED_STANDOFF: f32 = 100.0;
    /// Ranged grunts open fire inside this fraction of detection range
    pub const RANGED_ATTACK_FRACTION: f32 = 0.8;

    /// Arrow defaults
    pub const PROJECTILE_SPEED: f32 = 300.0;
    pub const PROJECTILE_LIFETIME_MS: f32 = 3000.0;
    pub const PROJECTILE_SIZE: f32 = 4.0;

    /// Boss special ("Kyron burst")
    pub const BOSS_SPECIAL_TRIGGER_RANGE: f32 = 150.0;
    pub const BOSS_SPECIAL_RADIUS: f32 = 120.0;
    pub const BOSS_SPECIAL_DAMAGE: f32 = 50.0;
    pub const BOSS_SPECIAL_COOLDOWN_MS: f64 = 8000.0;
    pub const BOSS_SPECIAL_DURATION_MS: f64 = 200.0;
    /// Corruption meter cap
    pub const BOSS_MAX_KYRON: f32 = 100.0;

    /// Camera
    pub const CAMERA_FOLLOW_SPEED: f32 = 0.1;
    /// Frame length the follow factor is tuned for (60 Hz)
    pub const CAMERA_REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    pub const CAMERA_SHAKE_DAMPING: f32 = 0.9;
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: an inverted range collapses to its midpoint.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return (min + max) * 0.5;
    }
    value.max(min).min(max)
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector in the direction of `v`, or zero for the zero vector
#[inline]
pub fn safe_normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(safe_normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_inverted_range() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        // Viewport larger than the world
        assert_eq!(clamp(3.0, 10.0, 0.0), 5.0);
    }

    #[test]
    fn test_lerp_and_distance() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_unit(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            prop_assume!(x.abs() > 1e-3 || y.abs() > 1e-3);
            let n = safe_normalize(Vec2::new(x, y));
            prop_assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}

//! Simulation settings
//!
//! Loaded from JSON (missing fields fall back to defaults) and sanitized
//! before use: invalid values are clamped into range, never rejected.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;

/// Errors from loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for wandering, spawn jitter and camera shake
    pub seed: u64,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Waves ===
    pub enemies_per_wave: u32,
    pub max_enemies: u32,
    /// Last regular wave; the boss enters with it
    pub final_wave: u32,
    /// Delay between clearing a wave and the next one spawning
    pub wave_spawn_delay_ms: f64,

    // === Loop ===
    /// Frame delta clamp
    pub max_frame_dt_ms: f32,

    // === Camera ===
    pub camera_follow_speed: f32,
    /// Shake the camera when the player takes damage
    pub camera_shake_on_hit: bool,
    pub hit_shake_intensity: f32,
    pub hit_shake_duration_ms: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED_CAFE,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            enemies_per_wave: ENEMIES_PER_WAVE,
            max_enemies: MAX_ENEMIES,
            final_wave: FINAL_WAVE,
            wave_spawn_delay_ms: WAVE_SPAWN_DELAY_MS,

            max_frame_dt_ms: MAX_FRAME_DT_MS,

            camera_follow_speed: CAMERA_FOLLOW_SPEED,
            camera_shake_on_hit: true,
            hit_shake_intensity: 6.0,
            hit_shake_duration_ms: 200.0,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string (not sanitized)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and parse a settings file (not sanitized)
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a settings file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Copy with every out-of-range value clamped to something playable
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut s = self.clone();

        fn fix_positive(name: &str, value: &mut f32, fallback: f32) {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("Invalid {} ({}), using {}", name, value, fallback);
                *value = fallback;
            }
        }

        fix_positive("world_width", &mut s.world_width, defaults.world_width);
        fix_positive("world_height", &mut s.world_height, defaults.world_height);
        fix_positive("viewport_width", &mut s.viewport_width, defaults.viewport_width);
        fix_positive("viewport_height", &mut s.viewport_height, defaults.viewport_height);

        if s.max_enemies == 0 {
            log::warn!("max_enemies must be at least 1");
            s.max_enemies = 1;
        }
        if s.final_wave == 0 {
            log::warn!("final_wave must be at least 1");
            s.final_wave = 1;
        }
        if !(s.wave_spawn_delay_ms.is_finite() && s.wave_spawn_delay_ms >= 0.0) {
            log::warn!("Invalid wave_spawn_delay_ms ({})", s.wave_spawn_delay_ms);
            s.wave_spawn_delay_ms = defaults.wave_spawn_delay_ms;
        }
        if !(s.max_frame_dt_ms.is_finite() && s.max_frame_dt_ms > 0.0 && s.max_frame_dt_ms <= 1000.0)
        {
            log::warn!("Invalid max_frame_dt_ms ({})", s.max_frame_dt_ms);
            s.max_frame_dt_ms = defaults.max_frame_dt_ms;
        }
        if !s.camera_follow_speed.is_finite() {
            s.camera_follow_speed = defaults.camera_follow_speed;
        }
        s.camera_follow_speed = s.camera_follow_speed.clamp(0.0, 1.0);
        s.hit_shake_intensity = s.hit_shake_intensity.max(0.0);
        s.hit_shake_duration_ms = s.hit_shake_duration_ms.max(0.0);

        s
    }
}

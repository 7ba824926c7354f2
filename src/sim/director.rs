//! Wave/spawn director
//!
//! Decides how many enemies each wave brings, which archetypes they are and
//! where they stand. Waves 1-2 are all melee; from wave 3 each enemy is an
//! archer with even odds. The boss enters with the final wave.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::combatant::WorldBounds;
use super::enemy::{Enemy, EnemyKind};
use crate::consts::*;
use crate::settings::Settings;

/// Wave curve, derived from (sanitized) settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveDirector {
    pub enemies_per_wave: u32,
    pub max_enemies: u32,
    pub final_wave: u32,
    pub spawn_delay_ms: f64,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self {
            enemies_per_wave: ENEMIES_PER_WAVE,
            max_enemies: MAX_ENEMIES,
            final_wave: FINAL_WAVE,
            spawn_delay_ms: WAVE_SPAWN_DELAY_MS,
        }
    }
}

impl WaveDirector {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            enemies_per_wave: settings.enemies_per_wave,
            max_enemies: settings.max_enemies.max(1),
            final_wave: settings.final_wave.max(1),
            spawn_delay_ms: settings.wave_spawn_delay_ms.max(0.0),
        }
    }

    /// Number of regular enemies in `wave`
    pub fn enemy_count(&self, wave: u32) -> u32 {
        self.enemies_per_wave
            .saturating_add(wave)
            .min(self.max_enemies)
    }

    /// Archetype roll for one enemy
    pub fn roll_kind(&self, wave: u32, rng: &mut Pcg32) -> EnemyKind {
        if wave >= RANGED_FROM_WAVE && rng.random_bool(RANGED_CHANCE) {
            EnemyKind::GruntRanged
        } else {
            EnemyKind::GruntMelee
        }
    }

    /// Spawn the regular enemies for `wave`.
    ///
    /// Enemies are laid out along a loose horizontal line to the right of the
    /// player's start, with jitter, and kept inside the world.
    pub fn spawn_wave(
        &self,
        wave: u32,
        world: WorldBounds,
        rng: &mut Pcg32,
        mut next_id: impl FnMut() -> u32,
    ) -> Vec<Enemy> {
        let count = self.enemy_count(wave);
        let mut enemies = Vec::with_capacity(count as usize);

        for i in 0..count {
            let kind = self.roll_kind(wave, rng);
            let size = kind.stats().size;
            let x = SPAWN_ORIGIN_X + i as f32 * SPAWN_SPACING_X + rng.random::<f32>() * SPAWN_JITTER_X;
            let y = SPAWN_ORIGIN_Y + rng.random::<f32>() * SPAWN_JITTER_Y;
            let pos = Vec2::new(
                crate::clamp(x, 0.0, world.width - size.x),
                crate::clamp(y, 0.0, world.height - size.y),
            );
            enemies.push(Enemy::new(next_id(), kind, pos));
        }

        log::info!(
            "Wave {}: spawned {} enemies ({} archers)",
            wave,
            enemies.len(),
            enemies
                .iter()
                .filter(|e| e.kind == EnemyKind::GruntRanged)
                .count()
        );
        enemies
    }

    /// The boss, placed at its entrance position
    pub fn spawn_boss(&self, id: u32, world: WorldBounds) -> Enemy {
        let size = EnemyKind::Boss.stats().size;
        let pos = Vec2::new(
            crate::clamp(BOSS_SPAWN_X, 0.0, world.width - size.x),
            crate::clamp(BOSS_SPAWN_Y, 0.0, world.height - size.y),
        );
        log::info!("The Willager has entered the arena");
        Enemy::new(id, EnemyKind::Boss, pos)
    }
}

//! Arrows fired by ranged grunts
//!
//! Each archer owns its own list of projectiles and steps them once per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::combatant::WorldBounds;
use crate::consts::*;

/// A single arrow in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Center of the arrow
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifetime_ms: f32,
    pub damage: f32,
}

/// What happened to a projectile during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileStep {
    /// Still flying
    InFlight,
    /// Ran out of lifetime or left the world
    Expired,
    /// Struck the target for the given damage
    Hit(f32),
}

impl Projectile {
    /// Arrow from `origin` aimed at `target`'s current position (no lead).
    /// Aiming at itself yields a motionless arrow that simply expires.
    pub fn aimed(origin: Vec2, target: Vec2, damage: f32) -> Self {
        let dir = crate::safe_normalize(target - origin);
        Self {
            pos: origin,
            vel: dir * PROJECTILE_SPEED,
            lifetime_ms: PROJECTILE_LIFETIME_MS,
            damage,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, Vec2::splat(PROJECTILE_SIZE))
    }

    /// Heading in radians (for rendering)
    pub fn angle(&self) -> f32 {
        self.vel.y.atan2(self.vel.x)
    }

    /// Advance by `dt_ms`, then test against the target
    pub fn step(&mut self, dt_ms: f32, world: WorldBounds, target: &Aabb) -> ProjectileStep {
        self.pos += self.vel * (dt_ms / 1000.0);
        self.lifetime_ms -= dt_ms;

        if self.lifetime_ms <= 0.0 || !world.contains(self.pos) {
            return ProjectileStep::Expired;
        }

        if self.bounds().overlaps(target) {
            return ProjectileStep::Hit(self.damage);
        }

        ProjectileStep::InFlight
    }
}

/// Step every projectile, dropping expired and spent ones.
/// Returns the total damage dealt to the target this tick.
pub fn step_all(
    projectiles: &mut Vec<Projectile>,
    dt_ms: f32,
    world: WorldBounds,
    target: &Aabb,
) -> f32 {
    let mut damage = 0.0;
    projectiles.retain_mut(|p| match p.step(dt_ms, world, target) {
        ProjectileStep::InFlight => true,
        ProjectileStep::Expired => false,
        ProjectileStep::Hit(d) => {
            damage += d;
            false
        }
    });
    damage
}

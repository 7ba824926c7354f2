//! Shared combatant state
//!
//! The player and every enemy carry a [`Body`]: position, velocity, size,
//! health and attack stats. Behaviour differs per archetype, but all of them
//! expose the same [`Combatant`] capability set.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::clamp;

/// Playable area, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when `p` lies inside the world (edges included)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(crate::consts::WORLD_WIDTH, crate::consts::WORLD_HEIGHT)
    }
}

/// A cooldown measured against the simulation clock (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub duration_ms: f64,
    /// Last time the action fired. `None` means it has never fired and is ready.
    pub last_ms: Option<f64>,
}

impl Cooldown {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            last_ms: None,
        }
    }

    /// Strictly more than `duration_ms` must have passed since the last trigger
    pub fn ready(&self, now_ms: f64) -> bool {
        self.last_ms
            .is_none_or(|last| now_ms - last > self.duration_ms)
    }

    pub fn trigger(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }
}

/// Physical and combat state common to all fighters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub attack_cooldown: Cooldown,
    pub facing_right: bool,
}

impl Body {
    /// Full-health body at `pos`. Negative stats are clamped to zero.
    pub fn new(pos: Vec2, size: Vec2, max_health: f32) -> Self {
        let max_health = max_health.max(0.0);
        Self {
            pos,
            vel: Vec2::ZERO,
            size: size.max(Vec2::ZERO),
            health: max_health,
            max_health,
            speed: 0.0,
            attack_damage: 0.0,
            attack_range: 0.0,
            attack_cooldown: Cooldown::new(0.0),
            facing_right: true,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        if self.is_dead() {
            return;
        }
        let amount = amount.max(0.0);
        self.health = clamp(self.health - amount, 0.0, self.max_health);
    }

    pub fn heal(&mut self, amount: f32) {
        let amount = amount.max(0.0);
        self.health = clamp(self.health + amount, 0.0, self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Displace by `vel * dt`, keep the whole body inside the world and
    /// update facing from horizontal velocity (zero velocity keeps facing).
    pub fn integrate(&mut self, dt: f32, world: WorldBounds) {
        self.pos += self.vel * dt;
        self.pos.x = clamp(self.pos.x, 0.0, world.width - self.size.x);
        self.pos.y = clamp(self.pos.y, 0.0, world.height - self.size.y);

        if self.vel.x != 0.0 {
            self.facing_right = self.vel.x > 0.0;
        }
    }
}

/// Capability set shared by the player and every enemy archetype
pub trait Combatant {
    /// What this combatant needs from the world to advance one tick
    type Context<'a>;

    fn update(&mut self, dt_ms: f32, ctx: &mut Self::Context<'_>);

    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn take_damage(&mut self, amount: f32) {
        self.body_mut().take_damage(amount);
    }

    fn is_dead(&self) -> bool {
        self.body().is_dead()
    }

    fn bounds(&self) -> Aabb {
        self.body().bounds()
    }
}

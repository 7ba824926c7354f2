//! The player character
//!
//! Movement comes straight from the normalized input axes. Attacks are sword
//! swings with a cooldown; each swing can damage a given enemy only once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::combatant::{Body, Combatant, Cooldown, WorldBounds};
use super::tick::TickInput;
use crate::consts::*;

/// Animation phase values for the renderer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerAnimation {
    pub time: f32,
    pub bob: f32,
    pub arm_swing: f32,
    pub leg_swing: f32,
}

/// An active sword swing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swing {
    pub started_ms: f64,
    /// Entity ids already struck by this swing
    pub struck: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub swing: Option<Swing>,
    pub anim: PlayerAnimation,
}

/// Per-tick inputs for the player
pub struct PlayerContext<'a> {
    pub input: &'a TickInput,
    pub now_ms: f64,
    pub world: WorldBounds,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y))
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        let mut body = Body::new(
            pos,
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            PLAYER_HEALTH,
        );
        body.speed = PLAYER_SPEED;
        body.attack_damage = PLAYER_ATTACK_DAMAGE;
        body.attack_range = PLAYER_ATTACK_RANGE;
        body.attack_cooldown = Cooldown::new(PLAYER_ATTACK_COOLDOWN_MS);

        Self {
            body,
            swing: None,
            anim: PlayerAnimation::default(),
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.swing.is_some()
    }

    pub fn heal(&mut self, amount: f32) {
        self.body.heal(amount);
    }

    fn start_swing(&mut self, now_ms: f64) {
        self.swing = Some(Swing {
            started_ms: now_ms,
            struck: Vec::new(),
        });
        self.body.attack_cooldown.trigger(now_ms);
    }

    /// Sword hitbox in front of the player, if a swing is active
    pub fn swing_bounds(&self) -> Option<Aabb> {
        self.swing.as_ref()?;
        let b = &self.body;
        let x = if b.facing_right {
            b.pos.x + b.size.x
        } else {
            b.pos.x - b.attack_range
        };
        let y = b.pos.y + b.size.y / 2.0 - PLAYER_SWING_HEIGHT / 2.0;
        Some(Aabb::new(x, y, b.attack_range, PLAYER_SWING_HEIGHT))
    }

    /// Resolve the current swing against one target.
    ///
    /// Returns the damage to apply, or `None` if there is no swing, the target
    /// is out of reach, or this swing already struck it.
    pub fn strike(&mut self, target_id: u32, target: &Aabb) -> Option<f32> {
        let hitbox = self.swing_bounds()?;
        if !hitbox.overlaps(target) {
            return None;
        }
        let swing = self.swing.as_mut()?;
        if swing.struck.contains(&target_id) {
            return None;
        }
        swing.struck.push(target_id);
        Some(self.body.attack_damage)
    }

    fn animate(&mut self, dt: f32, now_ms: f64) {
        let a = &mut self.anim;
        a.time += dt;
        a.bob = (a.time * 8.0).sin();
        a.arm_swing = match &self.swing {
            Some(swing) => ((now_ms - swing.started_ms) as f32 * 0.02).sin() * 90.0,
            None => (a.time * 6.0).sin() * 8.0,
        };
        a.leg_swing = if self.body.vel.x != 0.0 {
            (a.time * 10.0).sin() * 10.0
        } else {
            0.0
        };
    }
}

impl Combatant for Player {
    type Context<'a> = PlayerContext<'a>;

    fn update(&mut self, dt_ms: f32, ctx: &mut PlayerContext<'_>) {
        let dt = dt_ms / 1000.0;
        let now = ctx.now_ms;

        self.body.vel = ctx.input.movement * self.body.speed;

        if ctx.input.attack && self.body.attack_cooldown.ready(now) {
            self.start_swing(now);
        }

        if self
            .swing
            .as_ref()
            .is_some_and(|s| now - s.started_ms > PLAYER_ATTACK_DURATION_MS)
        {
            self.swing = None;
        }

        self.body.integrate(dt, ctx.world);
        self.animate(dt, now);
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

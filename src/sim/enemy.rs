//! Enemy archetypes and their AI state machines
//!
//! Three archetypes share one [`Enemy`] type and dispatch on [`Brain`]:
//! - Grunt (melee): `Wander -> Chase -> Attack`
//! - Archer (ranged): `Patrol -> Chase -> Attack`, shoots arrows
//! - Willager (boss): `Idle/Patrol -> Chase -> Attack`, plus a time-boxed `Special`
//!
//! State transitions are pure functions of distance and cooldown readiness
//! (`next_*_state`). The per-state actions (movement, attacks) run first,
//! then the transition is evaluated, once per tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::combatant::{Body, Combatant, Cooldown, WorldBounds};
use super::projectile::{self, Projectile};
use crate::consts::*;
use crate::{distance, safe_normalize};

/// Enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    GruntMelee,
    GruntRanged,
    Boss,
}

/// Random-walk tuning for idle movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderParams {
    /// Chance per tick of picking a new heading
    pub chance: f64,
    /// Fraction of full speed used while wandering
    pub speed_factor: f32,
    /// Velocity multiplier on ticks without a new heading
    pub damping: f32,
}

/// Static stats for an archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeStats {
    pub size: Vec2,
    pub speed: f32,
    pub health: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub detection_range: f32,
    pub attack_cooldown_ms: f64,
    /// Velocity multiplier per tick while planted in `Attack`
    pub attack_damping: f32,
    pub wander: WanderParams,
}

impl EnemyKind {
    pub fn stats(&self) -> ArchetypeStats {
        match self {
            Self::GruntMelee => ArchetypeStats {
                size: Vec2::new(30.0, 50.0),
                speed: 60.0,
                health: 50.0,
                attack_damage: 15.0,
                attack_range: 40.0,
                detection_range: 150.0,
                attack_cooldown_ms: 1500.0,
                attack_damping: 0.3,
                wander: WanderParams {
                    chance: 0.02,
                    speed_factor: 0.3,
                    damping: 0.9,
                },
            },
            Self::GruntRanged => ArchetypeStats {
                size: Vec2::new(28.0, 48.0),
                speed: 70.0,
                health: 40.0,
                attack_damage: 20.0,
                attack_range: 50.0,
                detection_range: 180.0,
                attack_cooldown_ms: 1200.0,
                attack_damping: 0.5,
                wander: WanderParams {
                    chance: 0.03,
                    speed_factor: 0.4,
                    damping: 0.8,
                },
            },
            Self::Boss => ArchetypeStats {
                size: Vec2::new(40.0, 60.0),
                speed: 80.0,
                health: 200.0,
                attack_damage: 35.0,
                attack_range: 60.0,
                detection_range: 200.0,
                attack_cooldown_ms: 1000.0,
                attack_damping: 0.4,
                wander: WanderParams {
                    chance: 0.02,
                    speed_factor: 0.5,
                    damping: 0.85,
                },
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GruntMelee => "Zombie",
            Self::GruntRanged => "Skeleton",
            Self::Boss => "Willager",
        }
    }
}

/// Archer shot interval
pub const RANGED_SHOOT_COOLDOWN_MS: f64 = 2500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeleeState {
    Wander,
    Chase,
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangedState {
    Patrol,
    Chase,
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Idle,
    Patrol,
    Chase,
    Attack,
    Special,
}

/// Per-archetype AI state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Brain {
    Melee {
        state: MeleeState,
    },
    Ranged {
        state: RangedState,
        shoot_cooldown: Cooldown,
        projectiles: Vec<Projectile>,
        shots_fired: u32,
    },
    Boss {
        state: BossState,
        special_cooldown: Cooldown,
        /// End of the current special window
        special_until_ms: f64,
        /// Corruption meter, grows as the boss takes damage
        kyron_power: f32,
    },
}

/// Where a blow against the player came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeKind {
    Melee,
    Arrow,
    Special,
}

/// Damage an enemy dealt to the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub source: u32,
    pub kind: StrikeKind,
    pub damage: f32,
}

/// Animation phase values for the renderer. Meaning varies by archetype:
/// `tilt` is head tilt / bone rattle / head shake, `glow` and `eye_glow` are boss only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyAnimation {
    pub time: f32,
    pub bob: f32,
    pub swing: f32,
    pub legs: f32,
    pub tilt: f32,
    pub glow: f32,
    pub eye_glow: f32,
}

/// Per-tick world view for an enemy
pub struct EnemyContext<'a> {
    /// The player (read-only; damage is reported through `strikes`)
    pub target: &'a Body,
    pub world: WorldBounds,
    pub now_ms: f64,
    pub rng: &'a mut Pcg32,
    pub strikes: &'a mut Vec<Strike>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    pub detection_range: f32,
    pub brain: Brain,
    pub anim: EnemyAnimation,
}

/// Melee grunt transitions
pub fn next_melee_state(
    state: MeleeState,
    dist: f32,
    attack_range: f32,
    detection_range: f32,
) -> MeleeState {
    match state {
        MeleeState::Wander if dist < detection_range => MeleeState::Chase,
        MeleeState::Chase if dist < attack_range => MeleeState::Attack,
        MeleeState::Chase if dist > detection_range * 2.0 => MeleeState::Wander,
        MeleeState::Attack if dist > attack_range => MeleeState::Chase,
        s => s,
    }
}

/// Archer transitions
pub fn next_ranged_state(state: RangedState, dist: f32, detection_range: f32) -> RangedState {
    match state {
        RangedState::Patrol if dist < detection_range => RangedState::Chase,
        RangedState::Chase if dist < detection_range * RANGED_ATTACK_FRACTION => {
            RangedState::Attack
        }
        RangedState::Chase if dist > detection_range * 2.0 => RangedState::Patrol,
        RangedState::Attack if dist > detection_range => RangedState::Chase,
        s => s,
    }
}

/// Boss transitions. `special_ready` is whether the special cooldown has elapsed;
/// `special_over` is whether the current special window has ended.
pub fn next_boss_state(
    state: BossState,
    dist: f32,
    attack_range: f32,
    detection_range: f32,
    special_ready: bool,
    special_over: bool,
) -> BossState {
    match state {
        BossState::Idle | BossState::Patrol if dist < detection_range => BossState::Chase,
        BossState::Chase => {
            if dist < BOSS_SPECIAL_TRIGGER_RANGE && special_ready {
                BossState::Special
            } else if dist < attack_range {
                BossState::Attack
            } else if dist > detection_range * 2.0 {
                BossState::Patrol
            } else {
                BossState::Chase
            }
        }
        BossState::Attack if dist > attack_range => BossState::Chase,
        BossState::Special if special_over => BossState::Chase,
        s => s,
    }
}

/// Random walk: occasionally pick a new heading, otherwise bleed off speed
fn wander(body: &mut Body, params: WanderParams, rng: &mut Pcg32) {
    if rng.random_bool(params.chance) {
        let angle = rng.random_range(0.0..TAU);
        body.vel = Vec2::new(angle.cos(), angle.sin()) * body.speed * params.speed_factor;
    } else {
        body.vel *= params.damping;
    }
}

/// Shared melee swing: apply damage when off cooldown and still in range
fn melee_attack(body: &mut Body, id: u32, dist: f32, ctx: &mut EnemyContext<'_>) {
    if body.attack_cooldown.ready(ctx.now_ms) && dist < body.attack_range {
        ctx.strikes.push(Strike {
            source: id,
            kind: StrikeKind::Melee,
            damage: body.attack_damage,
        });
        body.attack_cooldown.trigger(ctx.now_ms);
    }
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        let stats = kind.stats();
        let mut body = Body::new(pos, stats.size, stats.health);
        body.speed = stats.speed.max(0.0);
        body.attack_damage = stats.attack_damage;
        body.attack_range = stats.attack_range;
        body.attack_cooldown = Cooldown::new(stats.attack_cooldown_ms);
        body.facing_right = false;

        let brain = match kind {
            EnemyKind::GruntMelee => Brain::Melee {
                state: MeleeState::Wander,
            },
            EnemyKind::GruntRanged => Brain::Ranged {
                state: RangedState::Patrol,
                shoot_cooldown: Cooldown::new(RANGED_SHOOT_COOLDOWN_MS),
                projectiles: Vec::new(),
                shots_fired: 0,
            },
            EnemyKind::Boss => Brain::Boss {
                state: BossState::Idle,
                special_cooldown: Cooldown::new(BOSS_SPECIAL_COOLDOWN_MS),
                special_until_ms: 0.0,
                kyron_power: 0.0,
            },
        };

        Self {
            id,
            kind,
            body,
            detection_range: stats.detection_range,
            brain,
            anim: EnemyAnimation::default(),
        }
    }

    /// Human-readable AI state
    pub fn state_label(&self) -> &'static str {
        match &self.brain {
            Brain::Melee { state } => match state {
                MeleeState::Wander => "wander",
                MeleeState::Chase => "chase",
                MeleeState::Attack => "attack",
            },
            Brain::Ranged { state, .. } => match state {
                RangedState::Patrol => "patrol",
                RangedState::Chase => "chase",
                RangedState::Attack => "attack",
            },
            Brain::Boss { state, .. } => match state {
                BossState::Idle => "idle",
                BossState::Patrol => "patrol",
                BossState::Chase => "chase",
                BossState::Attack => "attack",
                BossState::Special => "special",
            },
        }
    }

    /// Arrows currently in flight (empty for non-archers)
    pub fn projectiles(&self) -> &[Projectile] {
        match &self.brain {
            Brain::Ranged { projectiles, .. } => projectiles,
            _ => &[],
        }
    }

    /// Boss corruption meter (0 for grunts)
    pub fn kyron_power(&self) -> f32 {
        match &self.brain {
            Brain::Boss { kyron_power, .. } => *kyron_power,
            _ => 0.0,
        }
    }

    fn animate(&mut self, dt: f32) {
        let attacking = self.state_label() == "attack";
        let a = &mut self.anim;
        a.time += dt;
        let t = a.time;
        match self.kind {
            EnemyKind::GruntMelee => {
                a.bob = (t * 6.0).sin() * 1.5;
                a.swing = (t * 8.0).sin() * 20.0;
                a.legs = (t * 9.0).sin() * 12.0;
                a.tilt = (t * 3.0).sin() * 5.0;
            }
            EnemyKind::GruntRanged => {
                a.tilt = (t * 15.0).sin() * 3.0;
                a.bob = (t * 7.0).sin() * 2.0;
                a.swing = if attacking {
                    (t * 10.0).sin() * 45.0
                } else {
                    (t * 5.0).sin() * 10.0
                };
                a.legs = (t * 12.0).sin() * 15.0;
            }
            EnemyKind::Boss => {
                a.glow = (t * 4.0).sin() * 0.3 + 0.7;
                a.bob = (t * 10.0).sin() * 3.0;
                a.swing = (t * 12.0).sin() * 40.0;
                a.tilt = (t * 8.0).sin() * 8.0;
                a.eye_glow = (t * 6.0).sin() * 50.0 + 205.0;
            }
        }
    }

    fn think(&mut self, ctx: &mut EnemyContext<'_>) {
        let stats = self.kind.stats();
        let target = ctx.target.pos;
        let dist = distance(self.body.pos, target);
        let dir = safe_normalize(target - self.body.pos);
        let body = &mut self.body;
        let id = self.id;
        let detection = self.detection_range;

        match &mut self.brain {
            Brain::Melee { state } => {
                match state {
                    MeleeState::Wander => wander(body, stats.wander, ctx.rng),
                    MeleeState::Chase => body.vel = dir * body.speed,
                    MeleeState::Attack => {
                        body.vel *= stats.attack_damping;
                        melee_attack(body, id, dist, ctx);
                    }
                }

                let next = next_melee_state(*state, dist, body.attack_range, detection);
                if next != *state {
                    log::debug!("enemy {} melee {:?} -> {:?} (dist {:.1})", id, state, next, dist);
                    // Wind-up: the first swing comes one cooldown after planting
                    if next == MeleeState::Attack {
                        body.attack_cooldown.trigger(ctx.now_ms);
                    }
                    *state = next;
                }
            }

            Brain::Ranged {
                state,
                shoot_cooldown,
                projectiles,
                shots_fired,
            } => {
                match state {
                    RangedState::Patrol => wander(body, stats.wander, ctx.rng),
                    RangedState::Chase => {
                        body.vel = if dist < RANGED_STANDOFF {
                            -dir * body.speed * 0.5
                        } else {
                            dir * body.speed
                        };
                    }
                    RangedState::Attack => {
                        body.vel *= stats.attack_damping;
                        if shoot_cooldown.ready(ctx.now_ms) {
                            let origin = body.bounds().center();
                            let aim = ctx.target.bounds().center();
                            projectiles.push(Projectile::aimed(origin, aim, body.attack_damage));
                            shoot_cooldown.trigger(ctx.now_ms);
                            *shots_fired += 1;
                            log::debug!("enemy {} fired arrow #{}", id, shots_fired);
                        }
                    }
                }

                let next = next_ranged_state(*state, dist, detection);
                if next != *state {
                    log::debug!("enemy {} ranged {:?} -> {:?} (dist {:.1})", id, state, next, dist);
                    *state = next;
                }
            }

            Brain::Boss {
                state,
                special_cooldown,
                special_until_ms,
                ..
            } => {
                match state {
                    BossState::Idle => body.vel = Vec2::ZERO,
                    BossState::Patrol => wander(body, stats.wander, ctx.rng),
                    BossState::Chase => body.vel = dir * body.speed,
                    BossState::Attack => {
                        body.vel *= stats.attack_damping;
                        melee_attack(body, id, dist, ctx);
                    }
                    BossState::Special => {
                        body.vel = Vec2::ZERO;
                        if dist < BOSS_SPECIAL_RADIUS && ctx.now_ms < *special_until_ms {
                            ctx.strikes.push(Strike {
                                source: id,
                                kind: StrikeKind::Special,
                                damage: BOSS_SPECIAL_DAMAGE,
                            });
                        }
                    }
                }

                let next = next_boss_state(
                    *state,
                    dist,
                    body.attack_range,
                    detection,
                    special_cooldown.ready(ctx.now_ms),
                    ctx.now_ms >= *special_until_ms,
                );
                if next != *state {
                    log::debug!("boss {} {:?} -> {:?} (dist {:.1})", id, state, next, dist);
                    if next == BossState::Special {
                        special_cooldown.trigger(ctx.now_ms);
                        *special_until_ms = ctx.now_ms + BOSS_SPECIAL_DURATION_MS;
                    }
                    *state = next;
                }
            }
        }
    }
}

impl Combatant for Enemy {
    type Context<'a> = EnemyContext<'a>;

    fn update(&mut self, dt_ms: f32, ctx: &mut EnemyContext<'_>) {
        let dt = dt_ms / 1000.0;

        self.animate(dt);
        self.think(ctx);
        self.body.integrate(dt, ctx.world);

        if let Brain::Ranged { projectiles, .. } = &mut self.brain {
            let damage = projectile::step_all(projectiles, dt_ms, ctx.world, &ctx.target.bounds());
            if damage > 0.0 {
                ctx.strikes.push(Strike {
                    source: self.id,
                    kind: StrikeKind::Arrow,
                    damage,
                });
            }
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn take_damage(&mut self, amount: f32) {
        if self.body.is_dead() {
            return;
        }
        if let Brain::Boss { kyron_power, .. } = &mut self.brain {
            *kyron_power = (*kyron_power + amount.max(0.0) * 0.5).min(BOSS_MAX_KYRON);
        }
        self.body.take_damage(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct Harness {
        target: Body,
        rng: Pcg32,
        strikes: Vec<Strike>,
    }

    impl Harness {
        fn new(target_pos: Vec2) -> Self {
            Self {
                target: Body::new(target_pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT), 100.0),
                rng: Pcg32::seed_from_u64(7),
                strikes: Vec::new(),
            }
        }

        fn step(&mut self, enemy: &mut Enemy, dt_ms: f32, now_ms: f64) {
            let mut ctx = EnemyContext {
                target: &self.target,
                world: WorldBounds::default(),
                now_ms,
                rng: &mut self.rng,
                strikes: &mut self.strikes,
            };
            enemy.update(dt_ms, &mut ctx);
        }
    }

    #[test]
    fn test_melee_transitions() {
        use MeleeState::*;
        assert_eq!(next_melee_state(Wander, 149.0, 40.0, 150.0), Chase);
        assert_eq!(next_melee_state(Wander, 151.0, 40.0, 150.0), Wander);
        assert_eq!(next_melee_state(Chase, 39.0, 40.0, 150.0), Attack);
        // Hysteresis: between detection and 2x detection keeps chasing
        assert_eq!(next_melee_state(Chase, 250.0, 40.0, 150.0), Chase);
        assert_eq!(next_melee_state(Chase, 301.0, 40.0, 150.0), Wander);
        assert_eq!(next_melee_state(Attack, 41.0, 40.0, 150.0), Chase);
        assert_eq!(next_melee_state(Attack, 20.0, 40.0, 150.0), Attack);
    }

    #[test]
    fn test_ranged_transitions() {
        use RangedState::*;
        assert_eq!(next_ranged_state(Patrol, 179.0, 180.0), Chase);
        assert_eq!(next_ranged_state(Chase, 143.0, 180.0), Attack);
        assert_eq!(next_ranged_state(Chase, 170.0, 180.0), Chase);
        assert_eq!(next_ranged_state(Chase, 361.0, 180.0), Patrol);
        assert_eq!(next_ranged_state(Attack, 170.0, 180.0), Attack);
        assert_eq!(next_ranged_state(Attack, 181.0, 180.0), Chase);
    }

    #[test]
    fn test_boss_transitions() {
        use BossState::*;
        assert_eq!(next_boss_state(Idle, 250.0, 60.0, 200.0, true, true), Idle);
        assert_eq!(next_boss_state(Idle, 199.0, 60.0, 200.0, true, true), Chase);
        // Special pre-empts attack when ready
        assert_eq!(next_boss_state(Chase, 50.0, 60.0, 200.0, true, true), Special);
        assert_eq!(next_boss_state(Chase, 50.0, 60.0, 200.0, false, true), Attack);
        assert_eq!(next_boss_state(Chase, 140.0, 60.0, 200.0, true, true), Special);
        assert_eq!(next_boss_state(Chase, 401.0, 60.0, 200.0, true, true), Patrol);
        assert_eq!(next_boss_state(Patrol, 150.0, 60.0, 200.0, true, true), Chase);
        assert_eq!(next_boss_state(Special, 10.0, 60.0, 200.0, true, false), Special);
        assert_eq!(next_boss_state(Special, 10.0, 60.0, 200.0, true, true), Chase);
        // Never returns to Idle
        for s in [Patrol, Chase, Attack, Special] {
            for d in [0.0, 100.0, 1000.0] {
                assert_ne!(next_boss_state(s, d, 60.0, 200.0, true, true), Idle);
            }
        }
    }

    #[test]
    fn test_melee_chases_then_attacks_on_cooldown() {
        let mut h = Harness::new(Vec2::new(200.0, 100.0));
        let mut grunt = Enemy::new(1, EnemyKind::GruntMelee, Vec2::new(300.0, 100.0));

        h.step(&mut grunt, 16.0, 0.0);
        assert_eq!(grunt.state_label(), "chase");
        h.step(&mut grunt, 16.0, 16.0);
        assert_eq!(grunt.state_label(), "chase");
        assert!(grunt.body.vel.x < 0.0);

        // Move the target on top of the grunt: plants into Attack with a wind-up
        h.target.pos = grunt.body.pos + Vec2::new(10.0, 0.0);
        h.step(&mut grunt, 16.0, 100.0);
        assert_eq!(grunt.state_label(), "attack");
        assert!(h.strikes.is_empty());

        h.step(&mut grunt, 16.0, 1500.0);
        assert!(h.strikes.is_empty());
        h.step(&mut grunt, 16.0, 1601.0);
        assert_eq!(h.strikes.len(), 1);
        assert_eq!(h.strikes[0].kind, StrikeKind::Melee);
        assert_eq!(h.strikes[0].damage, 15.0);

        // Next swing only after another full cooldown
        h.step(&mut grunt, 16.0, 2000.0);
        assert_eq!(h.strikes.len(), 1);
        h.step(&mut grunt, 16.0, 3102.0);
        assert_eq!(h.strikes.len(), 2);
    }

    #[test]
    fn test_ranged_flees_inside_standoff() {
        let mut h = Harness::new(Vec2::new(500.0, 500.0));
        let mut archer = Enemy::new(2, EnemyKind::GruntRanged, Vec2::new(560.0, 500.0));
        if let Brain::Ranged { state, .. } = &mut archer.brain {
            *state = RangedState::Chase;
        }
        // Close enough to switch to Attack after this tick, but moves away first
        h.step(&mut archer, 16.0, 0.0);
        assert!(archer.body.vel.x > 0.0);
        assert!((archer.body.vel.length() - 35.0).abs() < 1e-3);
    }

    #[test]
    fn test_ranged_closes_in_outside_standoff() {
        let mut h = Harness::new(Vec2::new(500.0, 500.0));
        let mut archer = Enemy::new(10, EnemyKind::GruntRanged, Vec2::new(670.0, 500.0));
        if let Brain::Ranged { state, .. } = &mut archer.brain {
            *state = RangedState::Chase;
        }
        h.step(&mut archer, 16.0, 0.0);
        assert!(archer.body.vel.x < 0.0);
        assert!((archer.body.vel.length() - 70.0).abs() < 1e-3);
        assert_eq!(archer.state_label(), "chase");
    }

    #[test]
    fn test_ranged_fires_at_most_once_per_cooldown() {
        let mut h = Harness::new(Vec2::new(500.0, 500.0));
        let mut archer = Enemy::new(3, EnemyKind::GruntRanged, Vec2::new(620.0, 500.0));
        if let Brain::Ranged { state, .. } = &mut archer.brain {
            *state = RangedState::Attack;
        }

        let mut fired_at: Vec<f64> = Vec::new();
        let mut last_count = 0;
        let mut now = 0.0;
        while now < 10_000.0 {
            h.step(&mut archer, 16.0, now);
            if let Brain::Ranged { shots_fired, .. } = &archer.brain {
                if *shots_fired != last_count {
                    last_count = *shots_fired;
                    fired_at.push(now);
                }
            }
            now += 16.0;
        }

        assert!(fired_at.len() >= 3);
        for pair in fired_at.windows(2) {
            assert!(pair[1] - pair[0] > RANGED_SHOOT_COOLDOWN_MS);
        }
        // Arrows flew into the target
        assert!(h.strikes.iter().any(|s| s.kind == StrikeKind::Arrow));
    }

    #[test]
    fn test_boss_special_window() {
        let mut h = Harness::new(Vec2::new(1000.0, 500.0));
        let mut boss = Enemy::new(4, EnemyKind::Boss, Vec2::new(1100.0, 500.0));

        h.step(&mut boss, 16.0, 0.0);
        assert_eq!(boss.state_label(), "chase");

        // Within trigger range and special ready: Special on the next evaluation
        h.step(&mut boss, 16.0, 16.0);
        assert_eq!(boss.state_label(), "special");

        // Rooted and bursting every tick inside the radius
        h.step(&mut boss, 16.0, 32.0);
        assert_eq!(boss.body.vel, Vec2::ZERO);
        assert_eq!(h.strikes.len(), 1);
        assert_eq!(h.strikes[0].kind, StrikeKind::Special);
        h.step(&mut boss, 16.0, 48.0);
        assert_eq!(h.strikes.len(), 2);

        // Window over: back to Chase, and the special is on cooldown
        // Window over: no burst on the exit tick, back to Chase
        let mut now = 64.0;
        while now < 16.0 + BOSS_SPECIAL_DURATION_MS {
            h.step(&mut boss, 16.0, now);
            now += 16.0;
        }
        let bursts = h.strikes.len();
        h.step(&mut boss, 16.0, 16.0 + BOSS_SPECIAL_DURATION_MS);
        assert_eq!(boss.state_label(), "chase");
        assert_eq!(h.strikes.len(), bursts);
        assert!(
            h.strikes
                .iter()
                .all(|s| s.kind == StrikeKind::Special)
        );

        // Special is on cooldown; nothing more lands as a burst
        h.step(&mut boss, 16.0, 300.0);
        assert_ne!(boss.state_label(), "special");
        assert!(
            h.strikes[bursts..]
                .iter()
                .all(|s| s.kind != StrikeKind::Special)
        );
    }

    #[test]
    fn test_boss_special_outside_radius_deals_nothing() {
        let mut h = Harness::new(Vec2::new(1000.0, 500.0));
        let mut boss = Enemy::new(8, EnemyKind::Boss, Vec2::new(1000.0 + BOSS_SPECIAL_RADIUS, 500.0));
        boss.body.vel = Vec2::new(30.0, 0.0);
        if let Brain::Boss {
            state,
            special_cooldown,
            special_until_ms,
            ..
        } = &mut boss.brain
        {
            *state = BossState::Special;
            special_cooldown.trigger(0.0);
            *special_until_ms = 1000.0;
        }

        for i in 0..5 {
            h.step(&mut boss, 16.0, i as f64 * 16.0);
            assert_eq!(boss.state_label(), "special");
            assert_eq!(boss.body.vel, Vec2::ZERO);
        }
        assert_eq!(boss.body.pos, Vec2::new(1000.0 + BOSS_SPECIAL_RADIUS, 500.0));
        assert!(h.strikes.is_empty());
    }

    #[test]
    fn test_boss_attack_has_no_wind_up() {
        let mut h = Harness::new(Vec2::new(1000.0, 500.0));
        let mut boss = Enemy::new(9, EnemyKind::Boss, Vec2::new(1030.0, 500.0));
        if let Brain::Boss {
            state,
            special_cooldown,
            ..
        } = &mut boss.brain
        {
            *state = BossState::Attack;
            // Keep the special out of the way
            special_cooldown.trigger(0.0);
        }

        // First swing lands on the first tick in range
        h.step(&mut boss, 16.0, 16.0);
        assert_eq!(h.strikes.len(), 1);
        assert_eq!(h.strikes[0].kind, StrikeKind::Melee);
        assert_eq!(h.strikes[0].damage, 35.0);

        // Then once per 1000 ms cooldown
        let mut now = 32.0;
        while now <= 1016.0 {
            h.step(&mut boss, 16.0, now);
            now += 16.0;
        }
        assert_eq!(h.strikes.len(), 1);
        h.step(&mut boss, 16.0, 1017.0);
        assert_eq!(h.strikes.len(), 2);
        assert!(h.strikes.iter().all(|s| s.damage == 35.0));
    }

    #[test]
    fn test_boss_kyron_power() {
        let mut boss = Enemy::new(5, EnemyKind::Boss, Vec2::ZERO);
        boss.take_damage(25.0);
        assert_eq!(boss.kyron_power(), 12.5);
        for _ in 0..20 {
            boss.take_damage(25.0);
        }
        assert_eq!(boss.kyron_power(), BOSS_MAX_KYRON);
        assert!(boss.is_dead());
    }

    #[test]
    fn test_wander_is_deterministic_per_seed() {
        let mut a = Harness::new(Vec2::new(1900.0, 1900.0));
        let mut b = Harness::new(Vec2::new(1900.0, 1900.0));
        let mut ga = Enemy::new(6, EnemyKind::GruntMelee, Vec2::new(500.0, 500.0));
        let mut gb = ga.clone();
        for i in 0..500 {
            a.step(&mut ga, 16.0, i as f64 * 16.0);
            b.step(&mut gb, 16.0, i as f64 * 16.0);
        }
        assert_eq!(ga.body.pos, gb.body.pos);
        assert_eq!(ga.state_label(), "wander");
    }
}

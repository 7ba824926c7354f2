//! Per-frame simulation tick
//!
//! Update order is fixed: player, then each enemy (AI, then both directions of
//! combat, then dead-enemy removal), then the boss, camera, scheduled events,
//! wave completion and finally the game-over check. Combat always reads the
//! positions entities reached earlier in the same tick.

use glam::Vec2;

use super::camera::Camera;
use super::clock::FrameTime;
use rand_pcg::Pcg32;

use super::combatant::{Combatant, WorldBounds};
use super::enemy::{Enemy, EnemyContext, Strike};
use super::player::{Player, PlayerContext};
use super::schedule::ScheduledKind;
use super::state::{GamePhase, GameState};
use crate::consts::{DIAGONAL_SCALE, PLAYER_SWING_HEIGHT};
use crate::settings::Settings;

/// Normalized input contract consumed by the simulation
pub trait InputSource {
    /// Movement axes, each in [-1, 1], diagonals already normalized
    fn movement(&self) -> Vec2;
    fn is_attacking(&self) -> bool;
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction (see [`InputSource::movement`])
    pub movement: Vec2,
    /// Attack held (sword swing when off cooldown)
    pub attack: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Build from raw axes: clamp each to [-1, 1] and scale diagonals
    pub fn from_axes(x: f32, y: f32, attack: bool) -> Self {
        let mut movement = Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
        if movement.x != 0.0 && movement.y != 0.0 {
            movement *= DIAGONAL_SCALE;
        }
        Self {
            movement,
            attack,
            ..Default::default()
        }
    }

    /// Snapshot any input provider
    pub fn sample(source: &impl InputSource) -> Self {
        let m = source.movement();
        Self::from_axes(m.x, m.y, source.is_attacking())
    }
}

impl InputSource for TickInput {
    fn movement(&self) -> Vec2 {
        self.movement
    }

    fn is_attacking(&self) -> bool {
        self.attack
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, frame: FrameTime) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    // Don't tick if paused or the match is over
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = frame.dt_ms.clamp(0.0, state.settings.max_frame_dt_ms);
    let now = frame.now_ms;
    state.time_ticks += 1;
    state.last_now_ms = now;

    // Idle/demo mode - autopilot plays the game
    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    // Player
    let mut player_ctx = PlayerContext {
        input: &input,
        now_ms: now,
        world: state.world,
    };
    state.player.update(dt, &mut player_ctx);

    // Regular enemies
    let mut strikes: Vec<Strike> = Vec::new();
    for enemy in state.enemies.iter_mut().filter(|e| !e.is_dead()) {
        fight(
            enemy,
            &mut state.player,
            &mut state.camera,
            &mut state.rng,
            &mut strikes,
            &state.settings,
            state.world,
            dt,
            now,
        );
    }
    state.enemies.retain(|e| {
        if e.is_dead() {
            log::debug!("{} {} defeated", e.kind.name(), e.id);
        }
        !e.is_dead()
    });

    // Boss
    if let Some(boss) = state.boss.as_mut() {
        if !boss.is_dead() {
            fight(
                boss,
                &mut state.player,
                &mut state.camera,
                &mut state.rng,
                &mut strikes,
                &state.settings,
                state.world,
                dt,
                now,
            );
            if boss.is_dead() {
                log::info!("The Willager is defeated!");
                state.phase = GamePhase::Victory;
            }
        }
    }

    // Camera
    let target = state.camera.follow.and_then(|t| state.resolve_target(t));
    state.camera.update(dt, target, &mut state.rng);

    // Deferred wave spawns
    for event in state.schedule.drain_due(now) {
        match event {
            ScheduledKind::SpawnWave(wave) => {
                if state.phase == GamePhase::Playing {
                    state.spawn_wave(wave);
                }
            }
        }
    }

    check_wave_complete(state, now);

    // Game over, even if the boss fell this same tick
    if state.player.is_dead() {
        log::info!("Game over on wave {}", state.wave_number);
        state.phase = GamePhase::GameOver;
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// One enemy's turn: AI update, then player-hits-enemy, then enemy-hits-player
#[allow(clippy::too_many_arguments)]
fn fight(
    enemy: &mut Enemy,
    player: &mut Player,
    camera: &mut Camera,
    rng: &mut Pcg32,
    strikes: &mut Vec<Strike>,
    settings: &Settings,
    world: WorldBounds,
    dt: f32,
    now: f64,
) {
    let mut ctx = EnemyContext {
        target: &player.body,
        world,
        now_ms: now,
        rng: &mut *rng,
        strikes: &mut *strikes,
    };
    enemy.update(dt, &mut ctx);

    if let Some(damage) = player.strike(enemy.id, &enemy.bounds()) {
        enemy.take_damage(damage);
        log::debug!(
            "Player hit {} {} for {} ({} left)",
            enemy.kind.name(),
            enemy.id,
            damage,
            enemy.body.health
        );
    }

    for strike in strikes.drain(..) {
        player.take_damage(strike.damage);
        log::debug!(
            "{:?} from {} hit player for {} ({} left)",
            strike.kind,
            strike.source,
            strike.damage,
            player.body.health
        );
        if settings.camera_shake_on_hit {
            camera.start_shake(
                settings.hit_shake_intensity,
                settings.hit_shake_duration_ms,
                rng,
            );
        }
    }
}

/// Advance to the next wave once the field is clear
pub fn check_wave_complete(state: &mut GameState, now: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !state.enemies.is_empty() || state.live_boss().is_some() || state.schedule.has_pending_spawn() {
        return;
    }

    state.wave_number += 1;
    if state.wave_number <= state.director.final_wave {
        log::info!("Wave cleared, wave {} next", state.wave_number);
        state.schedule_wave(state.wave_number, now);
    } else if state.boss.as_ref().is_some_and(|b| b.is_dead()) {
        log::info!("All waves cleared");
        state.phase = GamePhase::Victory;
    }
}

/// Demo input: line up beside the nearest living enemy and swing
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player.body;
    let center = player.bounds().center();

    let nearest = state
        .enemies
        .iter()
        .chain(state.live_boss())
        .filter(|e| !e.is_dead())
        .min_by(|a, b| {
            let da = a.bounds().center().distance_squared(center);
            let db = b.bounds().center().distance_squared(center);
            da.total_cmp(&db)
        });

    let Some(enemy) = nearest else {
        return TickInput {
            idle_mode: true,
            ..Default::default()
        };
    };

    let target = enemy.bounds();
    let delta = target.center() - center;
    let toward = if delta.x >= 0.0 { 1.0 } else { -1.0 };
    let reach = (player.size.x + player.attack_range + target.width) / 2.0;

    // Close in, then creep so the sword stays on the enemy's side
    let x = if delta.x.abs() > reach {
        toward
    } else if delta.x.abs() > player.size.x / 2.0 {
        toward * 0.05
    } else {
        0.0
    };
    let y = if delta.y.abs() > 4.0 { delta.y.signum() } else { 0.0 };

    let attack = delta.x.abs() <= reach + 10.0
        && delta.y.abs() < (PLAYER_SWING_HEIGHT + target.height) / 2.0;

    TickInput {
        idle_mode: true,
        ..TickInput::from_axes(x, y, attack)
    }
}

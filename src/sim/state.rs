//! Game state and core simulation types
//!
//! Everything one match needs lives in [`GameState`]: the player, the active
//! enemy set, the boss, the camera, the event queue and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, FollowTarget};
use super::combatant::{Combatant, WorldBounds};
use super::director::WaveDirector;
use super::enemy::Enemy;
use super::player::Player;
use super::schedule::{EventQueue, ScheduledKind};
use crate::settings::Settings;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player died
    GameOver,
    /// Boss defeated
    Victory,
}

impl GamePhase {
    /// Terminal phases only leave through `reset()`
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub director: WaveDirector,
    pub world: WorldBounds,
    /// RNG for wandering, spawn jitter and camera shake
    pub rng: Pcg32,
    /// Current wave (1-based)
    pub wave_number: u32,
    pub phase: GamePhase,
    pub player: Player,
    /// Regular enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    pub boss: Option<Enemy>,
    pub camera: Camera,
    pub schedule: EventQueue,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Clock reading of the last simulated tick
    pub last_now_ms: f64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a new match at wave 1
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let world = WorldBounds::new(settings.world_width, settings.world_height);

        let mut camera = Camera::new(settings.viewport_width, settings.viewport_height);
        camera.set_bounds(0.0, 0.0, world.width, world.height);
        camera.follow(FollowTarget::Player, settings.camera_follow_speed);

        let player = Player::default();
        camera.set_position(player.bounds().center());

        let mut state = Self {
            director: WaveDirector::from_settings(&settings),
            world,
            rng: Pcg32::seed_from_u64(settings.seed),
            wave_number: 1,
            phase: GamePhase::Playing,
            player,
            enemies: Vec::new(),
            boss: None,
            camera,
            schedule: EventQueue::new(),
            time_ticks: 0,
            last_now_ms: 0.0,
            next_id: 1,
            settings,
        };

        state.spawn_wave(1);
        state
    }

    /// Throw the match away and start over from wave 1 with the same settings
    pub fn reset(&mut self) {
        log::info!("Resetting match");
        *self = Self::new(self.settings.clone());
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the regular enemy set with `wave`'s enemies. The boss is
    /// created the first time the final wave spawns and never again.
    pub fn spawn_wave(&mut self, wave: u32) {
        let mut next_id = self.next_id;
        self.enemies = self.director.spawn_wave(wave, self.world, &mut self.rng, || {
            let id = next_id;
            next_id += 1;
            id
        });
        self.next_id = next_id;

        if wave == self.director.final_wave && self.boss.is_none() {
            let id = self.next_entity_id();
            self.boss = Some(self.director.spawn_boss(id, self.world));
        }
    }

    /// Schedule the next wave `delay` after `now_ms`
    pub fn schedule_wave(&mut self, wave: u32, now_ms: f64) {
        let at = now_ms + self.director.spawn_delay_ms;
        log::info!("Wave {} incoming at {:.0} ms", wave, at);
        self.schedule.schedule(at, ScheduledKind::SpawnWave(wave));
    }

    /// Live boss, if any
    pub fn live_boss(&self) -> Option<&Enemy> {
        self.boss.as_ref().filter(|b| !b.is_dead())
    }

    /// Regular enemies still alive (the boss is counted separately)
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// World position of an entity, for camera follow
    pub fn resolve_target(&self, target: FollowTarget) -> Option<Vec2> {
        match target {
            FollowTarget::Player => Some(self.player.bounds().center()),
            FollowTarget::Enemy(id) => self
                .enemies
                .iter()
                .chain(self.boss.iter())
                .find(|e| e.id == id && !e.is_dead())
                .map(|e| e.bounds().center()),
        }
    }

    /// Ensure enemies are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
    }
}

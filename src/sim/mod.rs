//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the injected clock (`now_ms`) and frame delta
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod camera;
pub mod clock;
pub mod combatant;
pub mod director;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use camera::{Camera, FollowTarget};
pub use clock::{Clock, FrameTime, GameLoop, ManualClock, MonotonicClock};
pub use combatant::{Body, Combatant, Cooldown, WorldBounds};
pub use director::WaveDirector;
pub use enemy::{
    BossState, Brain, Enemy, EnemyKind, MeleeState, RangedState, Strike, StrikeKind,
    next_boss_state, next_melee_state, next_ranged_state,
};
pub use player::Player;
pub use projectile::Projectile;
pub use schedule::{EventQueue, ScheduledKind};
pub use snapshot::StateSnapshot;
pub use state::{GamePhase, GameState};
pub use tick::{InputSource, TickInput, tick};

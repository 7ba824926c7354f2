//! Serializable read-only view of a match, for renderers and tooling

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combatant::Combatant;
use super::enemy::{Enemy, EnemyAnimation, EnemyKind};
use super::player::PlayerAnimation;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    Player,
    Enemy(EnemyKind),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityExtra {
    Player {
        attacking: bool,
        anim: PlayerAnimation,
    },
    Enemy {
        anim: EnemyAnimation,
        projectiles: Vec<ProjectileSnapshot>,
    },
    Boss {
        anim: EnemyAnimation,
        kyron_power: f32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// 0 for the player
    pub id: u32,
    pub entity_type: EntityType,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing_right: bool,
    pub health: f32,
    pub max_health: f32,
    pub state: String,
    pub extra: EntityExtra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub tick: u64,
    pub wave_number: u32,
    pub phase: GamePhase,
    /// Regular enemies alive (boss excluded)
    pub enemy_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boss_health: Option<f32>,
    /// World position of the viewport's top-left corner
    pub camera_x: f32,
    pub camera_y: f32,
    pub entities: Vec<EntitySnapshot>,
}

fn enemy_snapshot(enemy: &Enemy) -> EntitySnapshot {
    let body = enemy.body();
    let extra = match enemy.kind {
        EnemyKind::Boss => EntityExtra::Boss {
            anim: enemy.anim,
            kyron_power: enemy.kyron_power(),
        },
        _ => EntityExtra::Enemy {
            anim: enemy.anim,
            projectiles: enemy
                .projectiles()
                .iter()
                .map(|p| ProjectileSnapshot {
                    x: p.pos.x,
                    y: p.pos.y,
                    angle: p.angle(),
                })
                .collect(),
        },
    };
    EntitySnapshot {
        id: enemy.id,
        entity_type: EntityType::Enemy(enemy.kind),
        x: body.pos.x,
        y: body.pos.y,
        width: body.size.x,
        height: body.size.y,
        facing_right: body.facing_right,
        health: body.health,
        max_health: body.max_health,
        state: enemy.state_label().to_string(),
        extra,
    }
}

impl StateSnapshot {
    /// Capture the current match. Entities are listed player first, then
    /// enemies by id, then the boss if it is still alive.
    pub fn capture(state: &GameState) -> Self {
        let p = &state.player;
        let mut entities = Vec::with_capacity(state.enemies.len() + 2);
        entities.push(EntitySnapshot {
            id: 0,
            entity_type: EntityType::Player,
            x: p.body.pos.x,
            y: p.body.pos.y,
            width: p.body.size.x,
            height: p.body.size.y,
            facing_right: p.body.facing_right,
            health: p.body.health,
            max_health: p.body.max_health,
            state: if p.is_attacking() { "attack" } else { "move" }.to_string(),
            extra: EntityExtra::Player {
                attacking: p.is_attacking(),
                anim: p.anim,
            },
        });
        entities.extend(state.enemies.iter().map(enemy_snapshot));
        entities.extend(state.live_boss().map(enemy_snapshot));

        let origin: Vec2 = state.camera.view_origin();
        Self {
            tick: state.time_ticks,
            wave_number: state.wave_number,
            phase: state.phase,
            enemy_count: state.enemy_count(),
            boss_health: state.live_boss().map(|b| b.body.health),
            camera_x: origin.x,
            camera_y: origin.y,
            entities,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::consts::*;

    #[test]
    fn test_capture_new_match() {
        let state = GameState::new(Settings::default());
        let snap = StateSnapshot::capture(&state);
        assert_eq!(snap.wave_number, 1);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.enemy_count, (ENEMIES_PER_WAVE + 1) as usize);
        assert_eq!(snap.entities.len(), snap.enemy_count + 1);
        assert_eq!(snap.entities[0].entity_type, EntityType::Player);
        assert_eq!(snap.entities[0].health, PLAYER_HEALTH);
        assert!(snap.boss_health.is_none());
    }

    #[test]
    fn test_capture_includes_live_boss() {
        let mut state = GameState::new(Settings::default());
        state.spawn_wave(FINAL_WAVE);
        let snap = StateSnapshot::capture(&state);
        assert_eq!(snap.boss_health, Some(200.0));
        let last = snap.entities.last().map(|e| e.entity_type);
        assert_eq!(last, Some(EntityType::Enemy(EnemyKind::Boss)));
    }

    #[test]
    fn test_json_shape() {
        let state = GameState::new(Settings::default());
        let json = StateSnapshot::capture(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["wave_number"], 1);
        assert_eq!(value["phase"], "Playing");
        assert!(value.get("boss_health").is_none());
        assert_eq!(value["entities"][0]["entity_type"], "Player");
    }
}

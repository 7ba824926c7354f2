//! Deferred simulation events
//!
//! Owned by the [`GameState`](super::GameState), so a `reset()` drops every
//! pending event along with the rest of the match.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledKind {
    SpawnWave(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub fire_at_ms: f64,
    pub kind: ScheduledKind,
}

/// Events ordered by fire time (ties keep insertion order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<ScheduledEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at_ms: f64, kind: ScheduledKind) {
        let idx = self.events.partition_point(|e| e.fire_at_ms <= fire_at_ms);
        self.events.insert(idx, ScheduledEvent { fire_at_ms, kind });
    }

    /// Remove and return every event due at `now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<ScheduledKind> {
        let due = self.events.partition_point(|e| e.fire_at_ms <= now_ms);
        self.events.drain(..due).map(|e| e.kind).collect()
    }

    pub fn has_pending_spawn(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e.kind, ScheduledKind::SpawnWave(_)))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

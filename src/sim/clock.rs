//! Simulation clock and frame driver
//!
//! Cooldowns compare against `now_ms` from an injectable [`Clock`]; movement
//! integrates the per-frame delta, clamped so a long stall (backgrounded
//! tab, debugger) can't tunnel entities or skip several cooldowns at once.

use std::cell::Cell;
use std::time::Instant;

use super::state::GameState;
use super::tick::{TickInput, tick};

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time since construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Timing for one simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Elapsed time since the previous frame, already clamped
    pub dt_ms: f32,
    /// Clock reading for cooldown comparisons
    pub now_ms: f64,
}

impl FrameTime {
    pub fn new(dt_ms: f32, now_ms: f64) -> Self {
        Self { dt_ms, now_ms }
    }
}

/// Clamp a raw frame delta into `[0, max_ms]`
#[inline]
pub fn clamp_dt(raw_ms: f64, max_ms: f32) -> f32 {
    (raw_ms.max(0.0) as f32).min(max_ms)
}

/// Start/stop frame driver.
///
/// Stopping keeps the [`GameState`] untouched; starting again re-bases the
/// previous timestamp so the first frame after a restart has a zero delta.
/// The clock itself keeps running while stopped, so cooldowns keep elapsing.
#[derive(Debug)]
pub struct GameLoop<C: Clock> {
    clock: C,
    last_ms: f64,
    running: bool,
    max_dt_ms: f32,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(clock: C, max_dt_ms: f32) -> Self {
        let last_ms = clock.now_ms();
        Self {
            clock,
            last_ms,
            running: false,
            max_dt_ms,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn start(&mut self) {
        self.last_ms = self.clock.now_ms();
        self.running = true;
        log::info!("Game loop started at {:.0} ms", self.last_ms);
    }

    pub fn stop(&mut self) {
        self.running = false;
        log::info!("Game loop stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sample the clock and produce the next frame timing
    pub fn next_frame(&mut self) -> FrameTime {
        let now = self.clock.now_ms();
        let dt = clamp_dt(now - self.last_ms, self.max_dt_ms);
        self.last_ms = now;
        FrameTime::new(dt, now)
    }

    /// Run one frame if the loop is running. Returns the frame that was simulated.
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput) -> Option<FrameTime> {
        if !self.running {
            return None;
        }
        let frame = self.next_frame();
        tick(state, input, frame);
        Some(frame)
    }
}

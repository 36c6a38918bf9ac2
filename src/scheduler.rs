//! Fixed timestep scheduling
//!
//! `FixedTimestep` turns wall-clock frame deliveries into a whole number of
//! simulation steps. `TimerQueue` holds delayed actions counted in steps, so
//! they are as deterministic as the physics and can be cancelled.

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};

/// Accumulator for unconsumed wall-clock time
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_delta: f64,
    max_substeps: u32,
    accumulator: f64,
    last_time: Option<f64>,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_FRAME_DELTA, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f64, max_delta: f64, max_substeps: u32) -> Self {
        Self {
            step,
            max_delta,
            max_substeps,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Restart timing from `now` (seconds) with an empty accumulator
    pub fn reset(&mut self, now: f64) {
        self.accumulator = 0.0;
        self.last_time = Some(now);
    }

    /// Register a frame delivered at `now` (seconds) and return how many
    /// steps to run. The delta is clamped so a stalled tab cannot queue a
    /// burst of steps.
    pub fn advance(&mut self, now: f64) -> u32 {
        let last = self.last_time.unwrap_or(now);
        self.last_time = Some(now);

        let delta = (now - last).clamp(0.0, self.max_delta);
        self.accumulator += delta;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Leftover time as a fraction of one step (for render interpolation)
    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}

/// Delayed actions raised by a crash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// End the crash flash
    ClearCrashFlash,
    /// Put the player back at the level start
    ResetPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerEntry {
    due: u64,
    action: TimerAction,
}

/// Pending actions keyed by the step on which they fire
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: u64,
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire `delay` steps from now
    pub fn schedule(&mut self, delay: u64, action: TimerAction) {
        let due = self.now + delay;
        log::debug!("Timer {:?} due at step {}", action, due);
        self.entries.push(TimerEntry { due, action });
    }

    /// Advance one step and return the actions that came due, in the order
    /// they were scheduled
    pub fn advance(&mut self) -> Vec<TimerAction> {
        self.now += 1;
        let now = self.now;
        let mut fired = Vec::new();
        self.entries.retain(|entry| {
            if entry.due <= now {
                fired.push(entry.action);
                false
            } else {
                true
            }
        });
        fired
    }

    /// Drop everything pending
    pub fn cancel_all(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Cancelled {} pending timers", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

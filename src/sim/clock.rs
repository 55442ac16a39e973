//! Fixed-step clock
//!
//! Turns variable host frame deltas into a whole number of fixed simulation
//! steps plus an interpolation fraction for rendering.

use crate::consts::SIM_DT_F64;

/// Converts host timestamps (seconds) into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; 0 on the first call after a restart
    pub fn delta(&mut self, now: f64) -> f64 {
        let dt = match self.last {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the previous timestamp
    pub fn restart(&mut self) {
        self.last = None;
    }
}

/// Fixed-step accumulator
///
/// Tracks total elapsed time and the number of steps already handed out, so
/// the step count after any sequence of deltas is `floor(total / SIM_DT)`
/// regardless of how the deltas were chunked.
#[derive(Debug, Clone)]
pub struct Accumulator {
    elapsed: f64,
    steps: u64,
    step: f64,
    max_steps_per_tick: Option<u32>,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Accumulator {
    pub fn new(max_steps_per_tick: Option<u32>) -> Self {
        Self {
            elapsed: 0.0,
            steps: 0,
            step: SIM_DT_F64,
            max_steps_per_tick,
        }
    }

    /// Add a frame delta and return how many fixed steps are now due
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.elapsed += dt.max(0.0);
        let total = (self.elapsed / self.step).floor() as u64;
        let mut due = total.saturating_sub(self.steps);

        if let Some(cap) = self.max_steps_per_tick {
            let cap = u64::from(cap);
            if due > cap {
                let dropped = due - cap;
                log::warn!("Dropping {} fixed steps after a long stall", dropped);
                self.elapsed -= dropped as f64 * self.step;
                due = cap;
            }
        }

        self.steps += due;
        due as u32
    }

    /// Leftover fraction of a step, in [0, 1)
    pub fn alpha(&self) -> f32 {
        let leftover = self.elapsed - self.steps as f64 * self.step;
        ((leftover / self.step) as f32).clamp(0.0, 1.0 - f32::EPSILON)
    }

    /// Steps handed out since the last reset
    pub fn total_steps(&self) -> u64 {
        self.steps
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.steps = 0;
    }
}

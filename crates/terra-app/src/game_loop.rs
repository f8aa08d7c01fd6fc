//! Fixed-rate game tick driver.
//!
//! The host renders every frame but advances game state in fixed 600 ms
//! ticks. [`TickLoop`] accumulates frame time and reports how many ticks are
//! due, so the visibility engine runs once per tick regardless of frame rate.

use tracing::warn;

/// Length of one game tick in seconds.
pub const TICK_SECONDS: f64 = 0.6;

/// Frames longer than this are clamped; the missed ticks are dropped rather
/// than replayed in a burst.
pub const MAX_FRAME_TIME: f64 = 4.0 * TICK_SECONDS;

/// Fixed-rate tick accumulator.
#[derive(Debug, Default)]
pub struct TickLoop {
    accumulator: f64,
    tick_count: u64,
}

impl TickLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `frame_time` seconds and calls `on_tick(tick_index)` once per due
    /// tick. Returns the number of ticks run.
    pub fn advance(&mut self, frame_time: f64, mut on_tick: impl FnMut(u64)) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.0}ms exceeds maximum, clamping to {:.0}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        let mut ran = 0;
        // Tolerance so that n * TICK_SECONDS yields exactly n ticks.
        while self.accumulator + 1e-9 >= TICK_SECONDS {
            on_tick(self.tick_count);
            self.tick_count += 1;
            self.accumulator -= TICK_SECONDS;
            ran += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        ran
    }

    /// Total ticks run.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Progress towards the next tick in `[0.0, 1.0)`.
    pub fn progress(&self) -> f64 {
        self.accumulator / TICK_SECONDS
    }
}

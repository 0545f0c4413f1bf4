//! Virtual game clock fed from `performance.now()`.
//!
//! `draw_web()` calls at ~60fps with variable delta. FrameClock folds those
//! deltas into a monotonically increasing millisecond counter that the engine
//! advances to. Sub-millisecond remainders are carried so no time is lost.

pub struct FrameClock {
    /// Largest delta a single frame may contribute.
    max_delta_ms: f64,
    /// Fractional milliseconds not yet added to `now_ms`
    accumulator: f64,
    /// Virtual time in whole milliseconds since creation
    pub now_ms: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new(max_delta_ms: f64) -> Self {
        Self {
            max_delta_ms: max_delta_ms.max(0.0),
            accumulator: 0.0,
            now_ms: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp and return the new virtual time.
    pub fn update(&mut self, timestamp_ms: f64) -> u64 {
        let delta = match self.last_timestamp {
            // Clamp so a backgrounded tab doesn't dump minutes of income at once
            Some(prev) => (timestamp_ms - prev).clamp(0.0, self.max_delta_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        self.accumulator += delta;
        let whole = self.accumulator.floor();
        self.accumulator -= whole;
        self.now_ms += whole as u64;
        self.now_ms
    }
}

use crate::math::stats::StatsHelper;
use crate::prelude::FILTER_SIZE;

/// Fixed-window moving average backed by an explicit ring buffer.
///
/// The window always holds exactly [`FILTER_SIZE`] entries; slots that have
/// not been written since the last reset count as zero, so the output ramps
/// up over the first `FILTER_SIZE` samples.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    history: [f32; FILTER_SIZE],
    index: usize,
}

impl MovingAverage {
    pub fn new() -> Self {
        Self {
            history: [0.0; FILTER_SIZE],
            index: 0,
        }
    }

    /// Writes `value` at the current slot, advances, and returns `sum / FILTER_SIZE`.
    pub fn push(&mut self, value: f32) -> f32 {
        self.history[self.index] = value;
        self.index = (self.index + 1) % FILTER_SIZE;
        StatsHelper::mean(&self.history)
    }

    pub fn history(&self) -> &[f32; FILTER_SIZE] {
        &self.history
    }

    /// Next write position.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.history = [0.0; FILTER_SIZE];
        self.index = 0;
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new()
    }
}

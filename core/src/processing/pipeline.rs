use crate::prelude::{DetectorConfig, FILTER_SIZE};
use crate::processing::gravity::GravityOffset;
use crate::processing::peak::PeakGate;
use crate::processing::smoothing::MovingAverage;

/// Intermediate values produced for one accelerometer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOutput {
    pub adjusted: f32,
    pub smoothed: f32,
    pub step: bool,
}

/// Gravity offset → moving average → peak gate, one sample at a time.
#[derive(Debug, Clone)]
pub struct AccelerometerPipeline {
    gravity: GravityOffset,
    smoothing: MovingAverage,
    gate: PeakGate,
}

impl AccelerometerPipeline {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            gravity: GravityOffset::new(config.gravity_baseline),
            smoothing: MovingAverage::new(),
            gate: PeakGate::new(config.step_threshold, config.refractory_ns),
        }
    }

    pub fn process(&mut self, x: f32, y: f32, z: f32, timestamp_ns: u64) -> PipelineOutput {
        let adjusted = self.gravity.adjust(x, y, z);
        let smoothed = self.smoothing.push(adjusted);
        let step = self.gate.evaluate(smoothed, timestamp_ns);
        PipelineOutput {
            adjusted,
            smoothed,
            step,
        }
    }

    pub fn history(&self) -> &[f32; FILTER_SIZE] {
        self.smoothing.history()
    }

    pub fn history_index(&self) -> usize {
        self.smoothing.index()
    }

    pub fn last_magnitude(&self) -> f32 {
        self.gate.last_magnitude()
    }

    pub fn last_step_ns(&self) -> u64 {
        self.gate.last_step_ns()
    }

    pub fn reset(&mut self) {
        self.smoothing.reset();
        self.gate.reset();
    }
}

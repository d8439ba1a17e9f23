use crate::generator::template::half_sine;
use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use stepcore::prelude::GRAVITY_BASELINE;
use stepcore::SensorSample;

/// Shape of the synthetic trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Accelerometer,
    Counter,
}

/// Configuration for generating a synthetic walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub kind: TraceKind,
    pub steps: usize,
    pub cadence_hz: f64,
    pub sample_rate_hz: f64,
    /// Peak acceleration of each heel strike above gravity (m/s²).
    pub impact: f32,
    /// Fraction of each step period occupied by the impact pulse.
    pub duty: f64,
    /// Uniform per-axis jitter amplitude (m/s²).
    pub noise: f32,
    /// Quiet time before the first and after the last step.
    pub lead_in_s: f64,
    /// Platform counter value at the start of a counter trace.
    pub counter_start: u64,
    pub start_ns: u64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: TraceKind::Accelerometer,
            steps: 100,
            cadence_hz: 1.8,
            sample_rate_hz: 50.0,
            impact: 6.0,
            duty: 0.5,
            noise: 0.05,
            lead_in_s: 1.0,
            counter_start: 10_000,
            start_ns: 1_000_000_000,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.cadence_hz > 0.0 && self.cadence_hz.is_finite(),
            "cadence_hz must be positive, got {}",
            self.cadence_hz
        );
        ensure!(
            self.sample_rate_hz > 0.0 && self.sample_rate_hz.is_finite(),
            "sample_rate_hz must be positive, got {}",
            self.sample_rate_hz
        );
        ensure!(
            self.duty > 0.0 && self.duty <= 1.0,
            "duty must be in (0, 1], got {}",
            self.duty
        );
        ensure!(self.lead_in_s >= 0.0, "lead_in_s must not be negative");
        ensure!(self.noise >= 0.0, "noise must not be negative");
        Ok(())
    }

    fn step_period_ns(&self) -> u64 {
        (1e9 / self.cadence_hz) as u64
    }

    fn sample_period_ns(&self) -> u64 {
        (1e9 / self.sample_rate_hz) as u64
    }
}

/// One heel-strike pulse per step on top of gravity, with optional jitter.
pub fn build_accelerometer_trace(config: &GeneratorConfig) -> anyhow::Result<Vec<SensorSample>> {
    config.validate()?;
    let duration_s = 2.0 * config.lead_in_s + config.steps as f64 / config.cadence_hz;
    let sample_count = (duration_s * config.sample_rate_hz).ceil() as usize;
    let period_ns = config.sample_period_ns();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut jitter = || {
        if config.noise > 0.0 {
            rng.gen_range(-config.noise..config.noise)
        } else {
            0.0
        }
    };

    let mut samples = Vec::with_capacity(sample_count);
    for index in 0..sample_count {
        let walk_s = index as f64 / config.sample_rate_hz - config.lead_in_s;
        let mut pulse = 0.0;
        if walk_s >= 0.0 {
            let position = walk_s * config.cadence_hz;
            let step = position.floor();
            if (step as usize) < config.steps {
                pulse = config.impact * half_sine((position - step) / config.duty) as f32;
            }
        }
        let offset = (index as u64)
            .checked_mul(period_ns)
            .context("timestamp overflow while generating trace")?;
        samples.push(SensorSample::acceleration(
            jitter(),
            jitter(),
            GRAVITY_BASELINE + pulse + jitter(),
            config.start_ns + offset,
        ));
    }
    Ok(samples)
}

/// Calibration reading followed by one counter tick per step.
pub fn build_counter_trace(config: &GeneratorConfig) -> anyhow::Result<Vec<SensorSample>> {
    config.validate()?;
    let period_ns = config.step_period_ns();
    let mut samples = Vec::with_capacity(config.steps + 1);
    samples.push(SensorSample::step_counter(config.counter_start, config.start_ns));
    for step in 1..=config.steps as u64 {
        let offset = step
            .checked_mul(period_ns)
            .context("timestamp overflow while generating trace")?;
        samples.push(SensorSample::step_counter(
            config.counter_start + step,
            config.start_ns + offset,
        ));
    }
    Ok(samples)
}

pub fn build_trace(config: &GeneratorConfig) -> anyhow::Result<Vec<SensorSample>> {
    match config.kind {
        TraceKind::Accelerometer => build_accelerometer_trace(config),
        TraceKind::Counter => build_counter_trace(config),
    }
}

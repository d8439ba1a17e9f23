use serde::{Deserialize, Serialize};
use std::fmt;

/// Capacity of the moving-average window. Fixed; not part of [`DetectorConfig`].
pub const FILTER_SIZE: usize = 10;

/// Standard gravity baseline removed from the raw magnitude (m/s²).
pub const GRAVITY_BASELINE: f32 = 9.8;

/// Minimum smoothed magnitude that can register a step (m/s², gravity removed).
pub const STEP_THRESHOLD: f32 = 2.0;

/// Minimum time between two registered steps (200 ms).
pub const REFRACTORY_NS: u64 = 200_000_000;

/// Tunables shared by every processing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub step_threshold: f32,
    pub refractory_ns: u64,
    pub gravity_baseline: f32,
    /// Per-axis bound; accelerometer samples beyond it are out of range.
    pub max_abs_component: f32,
    /// Emit a trace line for every Nth accelerometer sample. Zero disables it.
    pub log_every_n_samples: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            step_threshold: STEP_THRESHOLD,
            refractory_ns: REFRACTORY_NS,
            gravity_baseline: GRAVITY_BASELINE,
            max_abs_component: 156.9,
            log_every_n_samples: 50,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> DetectorResult<()> {
        if !self.step_threshold.is_finite() || self.step_threshold < 0.0 {
            return Err(DetectorError::InvalidConfig(format!(
                "step_threshold must be finite and non-negative, got {}",
                self.step_threshold
            )));
        }
        if !self.gravity_baseline.is_finite() || self.gravity_baseline < 0.0 {
            return Err(DetectorError::InvalidConfig(format!(
                "gravity_baseline must be finite and non-negative, got {}",
                self.gravity_baseline
            )));
        }
        if !self.max_abs_component.is_finite() || self.max_abs_component <= 0.0 {
            return Err(DetectorError::InvalidConfig(format!(
                "max_abs_component must be finite and positive, got {}",
                self.max_abs_component
            )));
        }
        Ok(())
    }
}

/// Active sensing strategy, fixed for the duration of a detection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensingMode {
    HardwareCounter,
    SoftwareAccelerometer,
}

impl SensingMode {
    /// Platform sensor a session in this mode subscribes to.
    pub fn sensor_kind(self) -> SensorKind {
        match self {
            SensingMode::HardwareCounter => SensorKind::StepCounter,
            SensingMode::SoftwareAccelerometer => SensorKind::Accelerometer,
        }
    }
}

impl fmt::Display for SensingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensingMode::HardwareCounter => write!(f, "step counter"),
            SensingMode::SoftwareAccelerometer => write!(f, "accelerometer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    StepCounter,
    Accelerometer,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::StepCounter => write!(f, "step counter"),
            SensorKind::Accelerometer => write!(f, "accelerometer"),
        }
    }
}

/// Error type for detector construction and session control.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DetectorError {
    #[error("no step counter or accelerometer available")]
    NoSensorAvailable,
    #[error("failed to subscribe to the {0} sensor")]
    SubscriptionFailed(SensorKind),
    #[error("invalid sample: {0}")]
    InvalidSample(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type DetectorResult<T> = Result<T, DetectorError>;

use crate::generator::profile::{GeneratorConfig, TraceKind};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stepcore::{DetectorConfig, SensorAvailability, SensorKind, SensorSample, SessionConfig};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub detector: DetectorConfig,
    pub sensors: SensorAvailability,
    pub generator: GeneratorConfig,
    pub session: SessionConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let generator = GeneratorConfig::default();
        Self {
            detector: DetectorConfig::default(),
            sensors: sensors_for(generator.kind),
            generator,
            session: SessionConfig::default(),
        }
    }
}

/// A counter trace needs the hardware counter; an accelerometer trace must
/// not advertise one or the detector would prefer it.
pub fn sensors_for(kind: TraceKind) -> SensorAvailability {
    match kind {
        TraceKind::Accelerometer => SensorAvailability::new(false, true),
        TraceKind::Counter => SensorAvailability::new(true, true),
    }
}

/// Trace kind a recorded sample belongs to.
pub fn trace_kind(sample: &SensorSample) -> TraceKind {
    match sample.sensor_kind() {
        SensorKind::StepCounter => TraceKind::Counter,
        SensorKind::Accelerometer => TraceKind::Accelerometer,
    }
}

impl WorkflowConfig {
    /// Advertises the sensors a recorded trace came from. Returns the kind
    /// adopted, or `None` for an empty trace.
    pub fn adopt_trace_sensors(&mut self, trace: &[SensorSample]) -> Option<TraceKind> {
        let kind = trace_kind(trace.first()?);
        self.sensors = sensors_for(kind);
        Some(kind)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .detector
            .validate()
            .with_context(|| format!("validating workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        kind: TraceKind,
        steps: usize,
        cadence_hz: f64,
        sample_rate_hz: f64,
        seed: u64,
    ) -> Self {
        Self {
            sensors: sensors_for(kind),
            generator: GeneratorConfig {
                kind,
                steps,
                cadence_hz,
                sample_rate_hz,
                seed,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

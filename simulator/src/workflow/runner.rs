use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};
use stepcore::telemetry::MetricsSnapshot;
use stepcore::{
    EventRecorder, SensingMode, SensorSample, SessionSummary, StaticSensors, StepDetector,
    StepEvent, WorkoutSession,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub mode: SensingMode,
    pub samples: usize,
    pub step_count: u64,
    pub session: SessionSummary,
    pub metrics: MetricsSnapshot,
    pub events: Vec<StepEvent>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn build_detector(&self) -> anyhow::Result<StepDetector> {
        StepDetector::new(
            self.config.detector.clone(),
            StaticSensors::new(self.config.sensors),
        )
        .context("building step detector")
    }

    /// Replays `samples` through a fresh detector inside one workout session.
    pub fn execute(&self, samples: &[SensorSample]) -> anyhow::Result<WorkflowResult> {
        let mut detector = self.build_detector()?;
        let recorder = EventRecorder::new();
        detector.subscribe(recorder.clone());

        let session = WorkoutSession::begin(&mut detector, self.config.session.clone())
            .context("starting step detection")?;
        for sample in samples {
            detector.on_sample(*sample);
        }

        let mode = detector
            .mode()
            .context("detector finished without a sensing mode")?;
        let step_count = detector.step_count();
        let summary = session.end(&mut detector);
        let metrics = detector.metrics();
        if metrics.rejected > 0 {
            warn!(
                "{} of {} samples were rejected while detecting with {}",
                metrics.rejected,
                samples.len(),
                mode
            );
        }

        Ok(WorkflowResult {
            mode,
            samples: samples.len(),
            step_count,
            session: summary,
            metrics,
            events: recorder.events(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_trace, TraceKind};

    #[test]
    fn runner_counts_every_synthetic_step() {
        let cfg = WorkflowConfig::from_args(TraceKind::Accelerometer, 40, 1.8, 50.0, 3);
        let runner = Runner::new(cfg.clone());
        let trace = build_trace(&cfg.generator).unwrap();
        let result = runner.execute(&trace).unwrap();

        assert_eq!(result.mode, SensingMode::SoftwareAccelerometer);
        assert_eq!(result.step_count, 40);
        assert_eq!(result.session.steps, 40);
        assert_eq!(result.metrics.processed as usize, trace.len());
        assert_eq!(result.events.len(), 41);
        assert_eq!(result.events[0], StepEvent::CountReset);
    }

    #[test]
    fn runner_exposes_the_config_it_replays_with() {
        let cfg = WorkflowConfig::from_args(TraceKind::Counter, 12, 2.0, 50.0, 9);
        let runner = Runner::new(cfg);
        assert_eq!(runner.config().generator.steps, 12);
        let trace = build_trace(&runner.config().generator).unwrap();
        assert_eq!(runner.execute(&trace).unwrap().step_count, 12);
    }

    #[test]
    fn runner_replays_counter_trace() {
        let cfg = WorkflowConfig::from_args(TraceKind::Counter, 25, 2.0, 50.0, 0);
        let runner = Runner::new(cfg.clone());
        let trace = build_trace(&cfg.generator).unwrap();
        let result = runner.execute(&trace).unwrap();

        assert_eq!(result.mode, SensingMode::HardwareCounter);
        assert_eq!(result.step_count, 25);
        assert!((result.session.distance_m - 17.5).abs() < 1e-3);
    }

    #[test]
    fn mismatched_trace_is_rejected_not_counted() {
        let counter = WorkflowConfig::from_args(TraceKind::Counter, 10, 2.0, 50.0, 0);
        let trace = build_trace(&counter.generator).unwrap();
        let runner = Runner::new(WorkflowConfig::from_args(
            TraceKind::Accelerometer,
            10,
            2.0,
            50.0,
            0,
        ));
        let result = runner.execute(&trace).unwrap();
        assert_eq!(result.step_count, 0);
        assert_eq!(result.metrics.rejected as usize, trace.len());
    }
}

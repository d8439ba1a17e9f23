use serde::{Deserialize, Serialize};
use stepcore::telemetry::MetricsSnapshot;
use stepcore::{SensingMode, StepDetector};

/// Control-surface snapshot served to attached clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorStatus {
    pub step_count: u64,
    pub detecting: bool,
    pub mode: Option<SensingMode>,
    pub metrics: MetricsSnapshot,
}

impl DetectorStatus {
    pub fn capture(detector: &StepDetector) -> Self {
        Self {
            step_count: detector.step_count(),
            detecting: detector.is_detecting(),
            mode: detector.mode(),
            metrics: detector.metrics(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReply {
    pub received: usize,
    pub steps_detected: usize,
    pub step_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

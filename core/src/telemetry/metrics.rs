use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Default)]
struct Metrics {
    processed: u64,
    rejected: u64,
    discarded: u64,
    steps: u64,
}

/// Point-in-time copy of the sample and step counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Samples that reached the active pipeline.
    pub processed: u64,
    /// Samples dropped as invalid while detecting.
    pub rejected: u64,
    /// Samples that arrived while detection was stopped.
    pub discarded: u64,
    pub steps: u64,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_processed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
        }
    }

    pub fn record_discarded(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.discarded += 1;
        }
    }

    pub fn record_steps(&self, count: u64) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.steps += count;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                processed: metrics.processed,
                rejected: metrics.rejected,
                discarded: metrics.discarded,
                steps: metrics.steps,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

//! Per-workout step tally layered over a shared detector.

use crate::detector::StepDetector;
use crate::listener::{ListenerId, StepListener};
use crate::prelude::DetectorResult;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Meters credited per step when estimating distance.
    pub stride_length_m: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stride_length_m: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub steps: u64,
    pub distance_m: f32,
}

#[derive(Debug, Default)]
struct SessionTally {
    start_steps: u64,
    total_steps: u64,
}

struct SessionListener {
    tally: Arc<Mutex<SessionTally>>,
}

impl StepListener for SessionListener {
    fn on_step_detected(&mut self, total_steps: u64) {
        if let Ok(mut tally) = self.tally.lock() {
            tally.total_steps = total_steps;
        }
    }

    fn on_step_count_reset(&mut self) {
        if let Ok(mut tally) = self.tally.lock() {
            tally.start_steps = 0;
            tally.total_steps = 0;
        }
    }
}

pub struct WorkoutSession {
    config: SessionConfig,
    tally: Arc<Mutex<SessionTally>>,
    listener: ListenerId,
}

impl WorkoutSession {
    /// Joins a running detector at its current total, or starts an idle one
    /// and resets it so the session counts from zero. A failed start leaves
    /// the detector's count untouched.
    pub fn begin(detector: &mut StepDetector, config: SessionConfig) -> DetectorResult<Self> {
        let start_steps = if detector.is_detecting() {
            detector.step_count()
        } else {
            detector.start()?;
            detector.reset();
            0
        };

        let tally = Arc::new(Mutex::new(SessionTally {
            start_steps,
            total_steps: start_steps,
        }));
        let listener = detector.subscribe(SessionListener {
            tally: Arc::clone(&tally),
        });

        Ok(Self {
            config,
            tally,
            listener,
        })
    }

    pub fn session_steps(&self) -> u64 {
        self.tally
            .lock()
            .map(|tally| tally.total_steps.saturating_sub(tally.start_steps))
            .unwrap_or(0)
    }

    pub fn distance_m(&self) -> f32 {
        self.session_steps() as f32 * self.config.stride_length_m
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            steps: self.session_steps(),
            distance_m: self.distance_m(),
        }
    }

    /// Stops detection and detaches from the detector.
    pub fn end(self, detector: &mut StepDetector) -> SessionSummary {
        detector.stop();
        detector.unsubscribe(self.listener);
        self.summary()
    }
}

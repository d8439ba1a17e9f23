use crate::prelude::SensorKind;
use serde::{Deserialize, Serialize};

/// One reading delivered by the platform sensor subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorSample {
    /// 3-axis acceleration in m/s², stamped on a monotonic clock.
    Acceleration {
        x: f32,
        y: f32,
        z: f32,
        timestamp_ns: u64,
    },
    /// Cumulative tick value of a hardware pedometer since boot.
    StepCounter { total: u64, timestamp_ns: u64 },
}

impl SensorSample {
    pub fn acceleration(x: f32, y: f32, z: f32, timestamp_ns: u64) -> Self {
        SensorSample::Acceleration {
            x,
            y,
            z,
            timestamp_ns,
        }
    }

    pub fn step_counter(total: u64, timestamp_ns: u64) -> Self {
        SensorSample::StepCounter {
            total,
            timestamp_ns,
        }
    }

    pub fn timestamp_ns(&self) -> u64 {
        match *self {
            SensorSample::Acceleration { timestamp_ns, .. } => timestamp_ns,
            SensorSample::StepCounter { timestamp_ns, .. } => timestamp_ns,
        }
    }

    pub fn sensor_kind(&self) -> SensorKind {
        match self {
            SensorSample::Acceleration { .. } => SensorKind::Accelerometer,
            SensorSample::StepCounter { .. } => SensorKind::StepCounter,
        }
    }
}

/// Accuracy status reported alongside a sensor's readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorAccuracy {
    Unreliable,
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_reports_kind_and_timestamp() {
        let accel = SensorSample::acceleration(0.0, 0.0, 9.8, 42);
        assert_eq!(accel.sensor_kind(), SensorKind::Accelerometer);
        assert_eq!(accel.timestamp_ns(), 42);

        let counter = SensorSample::step_counter(500, 7);
        assert_eq!(counter.sensor_kind(), SensorKind::StepCounter);
        assert_eq!(counter.timestamp_ns(), 7);
    }

    #[test]
    fn sample_json_is_tagged_by_kind() {
        let json = serde_json::to_string(&SensorSample::step_counter(512, 1)).unwrap();
        assert!(json.contains(r#""kind":"step_counter""#));

        let parsed: SensorSample =
            serde_json::from_str(r#"{"kind":"acceleration","x":0.1,"y":0.2,"z":9.9,"timestamp_ns":5}"#)
                .unwrap();
        assert_eq!(parsed, SensorSample::acceleration(0.1, 0.2, 9.9, 5));
    }
}

use crate::prelude::{DetectorError, DetectorResult, SensingMode, SensorKind};
use serde::{Deserialize, Serialize};

/// Which motion sensors the device exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorAvailability {
    pub step_counter: bool,
    pub accelerometer: bool,
}

impl SensorAvailability {
    pub fn new(step_counter: bool, accelerometer: bool) -> Self {
        Self {
            step_counter,
            accelerometer,
        }
    }

    /// Prefers the hardware counter and falls back to the accelerometer.
    pub fn select_mode(&self) -> DetectorResult<SensingMode> {
        if self.step_counter {
            Ok(SensingMode::HardwareCounter)
        } else if self.accelerometer {
            Ok(SensingMode::SoftwareAccelerometer)
        } else {
            Err(DetectorError::NoSensorAvailable)
        }
    }
}

/// Seam to the platform sensor subsystem.
///
/// The detector subscribes when a session starts and unsubscribes when it
/// stops; samples themselves are pushed through `StepDetector::on_sample`.
pub trait SensorSource: Send {
    fn availability(&self) -> SensorAvailability;

    /// Returns `false` when the platform refuses the registration.
    fn subscribe(&mut self, kind: SensorKind) -> bool;

    fn unsubscribe(&mut self);
}

/// Sensor source with a fixed set of sensors, for replay and tests.
#[derive(Debug, Clone)]
pub struct StaticSensors {
    availability: SensorAvailability,
    accept_subscriptions: bool,
    subscribed: Option<SensorKind>,
}

impl StaticSensors {
    pub fn new(availability: SensorAvailability) -> Self {
        Self {
            availability,
            accept_subscriptions: true,
            subscribed: None,
        }
    }

    pub fn accelerometer_only() -> Self {
        Self::new(SensorAvailability::new(false, true))
    }

    pub fn with_step_counter() -> Self {
        Self::new(SensorAvailability::new(true, true))
    }

    pub fn none() -> Self {
        Self::new(SensorAvailability::default())
    }

    /// Simulates a platform that refuses every registration.
    pub fn refusing(mut self) -> Self {
        self.accept_subscriptions = false;
        self
    }

    pub fn subscribed(&self) -> Option<SensorKind> {
        self.subscribed
    }
}

impl SensorSource for StaticSensors {
    fn availability(&self) -> SensorAvailability {
        self.availability
    }

    fn subscribe(&mut self, kind: SensorKind) -> bool {
        let present = match kind {
            SensorKind::StepCounter => self.availability.step_counter,
            SensorKind::Accelerometer => self.availability.accelerometer,
        };
        if present && self.accept_subscriptions {
            self.subscribed = Some(kind);
            true
        } else {
            false
        }
    }

    fn unsubscribe(&mut self) {
        self.subscribed = None;
    }
}

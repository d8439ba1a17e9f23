use crate::prelude::{DetectorError, DetectorResult};
use crate::sensor_interface::SensorSample;

/// Per-sample hardening: rejects readings no physical accelerometer produces.
#[derive(Debug, Clone)]
pub struct SampleValidator {
    max_abs_component: f32,
}

impl SampleValidator {
    pub fn new(max_abs_component: f32) -> Self {
        Self { max_abs_component }
    }

    pub fn check(&self, sample: &SensorSample) -> DetectorResult<()> {
        match *sample {
            SensorSample::Acceleration { x, y, z, .. } => {
                for (axis, value) in [("x", x), ("y", y), ("z", z)] {
                    if !value.is_finite() {
                        return Err(DetectorError::InvalidSample(format!(
                            "{} component is not finite",
                            axis
                        )));
                    }
                    if value.abs() > self.max_abs_component {
                        return Err(DetectorError::InvalidSample(format!(
                            "{} component {:.3} exceeds ±{:.1}",
                            axis, value, self.max_abs_component
                        )));
                    }
                }
                Ok(())
            }
            SensorSample::StepCounter { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_readings() {
        let validator = SampleValidator::new(156.9);
        assert!(validator
            .check(&SensorSample::acceleration(0.3, -1.2, 9.7, 1))
            .is_ok());
        assert!(validator.check(&SensorSample::step_counter(10, 1)).is_ok());
    }

    #[test]
    fn rejects_nan_and_infinity() {
        let validator = SampleValidator::new(156.9);
        assert!(validator
            .check(&SensorSample::acceleration(f32::NAN, 0.0, 9.8, 1))
            .is_err());
        assert!(validator
            .check(&SensorSample::acceleration(0.0, 0.0, f32::NEG_INFINITY, 1))
            .is_err());
    }

    #[test]
    fn rejects_out_of_range_component() {
        let validator = SampleValidator::new(156.9);
        let err = validator
            .check(&SensorSample::acceleration(0.0, 400.0, 9.8, 1))
            .unwrap_err();
        assert!(err.to_string().contains("y component"));
    }
}

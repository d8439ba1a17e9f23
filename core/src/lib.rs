//! Step-detection core for the DeskBreak activity tracker.
//!
//! Turns either a hardware cumulative step counter or a raw 3-axis
//! accelerometer stream into a monotonic step count and step events.
//! The accelerometer path removes a gravity baseline from the magnitude,
//! smooths it over a fixed ten-sample window and gates steps on a threshold,
//! a rising edge and a refractory interval.

pub mod detector;
pub mod listener;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod sensor_interface;
pub mod session;
pub mod telemetry;

pub use detector::StepDetector;
pub use listener::{ChannelListener, EventRecorder, ListenerId, StepEvent, StepListener};
pub use prelude::{DetectorConfig, DetectorError, DetectorResult, SensingMode, SensorKind};
pub use sensor_interface::{SensorAccuracy, SensorAvailability, SensorSample, SensorSource, StaticSensors};
pub use session::{SessionConfig, SessionSummary, WorkoutSession};

pub mod sample;
pub mod source;

pub use sample::{SensorAccuracy, SensorSample};
pub use source::{SensorAvailability, SensorSource, StaticSensors};

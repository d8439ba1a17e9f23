pub mod baseline;
pub mod gravity;
pub mod peak;
pub mod pipeline;
pub mod smoothing;
pub mod validate;

pub use baseline::{CounterBaseline, CounterReading};
pub use gravity::GravityOffset;
pub use peak::PeakGate;
pub use pipeline::{AccelerometerPipeline, PipelineOutput};
pub use smoothing::MovingAverage;
pub use validate::SampleValidator;

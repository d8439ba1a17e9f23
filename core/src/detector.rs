//! Session state machine around the step-detection pipeline.
//!
//! `StepDetector` is `Stopped` until [`StepDetector::start`] succeeds and
//! `Active` until [`StepDetector::stop`]. Every operation is synchronous and
//! expects serialised calls; wrap the detector in a mutex when several threads
//! can deliver samples.

use crate::listener::{ListenerId, ListenerRegistry, StepListener};
use crate::prelude::{DetectorConfig, DetectorError, DetectorResult, SensingMode, FILTER_SIZE};
use crate::processing::{AccelerometerPipeline, CounterBaseline, CounterReading, SampleValidator};
use crate::sensor_interface::{SensorAccuracy, SensorSample, SensorSource};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

pub struct StepDetector {
    config: DetectorConfig,
    sensors: Box<dyn SensorSource>,
    mode: Option<SensingMode>,
    active: bool,
    step_count: u64,
    pipeline: AccelerometerPipeline,
    counter: CounterBaseline,
    validator: SampleValidator,
    listeners: ListenerRegistry,
    last_accuracy: Option<SensorAccuracy>,
    samples_seen: u64,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl StepDetector {
    pub fn new<S>(config: DetectorConfig, sensors: S) -> DetectorResult<Self>
    where
        S: SensorSource + 'static,
    {
        config.validate()?;
        Ok(Self {
            pipeline: AccelerometerPipeline::new(&config),
            validator: SampleValidator::new(config.max_abs_component),
            config,
            sensors: Box::new(sensors),
            mode: None,
            active: false,
            step_count: 0,
            counter: CounterBaseline::new(),
            listeners: ListenerRegistry::new(),
            last_accuracy: None,
            samples_seen: 0,
            logger: LogManager::with_target("stepcore::detector"),
            metrics: MetricsRecorder::new(),
        })
    }

    /// Selects a sensing mode, subscribes to its sensor and begins counting.
    ///
    /// Clears the filter history, edge and refractory state and the hardware
    /// baseline. The step count survives so a stop/start cycle keeps counted
    /// steps; call [`reset`](Self::reset) to zero it. Calling `start` while
    /// already active does nothing.
    pub fn start(&mut self) -> DetectorResult<()> {
        if self.active {
            self.logger.warn("step detection already running");
            return Ok(());
        }

        let mode = match self.sensors.availability().select_mode() {
            Ok(mode) => mode,
            Err(err) => {
                self.logger
                    .error(&format!("cannot start step detection: {}", err));
                return Err(err);
            }
        };

        let kind = mode.sensor_kind();
        if !self.sensors.subscribe(kind) {
            self.logger
                .error(&format!("failed to register {} listener", kind));
            return Err(DetectorError::SubscriptionFailed(kind));
        }

        self.pipeline.reset();
        self.counter.restart(self.step_count);
        self.mode = Some(mode);
        self.active = true;
        self.logger.record(&format!(
            "step detection started using {} (carrying {} steps)",
            mode, self.step_count
        ));
        Ok(())
    }

    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.sensors.unsubscribe();
        self.active = false;
        self.logger
            .record(&format!("step detection stopped at {} steps", self.step_count));
    }

    /// Zeroes the count and all filter state, then notifies listeners.
    pub fn reset(&mut self) {
        self.step_count = 0;
        self.pipeline.reset();
        self.counter.clear();
        self.listeners.notify_reset();
        self.logger
            .record("step count reset (including step counter baseline)");
    }

    /// Feeds one sample. Returns the new total when this sample produced a step.
    ///
    /// Samples are ignored while stopped. Samples of the wrong shape for the
    /// active mode, non-finite or out-of-range samples are dropped without
    /// touching any state.
    pub fn on_sample(&mut self, sample: SensorSample) -> Option<u64> {
        if !self.active {
            self.metrics.record_discarded();
            return None;
        }
        let mode = self.mode?;

        if sample.sensor_kind() != mode.sensor_kind() {
            self.reject(&DetectorError::InvalidSample(format!(
                "{} sample while detecting with {}",
                sample.sensor_kind(),
                mode
            )));
            return None;
        }
        if let Err(err) = self.validator.check(&sample) {
            self.reject(&err);
            return None;
        }
        self.metrics.record_processed();

        match sample {
            SensorSample::Acceleration {
                x,
                y,
                z,
                timestamp_ns,
            } => self.process_acceleration(x, y, z, timestamp_ns),
            SensorSample::StepCounter { total, .. } => self.process_counter(total),
        }
    }

    pub fn on_accuracy_changed(&mut self, accuracy: SensorAccuracy) {
        if accuracy == SensorAccuracy::Unreliable {
            self.logger.warn("sensor accuracy is unreliable");
        } else {
            self.logger
                .debug(&format!("sensor accuracy changed: {:?}", accuracy));
        }
        self.last_accuracy = Some(accuracy);
    }

    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: StepListener + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_detecting(&self) -> bool {
        self.active
    }

    /// Mode of the current or most recent session.
    pub fn mode(&self) -> Option<SensingMode> {
        self.mode
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn history(&self) -> &[f32; FILTER_SIZE] {
        self.pipeline.history()
    }

    pub fn history_index(&self) -> usize {
        self.pipeline.history_index()
    }

    pub fn last_magnitude(&self) -> f32 {
        self.pipeline.last_magnitude()
    }

    pub fn last_step_timestamp_ns(&self) -> u64 {
        self.pipeline.last_step_ns()
    }

    pub fn hardware_baseline(&self) -> Option<u64> {
        self.counter.baseline()
    }

    pub fn last_accuracy(&self) -> Option<SensorAccuracy> {
        self.last_accuracy
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn process_acceleration(&mut self, x: f32, y: f32, z: f32, timestamp_ns: u64) -> Option<u64> {
        self.samples_seen += 1;
        let output = self.pipeline.process(x, y, z, timestamp_ns);

        let every = self.config.log_every_n_samples;
        if every > 0 && self.samples_seen % every == 0 {
            let steps = self.step_count;
            self.logger.trace_with(|| {
                format!(
                    "accelerometer adjusted {:.3} smoothed {:.3} steps {}",
                    output.adjusted, output.smoothed, steps
                )
            });
        }

        if !output.step {
            return None;
        }
        self.step_count += 1;
        self.metrics.record_steps(1);
        self.logger.debug(&format!(
            "step detected: count {} magnitude {:.3}",
            self.step_count, output.smoothed
        ));
        self.listeners.notify_step(self.step_count);
        Some(self.step_count)
    }

    fn process_counter(&mut self, raw: u64) -> Option<u64> {
        match self.counter.observe(raw) {
            CounterReading::Calibrated { baseline } => {
                self.logger
                    .debug(&format!("step counter baseline set to {}", baseline));
                None
            }
            CounterReading::Rebaselined { baseline, steps } => {
                self.logger.warn(&format!(
                    "step counter went backwards; re-baselined at {} keeping {} steps",
                    baseline, steps
                ));
                self.advance_to(steps)
            }
            CounterReading::Steps(steps) => self.advance_to(steps),
        }
    }

    fn advance_to(&mut self, steps: u64) -> Option<u64> {
        if steps <= self.step_count {
            return None;
        }
        self.metrics.record_steps(steps - self.step_count);
        self.step_count = steps;
        self.logger
            .debug(&format!("step counter total {}", self.step_count));
        self.listeners.notify_step(self.step_count);
        Some(self.step_count)
    }

    fn reject(&mut self, err: &DetectorError) {
        self.metrics.record_rejected();
        self.logger.debug(&format!("dropping sample: {}", err));
    }
}

impl Drop for StepDetector {
    fn drop(&mut self) {
        self.stop();
    }
}

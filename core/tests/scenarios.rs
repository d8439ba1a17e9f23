use stepcore::prelude::FILTER_SIZE;
use stepcore::{
    DetectorConfig, EventRecorder, SensingMode, SensorSample, StaticSensors, StepDetector,
    StepEvent,
};

const MS: u64 = 1_000_000;

/// Accelerometer sample whose magnitude sits `adjusted` above the gravity baseline.
fn adjusted(value: f32, timestamp_ns: u64) -> SensorSample {
    SensorSample::acceleration(0.0, 0.0, 9.8 + value, timestamp_ns)
}

fn started(sensors: StaticSensors) -> (StepDetector, EventRecorder) {
    let mut detector = StepDetector::new(DetectorConfig::default(), sensors).unwrap();
    let recorder = EventRecorder::new();
    detector.subscribe(recorder.clone());
    detector.start().unwrap();
    (detector, recorder)
}

fn feed(detector: &mut StepDetector, values: &[f32], spacing_ns: u64, first_ns: u64) -> Vec<u64> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, &value)| {
            let timestamp = first_ns + i as u64 * spacing_ns;
            detector
                .on_sample(adjusted(value, timestamp))
                .map(|_| timestamp)
        })
        .collect()
}

/// Ten quiet samples followed by ten impact samples, repeated.
fn walking_cycles(cycles: usize) -> Vec<f32> {
    (0..cycles)
        .flat_map(|_| std::iter::repeat(0.0).take(10).chain(std::iter::repeat(5.0).take(10)))
        .collect()
}

#[test]
fn scenario_a_low_swing_is_absorbed_by_the_window() {
    let (mut detector, recorder) = started(StaticSensors::accelerometer_only());
    assert_eq!(detector.mode(), Some(SensingMode::SoftwareAccelerometer));

    let values: Vec<f32> = (0..20).map(|i| if i % 2 == 0 { 0.5 } else { 3.0 }).collect();
    feed(&mut detector, &values, 300 * MS, 0);

    // Five 0.5s and five 3.0s average to 1.75, which never clears 2.0.
    assert_eq!(detector.step_count(), 0);
    assert!(recorder.events().is_empty());
}

#[test]
fn scenario_a_wider_swing_counts_rising_crossings() {
    let (mut detector, recorder) = started(StaticSensors::accelerometer_only());

    let values: Vec<f32> = (0..20).map(|i| if i % 2 == 0 { 0.5 } else { 5.0 }).collect();
    let steps = feed(&mut detector, &values, 300 * MS, 0);

    // Window means 2.20, 2.25, 2.75 on samples 8..10 rise past 2.0; after that
    // the full window holds a constant 2.75.
    assert_eq!(steps, vec![2_100 * MS, 2_400 * MS, 2_700 * MS]);
    assert_eq!(detector.step_count(), 3);
    assert_eq!(recorder.step_totals(), vec![1, 2, 3]);
}

#[test]
fn scenario_b_hardware_counter_is_session_relative() {
    let (mut detector, recorder) = started(StaticSensors::with_step_counter());
    assert_eq!(detector.mode(), Some(SensingMode::HardwareCounter));

    assert_eq!(detector.on_sample(SensorSample::step_counter(500, 1)), None);
    assert!(recorder.events().is_empty());
    assert_eq!(detector.on_sample(SensorSample::step_counter(512, 2)), Some(12));
    assert_eq!(detector.on_sample(SensorSample::step_counter(530, 3)), Some(30));

    assert_eq!(recorder.step_totals(), vec![12, 30]);
}

#[test]
fn scenario_c_reset_mid_session() {
    let (mut detector, recorder) = started(StaticSensors::accelerometer_only());
    feed(&mut detector, &walking_cycles(20), 100 * MS, 0);
    assert_eq!(detector.step_count(), 40);

    detector.reset();

    assert_eq!(detector.step_count(), 0);
    assert_eq!(recorder.reset_count(), 1);
    assert_eq!(detector.history().len(), FILTER_SIZE);
    assert!(detector.history().iter().all(|&v| v == 0.0));
    assert_eq!(detector.history_index(), 0);
    assert_eq!(detector.last_magnitude(), 0.0);
    assert_eq!(detector.last_step_timestamp_ns(), 0);
}

#[test]
fn scenario_d_stop_start_keeps_accelerometer_steps() {
    let (mut detector, recorder) = started(StaticSensors::accelerometer_only());
    feed(&mut detector, &walking_cycles(2), 100 * MS, 0);
    assert_eq!(detector.step_count(), 4);

    detector.stop();
    detector.start().unwrap();
    assert_eq!(detector.step_count(), 4);

    feed(&mut detector, &walking_cycles(1), 100 * MS, 10_000 * MS);
    assert_eq!(detector.step_count(), 6);
    assert_eq!(recorder.reset_count(), 0);
}

#[test]
fn scenario_d_stop_start_keeps_counter_steps() {
    let (mut detector, _) = started(StaticSensors::with_step_counter());
    detector.on_sample(SensorSample::step_counter(500, 1));
    detector.on_sample(SensorSample::step_counter(512, 2));

    detector.stop();
    detector.start().unwrap();
    assert_eq!(detector.step_count(), 12);

    assert_eq!(detector.on_sample(SensorSample::step_counter(900, 3)), None);
    assert_eq!(detector.on_sample(SensorSample::step_counter(905, 4)), Some(17));
}

#[test]
fn step_totals_never_decrease_while_active() {
    let (mut detector, recorder) = started(StaticSensors::accelerometer_only());
    let values: Vec<f32> = (0..400)
        .map(|i| (6.0 * (i as f32 * 0.35).sin()).abs() + if i % 7 == 0 { 1.5 } else { 0.0 })
        .collect();
    feed(&mut detector, &values, 20 * MS, 0);

    let totals = recorder.step_totals();
    assert!(!totals.is_empty());
    for pair in totals.windows(2) {
        assert_eq!(pair[1], pair[0] + 1);
    }
    assert_eq!(totals.last().copied(), Some(detector.step_count()));
}

#[test]
fn accepted_steps_respect_refractory_interval() {
    let (mut detector, _) = started(StaticSensors::accelerometer_only());
    let values: Vec<f32> = (0..300).map(|i| (6.0 * (i as f32 * 0.35).sin()).abs()).collect();
    let steps = feed(&mut detector, &values, 20 * MS, 0);

    assert!(steps.len() > 1);
    for pair in steps.windows(2) {
        assert!(pair[1] - pair[0] > 200 * MS);
    }
}

#[test]
fn refractory_window_suppresses_dense_steps() {
    let (mut detector, _) = started(StaticSensors::accelerometer_only());
    let steps = feed(&mut detector, &[3.0; 20], 100 * MS, 0);

    // Ascending window means at 600 ms and 900 ms; 700 ms and 800 ms fall
    // within 200 ms of the first step.
    assert_eq!(steps, vec![600 * MS, 900 * MS]);
}

#[test]
fn samples_after_stop_are_ignored() {
    let (mut detector, recorder) = started(StaticSensors::accelerometer_only());
    feed(&mut detector, &[3.0; 3], 300 * MS, 0);
    let index = detector.history_index();
    let last = detector.last_magnitude();
    detector.stop();

    feed(&mut detector, &[5.0; 20], 300 * MS, 5_000 * MS);

    assert_eq!(detector.step_count(), 0);
    assert_eq!(detector.history_index(), index);
    assert_eq!(detector.last_magnitude(), last);
    assert!(recorder.events().is_empty());
}

#[test]
fn counter_samples_after_stop_are_ignored() {
    let (mut detector, recorder) = started(StaticSensors::with_step_counter());
    detector.stop();

    assert_eq!(detector.on_sample(SensorSample::step_counter(700, 1)), None);
    assert_eq!(detector.on_sample(SensorSample::step_counter(720, 2)), None);

    assert_eq!(detector.hardware_baseline(), None);
    assert_eq!(detector.step_count(), 0);
    assert!(recorder.events().is_empty());

    detector.start().unwrap();
    assert_eq!(detector.on_sample(SensorSample::step_counter(730, 3)), None);
    assert_eq!(detector.hardware_baseline(), Some(730));
}

#[test]
fn reset_recalibrates_hardware_baseline() {
    let (mut detector, recorder) = started(StaticSensors::with_step_counter());
    detector.on_sample(SensorSample::step_counter(100, 1));
    detector.on_sample(SensorSample::step_counter(140, 2));

    detector.reset();
    assert_eq!(detector.hardware_baseline(), None);

    assert_eq!(detector.on_sample(SensorSample::step_counter(141, 3)), None);
    assert_eq!(detector.hardware_baseline(), Some(141));
    assert_eq!(detector.on_sample(SensorSample::step_counter(146, 4)), Some(5));

    assert_eq!(
        recorder.events(),
        vec![
            StepEvent::StepDetected { total_steps: 40 },
            StepEvent::CountReset,
            StepEvent::StepDetected { total_steps: 5 },
        ]
    );
}

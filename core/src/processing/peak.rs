/// Step decision over the smoothed magnitude.
///
/// A sample registers a step iff it arrives strictly more than the refractory
/// interval after the last accepted step, exceeds the threshold, and is higher
/// than the previous smoothed value. This is a rising-edge test rather than a
/// local-maximum test: any ascending sample past the refractory window
/// qualifies, not only the crest.
#[derive(Debug, Clone)]
pub struct PeakGate {
    threshold: f32,
    refractory_ns: u64,
    last_magnitude: f32,
    last_step_ns: u64,
}

impl PeakGate {
    pub fn new(threshold: f32, refractory_ns: u64) -> Self {
        Self {
            threshold,
            refractory_ns,
            last_magnitude: 0.0,
            last_step_ns: 0,
        }
    }

    /// Returns `true` when `smoothed` at `timestamp_ns` counts as a step.
    /// `last_magnitude` is updated on every call regardless of the outcome.
    pub fn evaluate(&mut self, smoothed: f32, timestamp_ns: u64) -> bool {
        // Timestamps running backwards saturate to zero and never pass the gate.
        let elapsed = timestamp_ns.saturating_sub(self.last_step_ns);
        let accepted = elapsed > self.refractory_ns
            && smoothed > self.threshold
            && smoothed > self.last_magnitude;

        if accepted {
            self.last_step_ns = timestamp_ns;
        }
        self.last_magnitude = smoothed;
        accepted
    }

    pub fn last_magnitude(&self) -> f32 {
        self.last_magnitude
    }

    pub fn last_step_ns(&self) -> u64 {
        self.last_step_ns
    }

    pub fn reset(&mut self) {
        self.last_magnitude = 0.0;
        self.last_step_ns = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    #[test]
    fn accepts_rising_value_above_threshold() {
        let mut gate = PeakGate::new(2.0, 200 * MS);
        assert!(gate.evaluate(2.5, 300 * MS));
        assert_eq!(gate.last_step_ns(), 300 * MS);
    }

    #[test]
    fn rejects_value_at_or_below_threshold() {
        let mut gate = PeakGate::new(2.0, 200 * MS);
        assert!(!gate.evaluate(2.0, 300 * MS));
        assert_eq!(gate.last_magnitude(), 2.0);
    }

    #[test]
    fn rejects_falling_value() {
        let mut gate = PeakGate::new(2.0, 200 * MS);
        assert!(!gate.evaluate(1.0, 100 * MS));
        assert!(gate.evaluate(3.0, 300 * MS));
        assert!(!gate.evaluate(2.5, 900 * MS));
    }

    #[test]
    fn refractory_boundary_is_exclusive() {
        let mut gate = PeakGate::new(2.0, 200 * MS);
        assert!(gate.evaluate(2.5, 300 * MS));
        assert!(!gate.evaluate(2.6, 500 * MS));
        assert!(gate.evaluate(2.7, 501 * MS));
    }

    #[test]
    fn first_step_needs_elapsed_time_from_zero() {
        let mut gate = PeakGate::new(2.0, 200 * MS);
        assert!(!gate.evaluate(5.0, 150 * MS));
    }

    #[test]
    fn backwards_timestamp_is_rejected() {
        let mut gate = PeakGate::new(2.0, 200 * MS);
        assert!(gate.evaluate(2.5, 1_000 * MS));
        assert!(!gate.evaluate(4.0, 10 * MS));
    }

    #[test]
    fn reset_clears_edge_and_refractory_state() {
        let mut gate = PeakGate::new(2.0, 200 * MS);
        gate.evaluate(3.0, 900 * MS);
        gate.reset();
        assert_eq!(gate.last_magnitude(), 0.0);
        assert_eq!(gate.last_step_ns(), 0);
    }
}

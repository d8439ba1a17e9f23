use std::f64::consts::PI;

/// Half-sine bump over `phase ∈ [0, 1)`, zero outside it.
pub fn half_sine(phase: f64) -> f64 {
    if (0.0..1.0).contains(&phase) {
        (phase * PI).sin()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_sine_peaks_mid_phase() {
        assert!((half_sine(0.5) - 1.0).abs() < 1e-12);
        assert_eq!(half_sine(0.0), 0.0);
    }

    #[test]
    fn half_sine_is_zero_outside_unit_phase() {
        assert_eq!(half_sine(-0.1), 0.0);
        assert_eq!(half_sine(1.0), 0.0);
        assert_eq!(half_sine(3.2), 0.0);
    }
}

use crate::math::stats::StatsHelper;

/// Removes a fixed gravity baseline from the acceleration magnitude.
///
/// The baseline assumes the device rests under gravity; it is not a
/// gravity-separation filter, so a tilting device still leaks into the output.
#[derive(Debug, Clone)]
pub struct GravityOffset {
    baseline: f32,
}

impl GravityOffset {
    pub fn new(baseline: f32) -> Self {
        Self { baseline }
    }

    /// `|sqrt(x² + y² + z²) − baseline|`
    pub fn adjust(&self, x: f32, y: f32, z: f32) -> f32 {
        (StatsHelper::magnitude(x, y, z) - self.baseline).abs()
    }
}

pub struct StatsHelper;

impl StatsHelper {
    /// Euclidean norm of a 3-axis vector.
    pub fn magnitude(x: f32, y: f32, z: f32) -> f32 {
        (x * x + y * y + z * z).sqrt()
    }

    /// Arithmetic mean over the whole slice, summed in index order.
    pub fn mean(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum: f32 = samples.iter().sum();
        sum / samples.len() as f32
    }
}

// Utility functions shared by the scoring and ranking layers.

/// Clamp a score to the [0, 1] unit interval. NaN maps to 0.0.
pub fn unit_interval(score: f32) -> f32 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

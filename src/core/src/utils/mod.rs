pub struct FloatUtils;

impl FloatUtils {
    /// Rounds to two decimal places, the precision used on scorecards.
    #[inline]
    pub fn round2(value: f32) -> f32 {
        (value * 100.0).round() / 100.0
    }

    /// `numerator / max(1, denominator)`.
    #[inline]
    pub fn guarded_ratio(numerator: f32, denominator: f32) -> f32 {
        numerator / denominator.max(1.0)
    }
}

/// Formats a legal-ball count as cricket overs, e.g. 14 balls -> "2.2".
pub fn format_overs(balls: u32) -> String {
    format!("{}.{}", balls / 6, balls % 6)
}

pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 5.0;

/// Maps `value` linearly from `[min, max]` onto `[0, 100]`, saturating at both ends.
/// A degenerate range (`min == max`) always yields 0.0.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }

    let scaled = (value - min) / (max - min) * 100.0;
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(0.0, 100.0)
}

/// Rounds to two decimal places, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted mean of `(score, weight)` pairs rounded to two decimals; 0.0 without weight.
///
/// Weights are rescaled by the largest one first so sums stay finite for any finite weights.
pub(crate) fn weighted_mean<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let pairs: Vec<(f64, f64)> = pairs.into_iter().collect();
    let largest = pairs
        .iter()
        .map(|&(_, weight)| weight)
        .fold(0.0_f64, f64::max);
    if largest <= 0.0 || !largest.is_finite() {
        return 0.0;
    }

    let (weighted_sum, total_weight) =
        pairs
            .iter()
            .fold((0.0, 0.0), |(sum, total), &(score, weight)| {
                let scaled = weight / largest;
                (sum + score * scaled, total + scaled)
            });

    if total_weight == 0.0 {
        return 0.0;
    }

    round_to_cents((weighted_sum / total_weight).clamp(0.0, 100.0))
}

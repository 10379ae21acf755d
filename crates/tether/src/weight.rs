//! Weight model: turns raw interaction counts and relevance scores into tie strengths in `[0, 1]`.

/// Negative, NaN and infinite magnitudes count as zero.
pub fn sanitize_magnitude(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// The shared denominator for a batch of counts: the largest sanitized count, but never below 1.
pub fn count_denominator<I>(counts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    counts
        .into_iter()
        .map(sanitize_magnitude)
        .fold(0.0_f64, f64::max)
        .max(1.0)
}

/// `count / max(max_count, 1)` for every count; all-zero batches yield all-zero weights.
pub fn normalize_counts(counts: &[f64]) -> Vec<f64> {
    let denominator = count_denominator(counts.iter().copied());
    counts
        .iter()
        .map(|&c| count_weight(c, denominator))
        .collect()
}

pub fn count_weight(count: f64, denominator: f64) -> f64 {
    (sanitize_magnitude(count) / denominator).clamp(0.0, 1.0)
}

/// Scores are already bounded, so they pass through untouched (no re-normalization against the
/// batch maximum); only out-of-range values are pulled back into `[0, 1]`.
pub fn score_weight(score: f64) -> f64 {
    sanitize_magnitude(score).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_normalize_against_the_maximum() {
        assert_eq!(normalize_counts(&[10.0, 5.0, 1.0]), vec![1.0, 0.5, 0.1]);
    }

    #[test]
    fn all_zero_counts_do_not_divide_by_zero() {
        assert_eq!(normalize_counts(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(normalize_counts(&[]).is_empty());
    }

    #[test]
    fn negative_and_nan_counts_clamp_to_zero() {
        let w = normalize_counts(&[-4.0, f64::NAN, 2.0]);
        assert_eq!(w, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn fractional_maxima_below_one_use_unit_denominator() {
        assert_eq!(normalize_counts(&[0.5, 0.25]), vec![0.5, 0.25]);
    }

    #[test]
    fn scores_pass_through_without_renormalization() {
        assert_eq!(score_weight(0.42), 0.42);
        assert_eq!(score_weight(0.0), 0.0);
        assert_eq!(score_weight(-0.3), 0.0);
        assert_eq!(score_weight(1.7), 1.0);
        assert_eq!(score_weight(f64::NAN), 0.0);
    }
}

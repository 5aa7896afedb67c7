//! Pure statistics over raw sample distributions.

/// Percentile reported when a distribution carries no samples: with no
/// information, assume the median.
pub const NEUTRAL_PERCENTILE: u8 = 50;

/// Position of `value` within `samples` as the share of samples strictly
/// below it, 0-100.
///
/// The scan sorts ascending and looks for the first sample `>=` the queried
/// value, so ties at the value count as above it. This is not a standard
/// rank percentile with duplicate averaging; downstream numbers depend on
/// these exact semantics.
///
/// An empty distribution yields [`NEUTRAL_PERCENTILE`]; a value above every
/// sample yields 100.
#[must_use]
pub fn percentile(value: f64, samples: &[f64]) -> u8 {
    if samples.is_empty() {
        return NEUTRAL_PERCENTILE;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    match sorted.iter().position(|&sample| sample >= value) {
        Some(position) => {
            #[allow(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let share = (position as f64 / sorted.len() as f64 * 100.0).round() as u8;
            share
        }
        None => 100,
    }
}

/// Arithmetic mean of `samples`.
///
/// The empty case is guarded upstream: the resolver never averages an empty
/// corpus, and calling this with no samples is a caller bug.
#[must_use]
pub fn mean(samples: &[f64]) -> f64 {
    debug_assert!(!samples.is_empty(), "mean of an empty distribution");
    #[allow(clippy::cast_precision_loss)]
    let count = samples.len() as f64;
    samples.iter().sum::<f64>() / count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_distribution_is_neutral() {
        assert_eq!(percentile(0.0, &[]), 50);
        assert_eq!(percentile(1_000_000.0, &[]), 50);
    }

    #[test]
    fn value_above_every_sample_is_100() {
        assert_eq!(percentile(10.0, &[1.0, 2.0, 3.0]), 100);
    }

    #[test]
    fn value_below_every_sample_is_0() {
        assert_eq!(percentile(0.5, &[1.0, 2.0, 3.0]), 0);
    }

    #[test]
    fn ties_at_the_query_value_count_as_above() {
        // 5.0 matches the first sorted sample >= 5.0 at position 1 of 4.
        assert_eq!(percentile(5.0, &[5.0, 3.0, 7.0, 5.0]), 25);
        // A single exact match sits at position 0.
        assert_eq!(percentile(5.0, &[5.0]), 0);
    }

    #[test]
    fn unsorted_input_is_sorted_before_the_scan() {
        assert_eq!(percentile(4.0, &[9.0, 1.0, 3.0, 7.0]), 50);
    }

    #[test]
    fn result_is_always_in_range() {
        let samples = [2.0, 4.0, 8.0, 16.0, 32.0];
        for value in [-1.0, 0.0, 2.0, 5.0, 31.9, 32.0, 1000.0] {
            let p = percentile(value, &samples);
            assert!(p <= 100, "percentile({value}) out of range: {p}");
        }
    }

    #[test]
    fn rounding_follows_position_share() {
        // position 1 of 3 => 33.33 => 33; position 2 of 3 => 66.67 => 67.
        assert_eq!(percentile(2.0, &[1.0, 2.0, 3.0]), 33);
        assert_eq!(percentile(2.5, &[1.0, 2.0, 3.0]), 67);
    }

    #[test]
    fn mean_is_arithmetic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[7.5]), 7.5);
    }
}

//! Weighted overall score combining a profile with its segment baseline.

use crate::types::{BenchmarkBaseline, ProfileMetrics};

// ---------------------------------------------------------------------------
// Weight constants (must sum to exactly 100)
// ---------------------------------------------------------------------------

/// Follower component weight, in percent.
pub const W_FOLLOWERS: u32 = 30;
/// Engagement component weight, in percent. Engagement dominates: it is the
/// strongest indicator of audience quality relative to raw follower counts.
pub const W_ENGAGEMENT: u32 = 50;
/// Posting-cadence component weight, in percent.
pub const W_POST_FREQUENCY: u32 = 20;

// Compile-time assertion that weights sum to 100.
const _: () = assert!(
    W_FOLLOWERS + W_ENGAGEMENT + W_POST_FREQUENCY == 100,
    "score weights must sum to exactly 100"
);

/// Ratio-vs-baseline component score, capped at 100.
///
/// A zero (or negative) baseline average contributes 0 rather than dividing
/// by zero.
fn component(value: f64, baseline_avg: f64) -> f64 {
    if baseline_avg <= 0.0 {
        return 0.0;
    }
    (value / baseline_avg * 100.0).min(100.0)
}

/// Combine a profile's metrics and a resolved baseline into the overall
/// 0-100 score.
#[must_use]
pub fn overall_score(profile: &ProfileMetrics, baseline: &BenchmarkBaseline) -> u8 {
    #[allow(clippy::cast_precision_loss)]
    let follower = component(profile.followers as f64, baseline.avg_followers);
    let engagement = component(profile.engagement_rate, baseline.avg_engagement);
    let cadence = component(profile.post_frequency, baseline.avg_post_frequency);

    let overall = follower * f64::from(W_FOLLOWERS) / 100.0
        + engagement * f64::from(W_ENGAGEMENT) / 100.0
        + cadence * f64::from(W_POST_FREQUENCY) / 100.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = overall.round().clamp(0.0, 100.0) as u8;
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Distribution, LocationType};
    use chrono::Utc;

    fn baseline(avg_followers: f64, avg_engagement: f64, avg_post_frequency: f64) -> BenchmarkBaseline {
        BenchmarkBaseline {
            industry: "fitness".to_string(),
            location_type: LocationType::City,
            location_value: "Austin".to_string(),
            avg_followers,
            avg_engagement,
            avg_post_frequency,
            avg_reel_percentage: 40.0,
            follower_distribution: Distribution::default(),
            engagement_distribution: Distribution::default(),
            sample_size: 10,
            last_calculated: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn profile(followers: i64, engagement_rate: f64, post_frequency: f64) -> ProfileMetrics {
        ProfileMetrics {
            followers,
            engagement_rate,
            post_frequency,
            reel_percentage: 50,
        }
    }

    #[test]
    fn worked_example_scores_96() {
        // follower and engagement components cap at 100; cadence is
        // 4.2 / 5.2 * 100 = 80.77, so the weighted sum rounds to 96.
        let score = overall_score(&profile(12_543, 3.2, 4.2), &baseline(8_500.0, 2.3, 5.2));
        assert_eq!(score, 96);
    }

    #[test]
    fn profile_matching_the_baseline_scores_100() {
        let score = overall_score(&profile(8_500, 2.3, 5.2), &baseline(8_500.0, 2.3, 5.2));
        assert_eq!(score, 100);
    }

    #[test]
    fn zero_metrics_score_zero() {
        let score = overall_score(&profile(0, 0.0, 0.0), &baseline(8_500.0, 2.3, 5.2));
        assert_eq!(score, 0);
    }

    #[test]
    fn zero_baseline_average_contributes_zero_not_a_division() {
        // Only engagement has a usable average: component 100 at weight 50.
        let score = overall_score(&profile(12_543, 3.2, 4.2), &baseline(0.0, 2.3, 0.0));
        assert_eq!(score, 50);
    }

    #[test]
    fn score_stays_in_range_for_extreme_inputs() {
        let score = overall_score(
            &profile(i64::MAX, 99.99, 70.0),
            &baseline(1.0, 0.01, 0.1),
        );
        assert!(score <= 100);
        let score = overall_score(&profile(0, 0.0, 0.0), &baseline(1.0, 1.0, 1.0));
        assert_eq!(score, 0);
    }

    #[test]
    fn half_of_baseline_scores_50() {
        let score = overall_score(&profile(4_250, 1.15, 2.6), &baseline(8_500.0, 2.3, 5.2));
        assert_eq!(score, 50);
    }
}

//! Rule-based advisory insights from profile-vs-baseline comparisons.
//!
//! Rules run in a fixed order and each appends at most one insight. A rule
//! whose condition is false emits nothing, so the list is empty only when
//! every metric sits inside the normal band.

use crate::types::{BenchmarkBaseline, Insight, InsightCategory, InsightKind, ProfileMetrics};

/// Ratio below its baseline average at which a metric is flagged.
const UNDERPERFORM_RATIO: f64 = 0.7;
/// Ratio above the baseline average at which engagement is celebrated.
const OUTPERFORM_RATIO: f64 = 1.3;
/// Reel share (percent of recent posts) below which the content-mix rule fires.
const MIN_REEL_PERCENTAGE: i16 = 30;
/// Overall score at or above which performance is called top-tier.
const TOP_TIER_SCORE: u8 = 85;
/// Overall score below which competitors are flagged as outpacing.
const LAGGING_SCORE: u8 = 60;

/// Evaluate all rules against the profile, its baseline, and the overall
/// score, in order: engagement, posting cadence, content mix, overall.
#[must_use]
pub fn generate_insights(
    profile: &ProfileMetrics,
    baseline: &BenchmarkBaseline,
    overall: u8,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if profile.engagement_rate < baseline.avg_engagement * UNDERPERFORM_RATIO {
        insights.push(Insight {
            kind: InsightKind::Warning,
            category: InsightCategory::Engagement,
            message: format!(
                "Your engagement rate of {:.2}% is well below the {:.2}% average for your segment",
                profile.engagement_rate, baseline.avg_engagement
            ),
            recommendation: "Ask questions and add clear calls to action in your captions to \
                             pull followers into the comments."
                .to_string(),
        });
    } else if profile.engagement_rate > baseline.avg_engagement * OUTPERFORM_RATIO {
        #[allow(clippy::cast_possible_truncation)]
        let percent_above =
            ((profile.engagement_rate / baseline.avg_engagement - 1.0) * 100.0).round() as i64;
        insights.push(Insight {
            kind: InsightKind::Success,
            category: InsightCategory::Engagement,
            message: format!(
                "Your engagement rate is {percent_above}% above the segment average"
            ),
            recommendation: "Your content is landing with your audience. Keep the current style \
                             and cadence."
                .to_string(),
        });
    }

    if profile.post_frequency < baseline.avg_post_frequency * UNDERPERFORM_RATIO {
        insights.push(Insight {
            kind: InsightKind::Warning,
            category: InsightCategory::Frequency,
            message: format!(
                "You post {:.1} times per week while similar accounts average {:.1}",
                profile.post_frequency, baseline.avg_post_frequency
            ),
            recommendation: "Work up to 2-3 more posts per week to stay in front of your \
                             audience."
                .to_string(),
        });
    }

    if profile.reel_percentage < MIN_REEL_PERCENTAGE {
        insights.push(Insight {
            kind: InsightKind::Info,
            category: InsightCategory::Content,
            message: format!(
                "Reels make up only {}% of your recent posts",
                profile.reel_percentage
            ),
            recommendation: "Aim for a 40-60% share of short-form video; reels reach well \
                             beyond your existing followers."
                .to_string(),
        });
    }

    if overall >= TOP_TIER_SCORE {
        insights.push(Insight {
            kind: InsightKind::Success,
            category: InsightCategory::Overall,
            message: "You are delivering top-tier performance for your segment".to_string(),
            recommendation: "Keep your current strategy and watch the leaderboard for \
                             newcomers."
                .to_string(),
        });
    } else if overall < LAGGING_SCORE {
        insights.push(Insight {
            kind: InsightKind::Warning,
            category: InsightCategory::Overall,
            message: "Competitors in your segment are currently outpacing you".to_string(),
            recommendation: "Focus on the flagged metrics above; engagement moves the score \
                             fastest."
                .to_string(),
        });
    }

    insights
}

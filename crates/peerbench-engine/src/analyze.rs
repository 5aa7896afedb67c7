//! End-to-end analysis orchestration.

use chrono::{DateTime, Utc};

use crate::benchmark::BenchmarkResolver;
use crate::error::EngineError;
use crate::store::MetricsStore;
use crate::types::{AnalysisReport, ScoreResult, Segment};
use crate::{insights, rank, score, stats};

/// Run the full analysis for one stored profile against its segment.
///
/// 1. Fetch the subject's metrics (the NotFound precondition check).
/// 2. Resolve the segment baseline, recomputing and upserting if stale.
/// 3. Percentiles from the baseline's raw distributions; a degraded
///    baseline has empty distributions and yields the neutral 50.
/// 4. Ordinal ranks per geographic scope.
/// 5. Weighted overall score and threshold-driven insights.
///
/// Stateless per call; the conditional baseline upsert inside step 2 is the
/// only side effect.
///
/// # Errors
///
/// Returns [`EngineError::ProfileNotFound`] if the subject is absent, or
/// [`EngineError::Store`] on any corpus/store failure (surfaced as-is, not
/// retried).
pub async fn analyze<S>(
    store: &S,
    resolver: &BenchmarkResolver,
    profile_id: i64,
    segment: &Segment,
    now: DateTime<Utc>,
) -> Result<AnalysisReport, EngineError>
where
    S: MetricsStore + ?Sized,
{
    let profile = store.fetch_profile(profile_id).await?;
    let baseline = resolver.resolve(store, segment, now).await?;

    #[allow(clippy::cast_precision_loss)]
    let follower_percentile = stats::percentile(
        profile.followers as f64,
        baseline.follower_distribution.as_slice(),
    );
    let engagement_percentile = stats::percentile(
        profile.engagement_rate,
        baseline.engagement_distribution.as_slice(),
    );

    let rankings = rank::rank_profile(store, &profile, segment).await?;
    let overall = score::overall_score(&profile, &baseline);
    let insights = insights::generate_insights(&profile, &baseline, overall);

    tracing::info!(
        profile_id,
        industry = %segment.industry,
        overall,
        sample_size = baseline.sample_size,
        insight_count = insights.len(),
        "profile analysis complete"
    );

    Ok(AnalysisReport {
        profile,
        score: ScoreResult {
            overall,
            follower_percentile,
            engagement_percentile,
        },
        benchmarks: baseline,
        rankings,
        insights,
    })
}

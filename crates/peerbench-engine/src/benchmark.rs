//! Segment baseline resolution: a freshness-gated cache over corpus
//! aggregation, with an industry-defaults fallback for empty segments.

use chrono::{DateTime, Duration, Utc};
use peerbench_core::IndustryDefaults;

use crate::error::EngineError;
use crate::stats;
use crate::store::MetricsStore;
use crate::types::{BenchmarkBaseline, Distribution, LocationType, ProfileMetrics, Segment};

/// A stored baseline older than this is recomputed on demand.
pub const BASELINE_TTL_HOURS: i64 = 24;
/// Corpus rows older than this never feed a recomputation.
pub const CORPUS_MAX_AGE_DAYS: i64 = 30;

/// Produces a segment's statistical baseline.
///
/// Holds the immutable industry-defaults table injected at construction;
/// all corpus and cache access goes through the [`MetricsStore`] handed to
/// [`resolve`](BenchmarkResolver::resolve).
pub struct BenchmarkResolver {
    defaults: IndustryDefaults,
}

impl BenchmarkResolver {
    #[must_use]
    pub fn new(defaults: IndustryDefaults) -> Self {
        Self { defaults }
    }

    /// Resolve the baseline for `segment` as of `now`.
    ///
    /// A stored baseline younger than [`BASELINE_TTL_HOURS`] is returned
    /// unchanged. Otherwise the peer corpus (rows scraped within
    /// [`CORPUS_MAX_AGE_DAYS`]) is re-aggregated and the result upserted
    /// under the segment's key. An empty corpus yields a degraded baseline
    /// from the defaults table: `sample_size` 0, no distributions, and
    /// nothing persisted.
    ///
    /// Recomputation is idempotent: the same corpus snapshot always stores
    /// the same averages and distributions.
    ///
    /// # Errors
    ///
    /// Store failures propagate unchanged; there is no internal retry.
    pub async fn resolve<S>(
        &self,
        store: &S,
        segment: &Segment,
        now: DateTime<Utc>,
    ) -> Result<BenchmarkBaseline, EngineError>
    where
        S: MetricsStore + ?Sized,
    {
        let (location_type, location_value) = baseline_key(segment);

        if let Some(existing) = store
            .load_baseline(&segment.industry, location_type, location_value)
            .await?
        {
            if now - existing.updated_at < Duration::hours(BASELINE_TTL_HOURS) {
                tracing::debug!(
                    industry = %segment.industry,
                    location = %location_value,
                    "benchmark cache hit"
                );
                return Ok(existing);
            }
        }

        let peers = store
            .fetch_peer_metrics(
                &segment.industry,
                segment.city.as_deref(),
                segment.state.as_deref(),
                segment.country.as_deref(),
                CORPUS_MAX_AGE_DAYS,
            )
            .await?;

        if peers.is_empty() {
            tracing::info!(
                industry = %segment.industry,
                "empty peer corpus, serving industry defaults"
            );
            return Ok(self.degraded(segment, location_type, location_value, now));
        }

        let baseline = aggregate(segment, location_type, location_value, &peers, now);
        store.upsert_baseline(&baseline).await?;
        tracing::debug!(
            industry = %segment.industry,
            location = %location_value,
            sample_size = baseline.sample_size,
            "benchmark recomputed"
        );
        Ok(baseline)
    }

    /// Baseline built from the defaults table when no peers exist.
    fn degraded(
        &self,
        segment: &Segment,
        location_type: LocationType,
        location_value: &str,
        now: DateTime<Utc>,
    ) -> BenchmarkBaseline {
        let averages = self.defaults.lookup(&segment.industry);
        BenchmarkBaseline {
            industry: segment.industry.clone(),
            location_type,
            location_value: location_value.to_string(),
            avg_followers: averages.avg_followers,
            avg_engagement: averages.avg_engagement,
            avg_post_frequency: averages.avg_post_frequency,
            avg_reel_percentage: 0.0,
            follower_distribution: Distribution::default(),
            engagement_distribution: Distribution::default(),
            sample_size: 0,
            last_calculated: now,
            updated_at: now,
        }
    }
}

/// Baselines are cached per city; a city-less segment keys one shared row
/// under the industry itself.
fn baseline_key(segment: &Segment) -> (LocationType, &str) {
    match &segment.city {
        Some(city) => (LocationType::City, city.as_str()),
        None => (LocationType::Global, segment.industry.as_str()),
    }
}

/// Arithmetic aggregation over a non-empty peer corpus.
fn aggregate(
    segment: &Segment,
    location_type: LocationType,
    location_value: &str,
    peers: &[ProfileMetrics],
    now: DateTime<Utc>,
) -> BenchmarkBaseline {
    #[allow(clippy::cast_precision_loss)]
    let follower_samples: Vec<f64> = peers.iter().map(|p| p.followers as f64).collect();
    let engagement_samples: Vec<f64> = peers.iter().map(|p| p.engagement_rate).collect();
    let frequency_samples: Vec<f64> = peers.iter().map(|p| p.post_frequency).collect();
    let reel_samples: Vec<f64> = peers
        .iter()
        .map(|p| f64::from(p.reel_percentage))
        .collect();
    #[allow(clippy::cast_possible_wrap)]
    let sample_size = peers.len() as i64;

    BenchmarkBaseline {
        industry: segment.industry.clone(),
        location_type,
        location_value: location_value.to_string(),
        avg_followers: stats::mean(&follower_samples),
        avg_engagement: stats::mean(&engagement_samples),
        avg_post_frequency: stats::mean(&frequency_samples),
        avg_reel_percentage: stats::mean(&reel_samples),
        follower_distribution: Distribution::new(follower_samples),
        engagement_distribution: Distribution::new(engagement_samples),
        sample_size,
        last_calculated: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(city: Option<&str>) -> Segment {
        Segment {
            industry: "fitness".to_string(),
            city: city.map(str::to_string),
            state: Some("TX".to_string()),
            country: Some("US".to_string()),
        }
    }

    #[test]
    fn baseline_key_prefers_city() {
        let seg = segment(Some("Austin"));
        assert_eq!(baseline_key(&seg), (LocationType::City, "Austin"));
    }

    #[test]
    fn baseline_key_without_city_is_global_by_industry() {
        let seg = segment(None);
        assert_eq!(baseline_key(&seg), (LocationType::Global, "fitness"));
    }

    #[test]
    fn aggregate_keeps_raw_per_member_distributions() {
        let peers = vec![
            ProfileMetrics {
                followers: 1_000,
                engagement_rate: 2.0,
                post_frequency: 3.0,
                reel_percentage: 20,
            },
            ProfileMetrics {
                followers: 3_000,
                engagement_rate: 4.0,
                post_frequency: 5.0,
                reel_percentage: 60,
            },
        ];
        let seg = segment(Some("Austin"));
        let now = Utc::now();
        let baseline = aggregate(&seg, LocationType::City, "Austin", &peers, now);

        assert_eq!(baseline.avg_followers, 2_000.0);
        assert_eq!(baseline.avg_engagement, 3.0);
        assert_eq!(baseline.avg_post_frequency, 4.0);
        assert_eq!(baseline.avg_reel_percentage, 40.0);
        assert_eq!(baseline.sample_size, 2);
        assert_eq!(baseline.follower_distribution.as_slice(), &[1_000.0, 3_000.0]);
        assert_eq!(baseline.engagement_distribution.as_slice(), &[2.0, 4.0]);
        assert_eq!(baseline.updated_at, now);
    }
}

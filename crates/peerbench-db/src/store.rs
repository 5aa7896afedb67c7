//! Postgres-backed implementation of the engine's storage seam.

use async_trait::async_trait;
use peerbench_engine::{
    BenchmarkBaseline, Distribution, EngineError, LocationType, MetricsStore, ProfileMetrics,
    RankScope,
};
use sqlx::PgPool;

use crate::benchmarks::{self, BenchmarkRow, NewBenchmark};
use crate::{profiles, DbError};

#[derive(Debug, Clone)]
pub struct PgMetricsStore {
    pool: PgPool,
}

impl PgMetricsStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn location_type_from_str(raw: &str) -> Result<LocationType, EngineError> {
    match raw {
        "city" => Ok(LocationType::City),
        "state" => Ok(LocationType::State),
        "country" => Ok(LocationType::Country),
        "global" => Ok(LocationType::Global),
        other => Err(EngineError::store(DbError::UnknownLocationType(
            other.to_string(),
        ))),
    }
}

fn baseline_from_row(row: BenchmarkRow) -> Result<BenchmarkBaseline, EngineError> {
    let location_type = location_type_from_str(&row.location_type)?;
    let follower_distribution: Distribution = serde_json::from_value(row.follower_distribution)
        .map_err(|e| EngineError::store(DbError::Json(e)))?;
    let engagement_distribution: Distribution =
        serde_json::from_value(row.engagement_distribution)
            .map_err(|e| EngineError::store(DbError::Json(e)))?;
    Ok(BenchmarkBaseline {
        industry: row.industry,
        location_type,
        location_value: row.location_value,
        avg_followers: row.avg_followers,
        avg_engagement: row.avg_engagement,
        avg_post_frequency: row.avg_post_frequency,
        avg_reel_percentage: row.avg_reel_percentage,
        follower_distribution,
        engagement_distribution,
        sample_size: row.sample_size,
        last_calculated: row.last_calculated,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl MetricsStore for PgMetricsStore {
    async fn fetch_profile(&self, profile_id: i64) -> Result<ProfileMetrics, EngineError> {
        let row = profiles::get_profile(&self.pool, profile_id)
            .await
            .map_err(EngineError::store)?
            .ok_or(EngineError::ProfileNotFound)?;
        Ok(ProfileMetrics {
            followers: row.followers,
            engagement_rate: row.engagement_rate,
            post_frequency: row.post_frequency,
            reel_percentage: row.reel_percentage,
        })
    }

    async fn fetch_peer_metrics(
        &self,
        industry: &str,
        city: Option<&str>,
        state: Option<&str>,
        country: Option<&str>,
        max_age_days: i64,
    ) -> Result<Vec<ProfileMetrics>, EngineError> {
        let max_age_days = i32::try_from(max_age_days).unwrap_or(i32::MAX);
        let rows = profiles::list_peer_metrics(&self.pool, industry, city, state, country, max_age_days)
            .await
            .map_err(EngineError::store)?;
        Ok(rows
            .into_iter()
            .map(|row| ProfileMetrics {
                followers: row.followers,
                engagement_rate: row.engagement_rate,
                post_frequency: row.post_frequency,
                reel_percentage: row.reel_percentage,
            })
            .collect())
    }

    async fn load_baseline(
        &self,
        industry: &str,
        location_type: LocationType,
        location_value: &str,
    ) -> Result<Option<BenchmarkBaseline>, EngineError> {
        let row = benchmarks::get_benchmark(
            &self.pool,
            industry,
            location_type.as_str(),
            location_value,
        )
        .await
        .map_err(EngineError::store)?;
        row.map(baseline_from_row).transpose()
    }

    async fn upsert_baseline(&self, baseline: &BenchmarkBaseline) -> Result<(), EngineError> {
        let follower_distribution = serde_json::to_value(&baseline.follower_distribution)
            .map_err(|e| EngineError::store(DbError::Json(e)))?;
        let engagement_distribution = serde_json::to_value(&baseline.engagement_distribution)
            .map_err(|e| EngineError::store(DbError::Json(e)))?;
        let new_benchmark = NewBenchmark {
            industry: &baseline.industry,
            location_type: baseline.location_type.as_str(),
            location_value: &baseline.location_value,
            avg_followers: baseline.avg_followers,
            avg_engagement: baseline.avg_engagement,
            avg_post_frequency: baseline.avg_post_frequency,
            avg_reel_percentage: baseline.avg_reel_percentage,
            follower_distribution,
            engagement_distribution,
            sample_size: baseline.sample_size,
            last_calculated: baseline.last_calculated,
            updated_at: baseline.updated_at,
        };
        benchmarks::upsert_benchmark(&self.pool, &new_benchmark)
            .await
            .map_err(EngineError::store)?;
        Ok(())
    }

    async fn count_dominating(
        &self,
        scope: RankScope,
        industry: &str,
        location_value: &str,
        followers: i64,
        engagement_rate: f64,
    ) -> Result<i64, EngineError> {
        profiles::count_dominating_in_scope(
            &self.pool,
            scope,
            industry,
            location_value,
            followers,
            engagement_rate,
        )
        .await
        .map_err(EngineError::store)
    }

    async fn count_in_scope(
        &self,
        scope: RankScope,
        industry: &str,
        location_value: &str,
    ) -> Result<i64, EngineError> {
        profiles::count_in_scope(&self.pool, scope, industry, location_value)
            .await
            .map_err(EngineError::store)
    }
}

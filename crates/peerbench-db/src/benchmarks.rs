// crates/peerbench-db/src/benchmarks.rs
use crate::DbError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BenchmarkRow {
    pub id: i64,
    pub industry: String,
    pub location_type: String,
    pub location_value: String,
    pub avg_followers: f64,
    pub avg_engagement: f64,
    pub avg_post_frequency: f64,
    pub avg_reel_percentage: f64,
    /// JSONB array of raw per-member follower counts.
    pub follower_distribution: serde_json::Value,
    /// JSONB array of raw per-member engagement rates.
    pub engagement_distribution: serde_json::Value,
    pub sample_size: i64,
    pub last_calculated: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBenchmark<'a> {
    pub industry: &'a str,
    pub location_type: &'a str,
    pub location_value: &'a str,
    pub avg_followers: f64,
    pub avg_engagement: f64,
    pub avg_post_frequency: f64,
    pub avg_reel_percentage: f64,
    pub follower_distribution: serde_json::Value,
    pub engagement_distribution: serde_json::Value,
    pub sample_size: i64,
    pub last_calculated: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Load the stored benchmark for an exact `(industry, location_type,
/// location_value)` key.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn get_benchmark(
    pool: &PgPool,
    industry: &str,
    location_type: &str,
    location_value: &str,
) -> Result<Option<BenchmarkRow>, DbError> {
    let row = sqlx::query_as::<_, BenchmarkRow>(
        "SELECT id, industry, location_type, location_value, \
                avg_followers, avg_engagement, avg_post_frequency, avg_reel_percentage, \
                follower_distribution, engagement_distribution, sample_size, \
                last_calculated, updated_at \
         FROM benchmarks \
         WHERE industry = $1 AND location_type = $2 AND location_value = $3",
    )
    .bind(industry)
    .bind(location_type)
    .bind(location_value)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Upsert a benchmark. Returns the internal ID.
///
/// Conflict key: (`industry`, `location_type`, `location_value`). On
/// conflict every numeric field and both distributions are overwritten in a
/// single statement, so concurrent recomputations of the same segment are
/// atomic and last-writer-wins. Writing the same computed row twice leaves
/// the stored row unchanged.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn upsert_benchmark(
    pool: &PgPool,
    benchmark: &NewBenchmark<'_>,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO benchmarks \
           (industry, location_type, location_value, avg_followers, avg_engagement, \
            avg_post_frequency, avg_reel_percentage, follower_distribution, \
            engagement_distribution, sample_size, last_calculated, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (industry, location_type, location_value) DO UPDATE SET \
           avg_followers = EXCLUDED.avg_followers, \
           avg_engagement = EXCLUDED.avg_engagement, \
           avg_post_frequency = EXCLUDED.avg_post_frequency, \
           avg_reel_percentage = EXCLUDED.avg_reel_percentage, \
           follower_distribution = EXCLUDED.follower_distribution, \
           engagement_distribution = EXCLUDED.engagement_distribution, \
           sample_size = EXCLUDED.sample_size, \
           last_calculated = EXCLUDED.last_calculated, \
           updated_at = EXCLUDED.updated_at \
         RETURNING id",
    )
    .bind(benchmark.industry)
    .bind(benchmark.location_type)
    .bind(benchmark.location_value)
    .bind(benchmark.avg_followers)
    .bind(benchmark.avg_engagement)
    .bind(benchmark.avg_post_frequency)
    .bind(benchmark.avg_reel_percentage)
    .bind(&benchmark.follower_distribution)
    .bind(&benchmark.engagement_distribution)
    .bind(benchmark.sample_size)
    .bind(benchmark.last_calculated)
    .bind(benchmark.updated_at)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

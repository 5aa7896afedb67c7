// crates/peerbench-db/src/profiles.rs
use crate::DbError;
use chrono::{DateTime, Utc};
use peerbench_engine::RankScope;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub public_id: Uuid,
    pub username: String,
    pub industry: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub followers: i64,
    pub engagement_rate: f64,
    pub post_frequency: f64,
    pub reel_percentage: i16,
    pub last_scraped: DateTime<Utc>,
}

/// Metric columns of one corpus member, as fed into baseline aggregation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PeerMetricsRow {
    pub followers: i64,
    pub engagement_rate: f64,
    pub post_frequency: f64,
    pub reel_percentage: i16,
}

/// Fetch one stored profile by internal ID.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn get_profile(pool: &PgPool, profile_id: i64) -> Result<Option<ProfileRow>, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT id, public_id, username, industry, city, state, country, \
                followers, engagement_rate, post_frequency, reel_percentage, last_scraped \
         FROM profiles WHERE id = $1",
    )
    .bind(profile_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// All peers matching `industry` and any of the given locations, scraped
/// within `max_age_days`. A `NULL` location filter never matches.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn list_peer_metrics(
    pool: &PgPool,
    industry: &str,
    city: Option<&str>,
    state: Option<&str>,
    country: Option<&str>,
    max_age_days: i32,
) -> Result<Vec<PeerMetricsRow>, DbError> {
    let rows = sqlx::query_as::<_, PeerMetricsRow>(
        "SELECT followers, engagement_rate, post_frequency, reel_percentage \
         FROM profiles \
         WHERE industry = $1 \
           AND (city = $2 OR state = $3 OR country = $4) \
           AND last_scraped > NOW() - make_interval(days => $5)",
    )
    .bind(industry)
    .bind(city)
    .bind(state)
    .bind(country)
    .bind(max_age_days)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

const fn count_in_scope_sql(scope: RankScope) -> &'static str {
    match scope {
        RankScope::City => "SELECT COUNT(*) FROM profiles WHERE industry = $1 AND city = $2",
        RankScope::State => "SELECT COUNT(*) FROM profiles WHERE industry = $1 AND state = $2",
        RankScope::National => {
            "SELECT COUNT(*) FROM profiles WHERE industry = $1 AND country = $2"
        }
    }
}

const fn count_dominating_sql(scope: RankScope) -> &'static str {
    match scope {
        RankScope::City => {
            "SELECT COUNT(*) FROM profiles \
             WHERE industry = $1 AND city = $2 \
               AND (followers > $3 OR (followers = $3 AND engagement_rate > $4))"
        }
        RankScope::State => {
            "SELECT COUNT(*) FROM profiles \
             WHERE industry = $1 AND state = $2 \
               AND (followers > $3 OR (followers = $3 AND engagement_rate > $4))"
        }
        RankScope::National => {
            "SELECT COUNT(*) FROM profiles \
             WHERE industry = $1 AND country = $2 \
               AND (followers > $3 OR (followers = $3 AND engagement_rate > $4))"
        }
    }
}

/// Count of corpus members in `scope` matching `industry` and the scope's
/// location value.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn count_in_scope(
    pool: &PgPool,
    scope: RankScope,
    industry: &str,
    location_value: &str,
) -> Result<i64, DbError> {
    Ok(sqlx::query_scalar::<_, i64>(count_in_scope_sql(scope))
        .bind(industry)
        .bind(location_value)
        .fetch_one(pool)
        .await?)
}

/// Count of scope members whose `(followers, engagement_rate)` strictly
/// dominates the given pair: followers greater, or followers equal and
/// engagement greater. This ordering is the leaderboard tie-break.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn count_dominating_in_scope(
    pool: &PgPool,
    scope: RankScope,
    industry: &str,
    location_value: &str,
    followers: i64,
    engagement_rate: f64,
) -> Result<i64, DbError> {
    Ok(sqlx::query_scalar::<_, i64>(count_dominating_sql(scope))
        .bind(industry)
        .bind(location_value)
        .bind(followers)
        .bind(engagement_rate)
        .fetch_one(pool)
        .await?)
}

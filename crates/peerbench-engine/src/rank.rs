//! Ordinal leaderboard position within nested geographic scopes.

use crate::error::EngineError;
use crate::store::MetricsStore;
use crate::types::{ProfileMetrics, RankResult, RankScope, Rankings, Segment};

/// Compute the subject's rank and scope size for city, state, and national
/// scopes.
///
/// The subject's metrics must already be resolved by the caller (a missing
/// subject surfaces as [`EngineError::ProfileNotFound`] there, before any
/// ranking happens). Rank is `1 +` the number of scope members that strictly
/// dominate the subject under `(followers desc, engagement desc)`; profiles
/// with identical followers and engagement do not dominate each other and
/// share a rank number.
///
/// # Errors
///
/// Returns [`EngineError::Store`] on corpus-count failure.
pub async fn rank_profile<S>(
    store: &S,
    profile: &ProfileMetrics,
    segment: &Segment,
) -> Result<Rankings, EngineError>
where
    S: MetricsStore + ?Sized,
{
    let city = scope_rank(store, RankScope::City, segment.city.as_deref(), profile, segment).await?;
    let state =
        scope_rank(store, RankScope::State, segment.state.as_deref(), profile, segment).await?;
    let national = scope_rank(
        store,
        RankScope::National,
        segment.country.as_deref(),
        profile,
        segment,
    )
    .await?;
    Ok(Rankings {
        city,
        state,
        national,
    })
}

async fn scope_rank<S>(
    store: &S,
    scope: RankScope,
    location: Option<&str>,
    profile: &ProfileMetrics,
    segment: &Segment,
) -> Result<RankResult, EngineError>
where
    S: MetricsStore + ?Sized,
{
    // A segment without this scope's location has an empty scope: the
    // subject leads it, and the total falls back so the result never reads
    // as "rank 1 of 1".
    let Some(location) = location else {
        return Ok(RankResult {
            rank: 1,
            total: scope.fallback_total(),
        });
    };

    let ahead = store
        .count_dominating(
            scope,
            &segment.industry,
            location,
            profile.followers,
            profile.engagement_rate,
        )
        .await?;
    let members = store
        .count_in_scope(scope, &segment.industry, location)
        .await?;

    let total = if members == 0 {
        scope.fallback_total()
    } else {
        members
    };
    Ok(RankResult {
        rank: ahead + 1,
        total,
    })
}

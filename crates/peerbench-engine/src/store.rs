//! Storage seam between the engine and the externally-owned corpus.

use async_trait::async_trait;

use crate::error::EngineError;
use crate::types::{BenchmarkBaseline, LocationType, ProfileMetrics, RankScope};

/// Read/write capabilities the engine must be handed.
///
/// The engine never assumes exclusive access to the backing store and
/// imposes no timeout of its own; callers own the deadline. Implementations
/// must make [`upsert_baseline`](MetricsStore::upsert_baseline) an atomic
/// overwrite by key so concurrent recomputations of the same segment are
/// last-writer-wins.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Single-subject read.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ProfileNotFound`] if the profile is absent,
    /// or [`EngineError::Store`] on storage failure.
    async fn fetch_profile(&self, profile_id: i64) -> Result<ProfileMetrics, EngineError>;

    /// All peers matching `industry` and any of the given locations, scraped
    /// within `max_age_days`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on storage failure.
    async fn fetch_peer_metrics(
        &self,
        industry: &str,
        city: Option<&str>,
        state: Option<&str>,
        country: Option<&str>,
        max_age_days: i64,
    ) -> Result<Vec<ProfileMetrics>, EngineError>;

    /// Stored baseline for the exact `(industry, location_type, location_value)`
    /// key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on storage failure.
    async fn load_baseline(
        &self,
        industry: &str,
        location_type: LocationType,
        location_value: &str,
    ) -> Result<Option<BenchmarkBaseline>, EngineError>;

    /// Overwrite-by-key persistence of a computed baseline. Idempotent:
    /// storing the same baseline twice leaves the same row.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on storage failure.
    async fn upsert_baseline(&self, baseline: &BenchmarkBaseline) -> Result<(), EngineError>;

    /// Count of scope members matching `industry` whose `(followers,
    /// engagement_rate)` strictly dominates the given pair: followers
    /// greater, or followers equal and engagement greater.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on storage failure.
    async fn count_dominating(
        &self,
        scope: RankScope,
        industry: &str,
        location_value: &str,
        followers: i64,
        engagement_rate: f64,
    ) -> Result<i64, EngineError>;

    /// Count of scope members matching `industry` and the scope's location.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on storage failure.
    async fn count_in_scope(
        &self,
        scope: RankScope,
        industry: &str,
        location_value: &str,
    ) -> Result<i64, EngineError>;
}

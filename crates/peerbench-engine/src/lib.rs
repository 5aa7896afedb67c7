//! Benchmark & scoring engine for social-account metrics.
//!
//! Given a profile's metrics and a target segment, the engine resolves the
//! segment's statistical baseline (cache or fresh aggregation), computes
//! percentile positions within the baseline's raw distributions, ranks the
//! profile within its geographic scopes, combines everything into a single
//! weighted 0-100 score, and derives threshold-based insights.
//!
//! The engine is stateless per invocation and reaches the outside world
//! only through the [`MetricsStore`] trait.

pub mod analyze;
pub mod benchmark;
pub mod error;
pub mod insights;
pub mod rank;
pub mod score;
pub mod stats;
pub mod store;
pub mod types;

pub use analyze::analyze;
pub use benchmark::{BenchmarkResolver, BASELINE_TTL_HOURS, CORPUS_MAX_AGE_DAYS};
pub use error::EngineError;
pub use insights::generate_insights;
pub use rank::rank_profile;
pub use score::overall_score;
pub use store::MetricsStore;
pub use types::{
    AnalysisReport, BenchmarkBaseline, Distribution, Insight, InsightCategory, InsightKind,
    LocationType, ProfileMetrics, RankResult, RankScope, Rankings, ScoreResult, Segment,
};

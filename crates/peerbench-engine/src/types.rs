use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one account's metrics.
///
/// Produced by the scrape pipeline or a cached record; the engine only
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    pub followers: i64,
    /// Percentage with two-decimal precision, e.g. `3.25` for 3.25%.
    pub engagement_rate: f64,
    /// Posts per week.
    pub post_frequency: f64,
    /// Share of recent posts that are reels, 0-100.
    pub reel_percentage: i16,
}

/// Peer-population key: an industry plus optional location filters.
///
/// Location fields are OR-filters when the peer corpus is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub industry: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Ordered sequence of raw numeric samples.
///
/// Semantically a multiset: duplicates and stored order carry no meaning
/// beyond their statistical content. Serializes as a plain JSON array,
/// independent of any storage encoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution(Vec<f64>);

impl Distribution {
    #[must_use]
    pub fn new(samples: Vec<f64>) -> Self {
        Self(samples)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Distribution {
    fn from(samples: Vec<f64>) -> Self {
        Self(samples)
    }
}

/// Granularity at which a baseline row is keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    City,
    State,
    Country,
    Global,
}

impl LocationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LocationType::City => "city",
            LocationType::State => "state",
            LocationType::Country => "country",
            LocationType::Global => "global",
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-segment aggregate the engine benchmarks a profile against.
///
/// Keyed uniquely by `(industry, location_type, location_value)`. A
/// `sample_size` of zero marks a degraded baseline built from the industry
/// defaults table: no distributions, percentiles unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkBaseline {
    pub industry: String,
    pub location_type: LocationType,
    pub location_value: String,
    pub avg_followers: f64,
    pub avg_engagement: f64,
    pub avg_post_frequency: f64,
    pub avg_reel_percentage: f64,
    pub follower_distribution: Distribution,
    pub engagement_distribution: Distribution,
    pub sample_size: i64,
    pub last_calculated: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Geographic scope a rank is computed within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankScope {
    City,
    State,
    National,
}

impl RankScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RankScope::City => "city",
            RankScope::State => "state",
            RankScope::National => "national",
        }
    }

    /// Reported scope size when the corpus has no stored members in scope,
    /// so an empty leaderboard never reads as "rank 1 of 1".
    #[must_use]
    pub const fn fallback_total(self) -> i64 {
        match self {
            RankScope::City => 1_000,
            RankScope::State => 5_000,
            RankScope::National => 50_000,
        }
    }
}

impl std::fmt::Display for RankScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal leaderboard position within one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankResult {
    /// 1-based; ties broken by followers desc, then engagement desc.
    pub rank: i64,
    pub total: i64,
}

/// Ranks across all nested geographic scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rankings {
    pub city: RankResult,
    pub state: RankResult,
    pub national: RankResult,
}

/// Combined scoring output, all values 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall: u8,
    pub follower_percentile: u8,
    pub engagement_percentile: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Engagement,
    Frequency,
    Content,
    Overall,
}

/// One advisory message derived from threshold comparisons.
///
/// Purely derived output; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub category: InsightCategory,
    pub message: String,
    pub recommendation: String,
}

/// Full output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub profile: ProfileMetrics,
    pub score: ScoreResult,
    pub benchmarks: BenchmarkBaseline,
    pub rankings: Rankings,
    pub insights: Vec<Insight>,
}

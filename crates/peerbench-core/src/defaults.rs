use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Industry key used when no specific row matches.
pub const DEFAULT_INDUSTRY_KEY: &str = "default";

/// Segment averages served when a peer corpus is empty.
///
/// Only the three ratio-bearing averages are carried; a defaults row never
/// has distributions or a sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryAverages {
    pub avg_followers: f64,
    pub avg_engagement: f64,
    pub avg_post_frequency: f64,
}

/// Immutable per-industry defaults table.
///
/// Built from the compiled-in table or from a YAML override file, then
/// injected into the benchmark resolver at construction. Lookups are by
/// lowercase industry name and always succeed: unknown industries get the
/// `default` row.
#[derive(Debug, Clone)]
pub struct IndustryDefaults {
    rows: HashMap<String, IndustryAverages>,
    fallback: IndustryAverages,
}

const BUILTIN_ROWS: &[(&str, IndustryAverages)] = &[
    (
        "fitness",
        IndustryAverages {
            avg_followers: 12_000.0,
            avg_engagement: 3.5,
            avg_post_frequency: 5.5,
        },
    ),
    (
        "beauty",
        IndustryAverages {
            avg_followers: 18_000.0,
            avg_engagement: 2.8,
            avg_post_frequency: 6.0,
        },
    ),
    (
        "health",
        IndustryAverages {
            avg_followers: 10_000.0,
            avg_engagement: 3.2,
            avg_post_frequency: 4.5,
        },
    ),
    (
        "fashion",
        IndustryAverages {
            avg_followers: 25_000.0,
            avg_engagement: 2.5,
            avg_post_frequency: 6.5,
        },
    ),
    (
        "food",
        IndustryAverages {
            avg_followers: 15_000.0,
            avg_engagement: 3.8,
            avg_post_frequency: 5.0,
        },
    ),
    (
        "business",
        IndustryAverages {
            avg_followers: 8_000.0,
            avg_engagement: 2.2,
            avg_post_frequency: 3.5,
        },
    ),
];

/// Catch-all row for industries without a dedicated entry.
const BUILTIN_FALLBACK: IndustryAverages = IndustryAverages {
    avg_followers: 15_000.0,
    avg_engagement: 3.0,
    avg_post_frequency: 5.0,
};

impl IndustryDefaults {
    /// The compiled-in defaults table.
    #[must_use]
    pub fn builtin() -> Self {
        let rows = BUILTIN_ROWS
            .iter()
            .map(|(industry, averages)| ((*industry).to_string(), *averages))
            .collect();
        Self {
            rows,
            fallback: BUILTIN_FALLBACK,
        }
    }

    /// Load a defaults table from a YAML file mapping industry name to averages.
    ///
    /// The file must contain a `default` row; it replaces the compiled-in
    /// catch-all. All keys are lowercased on load.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or if the
    /// `default` row is missing or any average is not a positive number.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::DefaultsFileIo {
                path: path.display().to_string(),
                source: e,
            })?;
        let raw: HashMap<String, IndustryAverages> =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::DefaultsFileParse {
                path: path.display().to_string(),
                source: e,
            })?;

        let mut rows: HashMap<String, IndustryAverages> = raw
            .into_iter()
            .map(|(industry, averages)| (industry.to_lowercase(), averages))
            .collect();

        for (industry, averages) in &rows {
            validate_averages(industry, *averages)?;
        }

        let fallback = rows.remove(DEFAULT_INDUSTRY_KEY).ok_or_else(|| {
            ConfigError::Validation(format!(
                "defaults file must contain a '{DEFAULT_INDUSTRY_KEY}' row"
            ))
        })?;

        Ok(Self { rows, fallback })
    }

    /// Averages for `industry`, falling back to the `default` row.
    #[must_use]
    pub fn lookup(&self, industry: &str) -> IndustryAverages {
        self.rows
            .get(&industry.to_lowercase())
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for IndustryDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_averages(industry: &str, averages: IndustryAverages) -> Result<(), ConfigError> {
    let positive = |name: &str, value: f64| -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Validation(format!(
                "industry '{industry}': {name} must be a positive number, got {value}"
            )))
        }
    };
    positive("avg_followers", averages.avg_followers)?;
    positive("avg_engagement", averages.avg_engagement)?;
    positive("avg_post_frequency", averages.avg_post_frequency)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_fallback_row_matches_documented_values() {
        let defaults = IndustryDefaults::builtin();
        let row = defaults.lookup("kayaking");
        assert_eq!(row.avg_followers, 15_000.0);
        assert_eq!(row.avg_engagement, 3.0);
        assert_eq!(row.avg_post_frequency, 5.0);
    }

    #[test]
    fn builtin_covers_all_named_industries() {
        let defaults = IndustryDefaults::builtin();
        for industry in ["fitness", "beauty", "health", "fashion", "food", "business"] {
            let row = defaults.lookup(industry);
            assert!(
                row != BUILTIN_FALLBACK,
                "expected dedicated row for '{industry}', got the fallback"
            );
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let defaults = IndustryDefaults::builtin();
        assert_eq!(defaults.lookup("Fitness"), defaults.lookup("fitness"));
    }

    #[test]
    fn load_replaces_builtin_rows() {
        let dir = std::env::temp_dir().join("peerbench-defaults-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("defaults.yaml");
        std::fs::write(
            &path,
            "default:\n  avg_followers: 1000\n  avg_engagement: 1.5\n  avg_post_frequency: 2\n\
             surfing:\n  avg_followers: 9000\n  avg_engagement: 4.1\n  avg_post_frequency: 3\n",
        )
        .unwrap();

        let defaults = IndustryDefaults::load(&path).unwrap();
        assert_eq!(defaults.lookup("surfing").avg_followers, 9000.0);
        assert_eq!(defaults.lookup("anything-else").avg_engagement, 1.5);
    }

    #[test]
    fn load_rejects_missing_default_row() {
        let dir = std::env::temp_dir().join("peerbench-defaults-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("no-default.yaml");
        std::fs::write(
            &path,
            "surfing:\n  avg_followers: 9000\n  avg_engagement: 4.1\n  avg_post_frequency: 3\n",
        )
        .unwrap();

        let err = IndustryDefaults::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn load_rejects_non_positive_averages() {
        let dir = std::env::temp_dir().join("peerbench-defaults-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad-average.yaml");
        std::fs::write(
            &path,
            "default:\n  avg_followers: 0\n  avg_engagement: 1.5\n  avg_post_frequency: 2\n",
        )
        .unwrap();

        let err = IndustryDefaults::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}

use serde::{Deserialize, Serialize};

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Busy timeout applied to every connection. This is the request-level
    /// bound on the roster and schedule reads.
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
        }
    }
}

/// Bucket labels used by the location breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Person has no location reference at all.
    pub unassigned_location: String,
    /// Person references a location that does not resolve.
    pub unknown_location: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            unassigned_location: "Unassigned".into(),
            unknown_location: "Unknown".into(),
        }
    }
}

/// Sizes for the deterministic demo organisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub lines_of_business: usize,
    pub processes: usize,
    pub locations: usize,
    pub people_per_process: usize,
    pub batches_per_process: usize,
    /// Chance a person already has a scheduled last working day.
    pub attrition_probability: f64,
    /// Chance a person is still in training.
    pub trainee_share: f64,
    pub max_batch_capacity: i64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            lines_of_business: 2,
            processes: 5,
            locations: 3,
            people_per_process: 40,
            batches_per_process: 2,
            attrition_probability: 0.08,
            trainee_share: 0.25,
            max_batch_capacity: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub store: StoreConfig,
    pub labels: LabelConfig,
    pub demo: DemoConfig,
}

impl AnalyticsConfig {
    /// Load from `{data_dir}/analytics.json`. Missing sections fall back to defaults.
    /// In tests, use AnalyticsConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/analytics.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: AnalyticsConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// Config with hardcoded defaults and a small demo for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            store: StoreConfig {
                busy_timeout_ms: 1_000,
            },
            labels: LabelConfig::default(),
            demo: DemoConfig {
                lines_of_business: 2,
                processes: 3,
                locations: 2,
                people_per_process: 12,
                batches_per_process: 1,
                attrition_probability: 0.2,
                trainee_share: 0.25,
                max_batch_capacity: 6,
            },
        }
    }
}

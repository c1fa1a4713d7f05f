use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SeedError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Shape and size of a generated data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Reference "current time"; every generated timestamp is at or before it.
    #[serde(default = "default_now")]
    pub now: jiff::Timestamp,
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    #[serde(default = "default_candidates")]
    pub candidates: usize,
    #[serde(default = "default_assessments")]
    pub assessments: usize,
    #[serde(default = "default_questions")]
    pub questions_per_assessment: usize,
    #[serde(default = "default_min_assignments")]
    pub min_assignments: usize,
    #[serde(default = "default_max_assignments")]
    pub max_assignments: usize,
    /// Probability that an assigned candidate has submitted a response.
    #[serde(default = "default_response_rate")]
    pub response_rate: f64,
}

fn default_seed() -> u64 {
    42
}

fn default_now() -> jiff::Timestamp {
    jiff::Timestamp::from_second(1_761_523_200).unwrap_or(jiff::Timestamp::UNIX_EPOCH)
}

fn default_jobs() -> usize {
    50
}

fn default_candidates() -> usize {
    2000
}

fn default_assessments() -> usize {
    3
}

fn default_questions() -> usize {
    12
}

fn default_min_assignments() -> usize {
    20
}

fn default_max_assignments() -> usize {
    150
}

fn default_response_rate() -> f64 {
    0.6
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            seed: default_seed(),
            now: default_now(),
            jobs: default_jobs(),
            candidates: default_candidates(),
            assessments: default_assessments(),
            questions_per_assessment: default_questions(),
            min_assignments: default_min_assignments(),
            max_assignments: default_max_assignments(),
            response_rate: default_response_rate(),
        }
    }
}

impl SeedConfig {
    /// Reject configs that cannot produce a consistent data set.
    pub fn check(&self) -> Result<(), SeedError> {
        if self.jobs == 0 && (self.candidates > 0 || self.assessments > 0) {
            return Err(SeedError::InvalidConfig(
                "candidates and assessments need at least one job".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.response_rate) {
            return Err(SeedError::InvalidConfig(format!(
                "response_rate {} is outside [0, 1]",
                self.response_rate
            )));
        }
        if self.min_assignments > self.max_assignments {
            return Err(SeedError::InvalidConfig(format!(
                "min_assignments {} is greater than max_assignments {}",
                self.min_assignments, self.max_assignments
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<SeedConfig, SeedError> {
    let contents = std::fs::read_to_string(path)?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: SeedConfig = serde_json::from_value(migrated)?;
    config.check()?;
    tracing::debug!(path = %path.display(), seed = config.seed, "seed config loaded");
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, SeedError> {
    if from_version > CURRENT_VERSION {
        return Err(SeedError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: `questions` was renamed to `questions_per_assessment`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| SeedError::InvalidConfig("config is not a JSON object".to_string()))?;
        if let Some(questions) = obj.remove("questions") {
            obj.entry("questions_per_assessment").or_insert(questions);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated seed config v0 → v1 (renamed questions)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &SeedConfig) -> Result<(), SeedError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "seed config saved");
    Ok(())
}

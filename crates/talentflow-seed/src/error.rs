use thiserror::Error;

use talentflow_assessments::error::SchemaError;
use talentflow_core::error::CoreError;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("timestamp out of range: {0}")]
    Time(#[from] jiff::Error),

    #[error("generated question is invalid: {0}")]
    Core(#[from] CoreError),

    #[error("generated assessment is invalid: {0}")]
    Schema(#[from] SchemaError),
}

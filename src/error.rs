use crate::time::TimeGranularity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Unsupported time unit: {0}")]
    UnsupportedGranularity(TimeGranularity),

    #[error("cannot remove {removed} data from an average over {count}")]
    RemovalExceedsCount { removed: u64, count: u64 },

    #[error("invalid window configuration: {0}")]
    Config(#[from] serde_json::Error),
}

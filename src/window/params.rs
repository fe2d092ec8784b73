use crate::error::StatsError;
use crate::time::TimeGranularity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_granularity() -> TimeGranularity {
    TimeGranularity::Hours
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WindowParams {
    #[serde(default = "default_granularity")]
    #[schemars(
        title = "Window",
        description = "Length of the trailing window. Buckets use the next finer unit.",
        default = "default_granularity"
    )]
    pub granularity: TimeGranularity,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            granularity: default_granularity(),
        }
    }
}

impl WindowParams {
    pub fn from_json(text: &str) -> Result<Self, StatsError> {
        Ok(serde_json::from_str(text)?)
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Pipeline execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Deadline for a whole evaluation run, in milliseconds.
    pub timeout_ms: u64,
}

impl PipelineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout_ms: defaults::DEFAULT_PIPELINE_TIMEOUT_SECS * 1000,
        }
    }
}

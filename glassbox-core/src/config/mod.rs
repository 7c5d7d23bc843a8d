//! Configuration for every subsystem, loadable from TOML.
//! Every section defaults field-by-field, so partial documents are valid.

pub mod decision_config;
pub mod defaults;
pub mod evidence_config;
pub mod observability_config;
pub mod orchestration_config;
pub mod pipeline_config;
pub mod scoring_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use decision_config::{BiasConfig, DecisionConfig};
pub use evidence_config::EvidenceConfig;
pub use observability_config::ObservabilityConfig;
pub use orchestration_config::OrchestrationConfig;
pub use pipeline_config::PipelineConfig;
pub use scoring_config::ScoringConfig;

use crate::errors::{GlassBoxError, GlassBoxResult};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlassBoxConfig {
    pub evidence: EvidenceConfig,
    pub orchestration: OrchestrationConfig,
    pub scoring: ScoringConfig,
    pub decision: DecisionConfig,
    pub bias: BiasConfig,
    pub pipeline: PipelineConfig,
    pub observability: ObservabilityConfig,
}

impl GlassBoxConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(toml_str: &str) -> GlassBoxResult<Self> {
        toml::from_str(toml_str).map_err(|e| GlassBoxError::ConfigError(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> GlassBoxResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GlassBoxError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }
}

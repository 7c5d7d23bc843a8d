use serde::{Deserialize, Serialize};

use super::defaults;

/// Module playlist configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestrationConfig {
    /// Pre-normalisation weight shared by all domain modules of the primary domain.
    pub domain_weight_budget: f64,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            domain_weight_budget: defaults::DEFAULT_DOMAIN_WEIGHT_BUDGET,
        }
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Evidence processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Per-source-type authority overrides. Key is the source type (e.g. `stripe_api`).
    pub authority_overrides: HashMap<String, f64>,
    /// Per-metric recency decay τ overrides (days).
    pub recency_tau_overrides: HashMap<String, u64>,
    /// Second-best claim weight ratio above which a metric is contested.
    pub conflict_threshold: f64,
    /// Consistency component assigned before any conflict check.
    pub default_consistency: f64,
    /// Consistency subtracted from every item of a contested metric.
    pub consistency_penalty: f64,
    /// Consistency never drops below this floor.
    pub consistency_floor: f64,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            authority_overrides: HashMap::new(),
            recency_tau_overrides: HashMap::new(),
            conflict_threshold: defaults::DEFAULT_CONFLICT_THRESHOLD,
            default_consistency: defaults::DEFAULT_CONSISTENCY,
            consistency_penalty: defaults::DEFAULT_CONSISTENCY_PENALTY,
            consistency_floor: defaults::DEFAULT_CONSISTENCY_FLOOR,
        }
    }
}

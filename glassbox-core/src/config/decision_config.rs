use serde::{Deserialize, Serialize};

use super::defaults;

/// Decision thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    pub invest_score: f64,
    pub invest_confidence: f64,
    pub monitor_score: f64,
    pub monitor_confidence: f64,
    /// Modules scoring above this are listed as strengths.
    pub strength_threshold: f64,
    /// Modules scoring below this (but above zero) are listed as concerns.
    pub concern_threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            invest_score: defaults::DEFAULT_INVEST_SCORE,
            invest_confidence: defaults::DEFAULT_INVEST_CONFIDENCE,
            monitor_score: defaults::DEFAULT_MONITOR_SCORE,
            monitor_confidence: defaults::DEFAULT_MONITOR_CONFIDENCE,
            strength_threshold: defaults::DEFAULT_STRENGTH_THRESHOLD,
            concern_threshold: defaults::DEFAULT_CONCERN_THRESHOLD,
        }
    }
}

/// Bias analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasConfig {
    /// Absolute overall-score shift at which a feature category is flagged.
    pub flag_threshold: f64,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            flag_threshold: defaults::DEFAULT_BIAS_FLAG_THRESHOLD,
        }
    }
}

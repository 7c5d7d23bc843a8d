use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Confidence multiplier applied to model-based signals.
    pub ml_confidence_multiplier: f64,
    /// Confidence used when a metric has no evidence-backed confidence.
    pub fallback_metric_confidence: f64,
    /// Confidence reported when a formula could not be evaluated.
    pub error_confidence: f64,
    /// Maximum penalty a single regulatory risk can apply.
    pub regulatory_risk_cap: f64,
    /// Maximum penalty a single market risk can apply.
    pub market_risk_cap: f64,
    /// Gross margin (%) benchmark for industries without an explicit entry.
    pub default_gross_margin_benchmark: f64,
    /// Whether assessed risks penalise module scores before aggregation.
    pub apply_risk_adjustment: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ml_confidence_multiplier: defaults::DEFAULT_ML_CONFIDENCE_MULTIPLIER,
            fallback_metric_confidence: defaults::DEFAULT_FALLBACK_METRIC_CONFIDENCE,
            error_confidence: defaults::DEFAULT_ERROR_CONFIDENCE,
            regulatory_risk_cap: defaults::DEFAULT_REGULATORY_RISK_CAP,
            market_risk_cap: defaults::DEFAULT_MARKET_RISK_CAP,
            default_gross_margin_benchmark: defaults::DEFAULT_GROSS_MARGIN_BENCHMARK,
            apply_risk_adjustment: defaults::DEFAULT_APPLY_RISK_ADJUSTMENT,
        }
    }
}

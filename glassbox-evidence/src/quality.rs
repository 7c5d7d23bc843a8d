//! Source Quality Score (SQS) component calculation.

use chrono::{DateTime, Utc};

use glassbox_core::config::defaults::{DEFAULT_AUTHORITY, DEFAULT_RECENCY_TAU_DAYS};
use glassbox_core::config::EvidenceConfig;
use glassbox_core::constants::MAX_CROSS_REFERENCES;
use glassbox_core::models::SqsComponents;

use crate::grading;

/// Recency decay τ in days for a metric, before config overrides.
pub fn default_recency_tau(metric: &str) -> u64 {
    match metric {
        "revenue" | "arr" | "ltv" => 90,
        "mrr" | "burn_rate" | "regulatory" | "churn_rate" => 30,
        "cash_balance" => 14,
        "headcount" | "cac" => 60,
        "market_size" => 180,
        "competition" => 120,
        "delivery_sla" => 7,
        _ => DEFAULT_RECENCY_TAU_DAYS,
    }
}

/// Everything besides source type and timestamp that affects quality.
#[derive(Debug, Clone, Copy)]
pub struct QualityContext {
    pub now: DateTime<Utc>,
    /// Other independent sources agreeing with this claim.
    pub cross_references: usize,
    /// Primary source (1.0 directness) vs derivative (0.6).
    pub is_primary: bool,
    pub license_valid: bool,
}

impl QualityContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            cross_references: 0,
            is_primary: true,
            license_valid: true,
        }
    }
}

/// Computes the six SQS components from config-adjusted tables.
#[derive(Debug, Clone, Default)]
pub struct SourceQualityScorer {
    config: EvidenceConfig,
}

impl SourceQualityScorer {
    pub fn new(config: EvidenceConfig) -> Self {
        Self { config }
    }

    pub fn authority(&self, source_type: &str) -> f64 {
        self.config
            .authority_overrides
            .get(source_type)
            .copied()
            .or_else(|| grading::default_authority(source_type))
            .unwrap_or(DEFAULT_AUTHORITY)
    }

    pub fn recency_tau(&self, metric: &str) -> u64 {
        self.config
            .recency_tau_overrides
            .get(metric)
            .copied()
            .unwrap_or_else(|| default_recency_tau(metric))
            .max(1)
    }

    /// `exp(-days_old / τ)`. Future timestamps count as fresh.
    pub fn freshness(&self, timestamp: DateTime<Utc>, metric: &str, now: DateTime<Utc>) -> f64 {
        let days_old = (now - timestamp).num_days().max(0) as f64;
        (-days_old / self.recency_tau(metric) as f64).exp()
    }

    /// `min(1, 0.3 + 0.7 × refs / 5)`.
    pub fn independence(cross_references: usize) -> f64 {
        let refs = cross_references.min(MAX_CROSS_REFERENCES) as f64;
        (0.3 + 0.7 * refs / MAX_CROSS_REFERENCES as f64).min(1.0)
    }

    pub fn components(
        &self,
        source_type: &str,
        timestamp: DateTime<Utc>,
        metric: &str,
        ctx: &QualityContext,
    ) -> SqsComponents {
        SqsComponents::new(
            self.authority(source_type),
            self.freshness(timestamp, metric, ctx.now),
            Self::independence(ctx.cross_references),
            if ctx.is_primary { 1.0 } else { 0.6 },
            self.config.default_consistency,
            if ctx.license_valid { 1.0 } else { 0.3 },
        )
    }
}

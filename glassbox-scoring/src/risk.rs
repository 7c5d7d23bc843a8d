//! Risk penalties applied to scores after benchmark adjustment.

use glassbox_core::config::ScoringConfig;
use glassbox_core::models::{Risk, RiskCategory};

/// Subtracts `severity × likelihood × cap` per regulatory and market risk,
/// never going below zero. Other categories carry no score penalty.
#[derive(Debug, Clone, Copy)]
pub struct RiskAdjuster {
    regulatory_cap: f64,
    market_cap: f64,
}

impl Default for RiskAdjuster {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl RiskAdjuster {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            regulatory_cap: config.regulatory_risk_cap,
            market_cap: config.market_risk_cap,
        }
    }

    pub fn cap(&self, category: RiskCategory) -> Option<f64> {
        match category {
            RiskCategory::Regulatory => Some(self.regulatory_cap),
            RiskCategory::Market => Some(self.market_cap),
            _ => None,
        }
    }

    /// Regulatory penalties first, then market. Returns the adjusted score
    /// and one line per penalty applied.
    pub fn adjust(&self, score: f64, risks: &[Risk]) -> (f64, Vec<String>) {
        let mut adjusted = score;
        let mut notes = Vec::new();
        for category in [RiskCategory::Regulatory, RiskCategory::Market] {
            let Some(cap) = self.cap(category) else {
                continue;
            };
            for risk in risks.iter().filter(|r| r.category == category) {
                let penalty = risk.exposure() * cap;
                adjusted = (adjusted - penalty).max(0.0);
                notes.push(format!(
                    "{} risk penalty: -{penalty:.1} ({})",
                    capitalize(category.as_str()),
                    risk.description
                ));
            }
        }
        (adjusted, notes)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

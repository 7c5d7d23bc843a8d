use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::benchmark::BenchmarkComparison;
use crate::errors::FormulaError;

/// Formula family. ML signals carry a lower confidence multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaKind {
    Deterministic,
    MlSignal,
}

/// Model-based signals served by an [`crate::traits::IScoringSignalProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    TeamCredibility,
    MarketSentiment,
    ProductDifferentiation,
}

impl SignalKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TeamCredibility => "team_credibility",
            Self::MarketSentiment => "market_sentiment",
            Self::ProductDifferentiation => "product_differentiation",
        }
    }
}

/// Named numeric inputs to a formula.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaInputs {
    pub values: BTreeMap<String, f64>,
    pub labels: BTreeMap<String, String>,
}

impl FormulaInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a numeric input.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Builder-style insert of a text input (e.g. the industry).
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    /// A finite input that must be present.
    pub fn require(&self, formula: &str, name: &str) -> Result<f64, FormulaError> {
        match self.get(name) {
            None => Err(FormulaError::MissingInput {
                formula: formula.to_string(),
                input: name.to_string(),
            }),
            Some(v) if !v.is_finite() => Err(FormulaError::NonFinite {
                formula: formula.to_string(),
                input: name.to_string(),
            }),
            Some(v) => Ok(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.labels.is_empty()
    }
}

/// A formula result: score in [0, 10] plus a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaOutcome {
    pub score: f64,
    pub explanation: String,
}

impl FormulaOutcome {
    /// Clamps the score into [0, 10].
    pub fn new(score: f64, explanation: impl Into<String>) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, crate::constants::MAX_SCORE)
        } else {
            0.0
        };
        Self {
            score,
            explanation: explanation.into(),
        }
    }

    /// Zero score explaining why the formula could not be evaluated.
    pub fn sentinel(error: &FormulaError) -> Self {
        Self {
            score: 0.0,
            explanation: error.to_string(),
        }
    }
}

/// How a metric or module score was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: f64,
    pub confidence: f64,
    /// Component scores: by formula id for a metric, by metric name for a module.
    pub components: BTreeMap<String, f64>,
    pub formulas_used: Vec<String>,
    pub benchmark_comparison: Vec<BenchmarkComparison>,
    pub evidence_summary: Vec<String>,
    pub risk_adjustments: Vec<String>,
}

impl ScoreBreakdown {
    /// A zero-score, zero-confidence breakdown carrying a note.
    pub fn empty(note: impl Into<String>) -> Self {
        Self {
            evidence_summary: vec![note.into()],
            ..Self::default()
        }
    }
}

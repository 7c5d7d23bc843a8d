use serde::{Deserialize, Serialize};

use super::metric::Metric;
use super::score::ScoreBreakdown;

/// Whether a module is always included or selected by domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Core,
    Domain,
}

impl ModuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Domain => "domain",
        }
    }
}

/// A weighted bundle of metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationModule {
    pub id: String,
    pub name: String,
    pub kind: ModuleKind,
    pub description: String,
    /// Normalised playlist weight. All modules of an evaluation sum to 1.0.
    pub weight: f64,
    pub metrics: Vec<Metric>,
    pub score: Option<f64>,
    pub confidence: f64,
    /// How the score was produced, set by the scoring stage.
    pub breakdown: Option<ScoreBreakdown>,
}

impl EvaluationModule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ModuleKind,
        description: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: description.into(),
            weight,
            metrics: Vec::new(),
            score: None,
            confidence: 0.0,
            breakdown: None,
        }
    }

    /// Metric-weight-weighted average of metric scores. Pure.
    ///
    /// Unscored metrics are ignored; with none left the score is 0.0.
    pub fn calculate_score(&self) -> f64 {
        let (weighted, total) = self
            .metrics
            .iter()
            .filter_map(|m| m.score.map(|s| (m.weight, s)))
            .fold((0.0, 0.0), |(weighted, total), (w, v)| (weighted + w * v, total + w));
        if total > 0.0 {
            weighted / total
        } else {
            0.0
        }
    }

    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn metric_mut(&mut self, name: &str) -> Option<&mut Metric> {
        self.metrics.iter_mut().find(|m| m.name == name)
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

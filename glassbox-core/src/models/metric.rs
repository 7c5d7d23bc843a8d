use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::evidence::EvidenceItem;

/// Metric category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Financial,
    Market,
    Team,
    Product,
    Risk,
    Traction,
    DomainSpecific,
}

/// A metric value as claimed by evidence or set by an analyst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Normalised key so equal claims group together (`1.20` and `1.2` agree).
    pub fn claim_key(&self) -> String {
        match self {
            Self::Number(n) => format!("{n}"),
            Self::Flag(b) => b.to_string(),
            Self::Text(s) => s.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// An analyst-supplied value that supersedes the evidence-derived one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanOverride {
    pub value: MetricValue,
    pub reason: String,
    pub analyst: String,
    pub overridden_at: DateTime<Utc>,
}

/// A named evaluation metric backed by an ordered list of evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub name: String,
    pub metric_type: MetricType,
    /// Relative weight inside its module, 0.0–1.0.
    pub weight: f64,
    /// Consensus value from conflict resolution.
    pub value: Option<MetricValue>,
    pub confidence: f64,
    /// Formula score in [0, 10], set by the scoring stage.
    pub score: Option<f64>,
    evidence_items: Vec<EvidenceItem>,
    pub contested: bool,
    pub human_override: Option<HumanOverride>,
}

impl Metric {
    pub fn new(name: impl Into<String>, metric_type: MetricType, weight: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            metric_type,
            weight: weight.clamp(0.0, 1.0),
            value: None,
            confidence: 0.0,
            score: None,
            evidence_items: Vec::new(),
            contested: false,
            human_override: None,
        }
    }

    pub fn evidence_items(&self) -> &[EvidenceItem] {
        &self.evidence_items
    }

    /// Append evidence and recompute confidence.
    pub fn add_evidence(&mut self, evidence: EvidenceItem) {
        self.evidence_items.push(evidence);
        self.refresh_confidence();
    }

    /// Replace evidence items with rescored copies, matched by id.
    /// Items whose id is not present in `rescored` are left untouched.
    pub fn replace_rescored(&mut self, rescored: Vec<EvidenceItem>) {
        for item in rescored {
            if let Some(slot) = self.evidence_items.iter_mut().find(|e| e.id == item.id) {
                *slot = item;
            }
        }
        self.refresh_confidence();
    }

    /// Evidence-weighted average of extraction confidences. Pure.
    pub fn calculate_confidence(&self) -> f64 {
        let (weighted, total) = self
            .evidence_items
            .iter()
            .fold((0.0, 0.0), |(weighted, total), e| {
                let w = e.weight();
                (weighted + w * e.extraction_confidence, total + w)
            });
        if total > 0.0 {
            (weighted / total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Store [`Metric::calculate_confidence`] on the metric.
    pub fn refresh_confidence(&mut self) -> f64 {
        self.confidence = self.calculate_confidence();
        self.confidence
    }

    /// Supersede the derived value with an analyst decision.
    pub fn apply_override(
        &mut self,
        value: MetricValue,
        reason: impl Into<String>,
        analyst: impl Into<String>,
    ) {
        self.human_override = Some(HumanOverride {
            value,
            reason: reason.into(),
            analyst: analyst.into(),
            overridden_at: Utc::now(),
        });
    }

    /// Override if present, otherwise the consensus value.
    pub fn effective_value(&self) -> Option<&MetricValue> {
        self.human_override
            .as_ref()
            .map(|o| &o.value)
            .or(self.value.as_ref())
    }
}

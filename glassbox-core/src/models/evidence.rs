use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metric::MetricValue;
use crate::constants::{GRADE_WEIGHT_E1, GRADE_WEIGHT_E2, GRADE_WEIGHT_E3, SQS_WEIGHTS};

/// Evidence quality grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvidenceGrade {
    /// Self-reported (deck, founder docs).
    E1,
    /// Public or third-party (news, patents, app stores).
    E2,
    /// Verified (OAuth APIs, licensed databases).
    E3,
}

impl EvidenceGrade {
    pub const ALL: [EvidenceGrade; 3] = [Self::E1, Self::E2, Self::E3];

    /// Multiplier applied to the SQS when weighting evidence.
    pub fn weight(self) -> f64 {
        match self {
            Self::E1 => GRADE_WEIGHT_E1,
            Self::E2 => GRADE_WEIGHT_E2,
            Self::E3 => GRADE_WEIGHT_E3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::E1 => "E1",
            Self::E2 => "E2",
            Self::E3 => "E3",
        }
    }
}

/// The six Source Quality Score components, each in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SqsComponents {
    pub authority: f64,
    pub freshness: f64,
    pub independence: f64,
    pub directness: f64,
    pub consistency: f64,
    pub legal: f64,
}

impl SqsComponents {
    /// Build components, clamping each to [0.0, 1.0]. Non-finite values become 0.0.
    pub fn new(
        authority: f64,
        freshness: f64,
        independence: f64,
        directness: f64,
        consistency: f64,
        legal: f64,
    ) -> Self {
        Self {
            authority: unit(authority),
            freshness: unit(freshness),
            independence: unit(independence),
            directness: unit(directness),
            consistency: unit(consistency),
            legal: unit(legal),
        }
    }

    /// Weighted sum with the fixed SQS weights.
    pub fn sqs(&self) -> f64 {
        let [a, f, i, d, c, l] = SQS_WEIGHTS;
        a * self.authority
            + f * self.freshness
            + i * self.independence
            + d * self.directness
            + c * self.consistency
            + l * self.legal
    }
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A single graded, scored piece of evidence supporting a metric.
///
/// Immutable once scored: a consistency change produces a rescored copy
/// via [`EvidenceItem::with_consistency`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: String,
    /// Reference to the source document section or API call.
    pub source_ref: String,
    /// Recognised source type (e.g. `stripe_api`, `crunchbase`, `pitch_deck`).
    pub source_type: String,
    pub grade: EvidenceGrade,
    components: SqsComponents,
    source_quality: f64,
    pub extraction_confidence: f64,
    /// Metric name this evidence was extracted for, when known.
    pub metric_hint: Option<String>,
    /// The value this evidence claims for its metric.
    pub claimed_value: Option<MetricValue>,
    pub snippet: Option<String>,
    pub page_ref: Option<String>,
    pub license: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Unscored inputs to [`EvidenceItem::scored`].
#[derive(Debug, Clone)]
pub struct EvidenceDraft {
    pub source_ref: String,
    pub source_type: String,
    pub grade: EvidenceGrade,
    pub extraction_confidence: f64,
    pub metric_hint: Option<String>,
    pub claimed_value: Option<MetricValue>,
    pub snippet: Option<String>,
    pub page_ref: Option<String>,
    pub license: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl EvidenceItem {
    /// Construct and score an evidence item in one step.
    pub fn scored(draft: EvidenceDraft, components: SqsComponents) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_ref: draft.source_ref,
            source_type: draft.source_type,
            grade: draft.grade,
            source_quality: components.sqs(),
            components,
            extraction_confidence: unit(draft.extraction_confidence),
            metric_hint: draft.metric_hint,
            claimed_value: draft.claimed_value,
            snippet: draft.snippet,
            page_ref: draft.page_ref,
            license: draft.license,
            timestamp: draft.timestamp,
        }
    }

    pub fn components(&self) -> &SqsComponents {
        &self.components
    }

    /// Source Quality Score, always equal to `components().sqs()`.
    pub fn source_quality(&self) -> f64 {
        self.source_quality
    }

    /// Evidence weight `w = grade × SQS × coverage × recency`.
    pub fn evidence_weight(&self, coverage: f64, recency_factor: f64) -> f64 {
        self.grade.weight() * self.source_quality * coverage * recency_factor
    }

    /// Evidence weight with full coverage and no extra recency factor.
    pub fn weight(&self) -> f64 {
        self.evidence_weight(1.0, 1.0)
    }

    /// A rescored copy with a new consistency component. Keeps the id.
    pub fn with_consistency(&self, consistency: f64) -> Self {
        let mut components = self.components;
        components.consistency = unit(consistency);
        Self {
            components,
            source_quality: components.sqs(),
            ..self.clone()
        }
    }

    /// Key used to group evidence that makes the same claim.
    pub fn claim_key(&self) -> String {
        match (&self.claimed_value, &self.snippet) {
            (Some(value), _) => value.claim_key(),
            (None, Some(snippet)) => snippet.trim().to_lowercase(),
            (None, None) => String::new(),
        }
    }
}

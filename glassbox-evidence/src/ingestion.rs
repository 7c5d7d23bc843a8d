//! Raw observations extracted from documents and external payloads.
//!
//! Observations are not yet evidence: cross-references can only be counted
//! once every source has been read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use glassbox_core::models::{
    Company, Document, DocumentIntake, DocumentKind, EvidenceGrade, ExternalPayload, MetricValue,
};

use crate::grading;

/// Source type for data entered directly on the company record.
pub const COMPANY_PROFILE_SOURCE: &str = "company_website";

/// One `(metric, value)` claim from one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub metric_name: String,
    pub value: MetricValue,
    pub source_type: String,
    pub source_ref: String,
    pub snippet: String,
    pub page_ref: Option<String>,
    pub extraction_confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub is_primary: bool,
    pub license_valid: bool,
}

impl Observation {
    pub fn grade(&self) -> EvidenceGrade {
        grading::grade(&self.source_type)
    }
}

/// `"burn rate: 150000"`. Snippets are what metric keywords match against.
pub fn snippet_for(metric_name: &str, value: &MetricValue) -> String {
    format!("{}: {}", metric_name.replace('_', " "), value)
}

fn document_confidence(kind: DocumentKind) -> f64 {
    match kind {
        DocumentKind::FinancialStatement => 0.95,
        DocumentKind::PitchDeck => 0.8,
        DocumentKind::BusinessPlan => 0.7,
        DocumentKind::Other => 0.6,
    }
}

fn from_intake(
    intake: &DocumentIntake,
    owner: &str,
    source_type: &str,
    extraction_confidence: f64,
    timestamp: DateTime<Utc>,
) -> Vec<Observation> {
    let mut intake = intake.clone();
    for dropped in intake.sanitize() {
        warn!(source = owner, error = %dropped, "dropping malformed intake field");
    }

    intake
        .financial_claims()
        .into_iter()
        .chain(intake.market_claims())
        .map(|(metric, value)| {
            let value = MetricValue::Number(value);
            Observation {
                metric_name: metric.to_string(),
                snippet: snippet_for(metric, &value),
                value,
                source_type: source_type.to_string(),
                source_ref: format!("{owner}#{metric}"),
                page_ref: Some(metric.to_string()),
                extraction_confidence,
                timestamp,
                is_primary: true,
                license_valid: true,
            }
        })
        .collect()
}

/// Observations from one parsed document.
pub fn from_document(document: &Document) -> Vec<Observation> {
    from_intake(
        &document.intake,
        &document.id,
        document.kind.source_type(),
        document_confidence(document.kind),
        document.uploaded_at,
    )
}

/// Observations from the company record and every attached document.
pub fn from_company(company: &Company, now: DateTime<Utc>) -> Vec<Observation> {
    let mut observations = from_intake(
        &company.intake,
        &company.id,
        COMPANY_PROFILE_SOURCE,
        document_confidence(DocumentKind::Other),
        now,
    );
    for document in &company.documents {
        observations.extend(from_document(document));
    }
    observations
}

/// Observations from one external payload. Third-party reports are
/// treated as derivative sources.
pub fn from_payload(payload: &ExternalPayload) -> Vec<Observation> {
    let grade = grading::grade(&payload.source_type);
    let extraction_confidence = match grade {
        EvidenceGrade::E3 => 0.98,
        EvidenceGrade::E2 => 0.85,
        EvidenceGrade::E1 => 0.7,
    };
    payload
        .records
        .iter()
        .map(|record| Observation {
            metric_name: record.metric_name.clone(),
            value: record.value.clone(),
            source_type: payload.source_type.clone(),
            source_ref: format!("{}#{}", payload.source_ref, record.metric_name),
            snippet: snippet_for(&record.metric_name, &record.value),
            page_ref: None,
            extraction_confidence,
            timestamp: payload.retrieved_at,
            is_primary: grade != EvidenceGrade::E2,
            license_valid: payload.license_valid,
        })
        .collect()
}

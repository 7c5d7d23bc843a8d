//! Phase 1: domain and stage classification.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use glassbox_core::models::{AuditAction, AuditActor, Classification, Company, Evaluation};

use crate::engine::EngineInner;

/// Free text available beyond the company description: extracted document
/// text, the extracted description, and any industry hints.
pub fn description_text(company: &Company) -> String {
    let intake = company.merged_intake();
    company
        .documents
        .iter()
        .filter_map(|d| d.text.as_deref())
        .chain(intake.company_info.description.as_deref())
        .chain(intake.company_info.industry.as_deref())
        .chain(company.industry.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The company record with domain labels and stage taken from the classification.
pub fn labelled(company: &Company, classification: &Classification) -> Company {
    let mut company = company.clone();
    company.domain_labels = classification.domains().map(str::to_string).collect();
    company.stage = Some(classification.stage);
    company
}

#[instrument(name = "glassbox.stage", skip_all, fields(stage = "classification"))]
pub(crate) fn run(inner: &EngineInner, evaluation: &mut Evaluation) -> Classification {
    let text = description_text(&evaluation.company);
    let classification = inner.classifier.classify(&evaluation.company, &text, "");
    evaluation.company = Arc::new(labelled(&evaluation.company, &classification));

    evaluation.record(
        AuditAction::DomainClassified,
        json!({
            "primary_domain": classification.primary_domain,
            "secondary_domains": classification.secondary_domains,
            "confidence": classification.confidence,
            "stage": classification.stage.as_str(),
            "keywords": classification.keywords_found,
            "naics_code": classification.naics_code,
        }),
        AuditActor::System,
    );
    evaluation.classification = Some(classification.clone());
    classification
}

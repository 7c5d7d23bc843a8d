//! Phase 3: evidence collection and linking.
//!
//! Document and external observations are gathered concurrently into
//! separate batches, scored together so cross-references count, then
//! linked to metrics by hint or snippet keyword.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, instrument};

use glassbox_core::errors::{GlassBoxError, GlassBoxErrorCode, GlassBoxResult};
use glassbox_core::models::{
    AuditAction, AuditActor, Company, Evaluation, EvaluationModule, EvidenceItem,
};
use glassbox_core::traits::IExternalDataSource;
use glassbox_domain::catalog::{self, MetricSpec};
use glassbox_evidence::ingestion::{self, Observation};
use glassbox_evidence::{EvidenceGraph, EvidenceProcessor};

use crate::engine::EngineInner;
use crate::tracing_setup::events;

/// An external source that could not be read.
#[derive(Debug)]
pub struct SourceFailure {
    pub source_type: String,
    pub error: GlassBoxError,
}

/// Fetch every source on the blocking pool. Sources run concurrently;
/// a failing source is reported and skipped.
pub async fn fetch_external(
    company: &Arc<Company>,
    sources: &[Arc<dyn IExternalDataSource>],
) -> (Vec<Observation>, Vec<SourceFailure>) {
    let pending: Vec<_> = sources
        .iter()
        .map(|source| {
            let source = Arc::clone(source);
            let company = Arc::clone(company);
            let source_type = source.source_type().to_string();
            let task = tokio::task::spawn_blocking(move || source.fetch(&company));
            (source_type, task)
        })
        .collect();

    let mut observations = Vec::new();
    let mut failures = Vec::new();
    for (source_type, task) in pending {
        match task.await {
            Ok(Ok(payloads)) => {
                for payload in &payloads {
                    observations.extend(ingestion::from_payload(payload));
                }
            }
            Ok(Err(error)) => failures.push(SourceFailure { source_type, error }),
            Err(join) => failures.push(SourceFailure {
                source_type,
                error: GlassBoxError::ConcurrencyError(join.to_string()),
            }),
        }
    }
    (observations, failures)
}

/// Whether an evidence item belongs to a metric: extracted for it, or its
/// snippet mentions one of the metric's keywords.
pub fn supports(item: &EvidenceItem, metric_name: &str, spec: Option<&MetricSpec>) -> bool {
    if item.metric_hint.as_deref() == Some(metric_name) {
        return true;
    }
    match (spec, item.snippet.as_deref()) {
        (Some(spec), Some(snippet)) => spec.matches(&snippet.to_lowercase()),
        _ => false,
    }
}

/// Attach supporting evidence to every metric, resolve conflicts, and
/// record links in the graph. Returns the names of contested metrics.
pub fn link(
    modules: &mut [EvaluationModule],
    items: &[EvidenceItem],
    processor: &EvidenceProcessor,
    graph: &EvidenceGraph,
    evaluation_id: &str,
) -> GlassBoxResult<Vec<String>> {
    let mut contested = Vec::new();
    for module in modules.iter_mut() {
        let specs = catalog::module_definition(&module.id).map_or(&[][..], |def| def.metrics);
        for metric in module.metrics.iter_mut() {
            let spec = specs.iter().find(|s| s.name == metric.name);
            let relevant: Vec<EvidenceItem> = items
                .iter()
                .filter(|item| supports(item, &metric.name, spec))
                .cloned()
                .collect();
            if relevant.is_empty() {
                continue;
            }
            for item in relevant {
                metric.add_evidence(item);
            }

            let resolution = processor.resolve_conflicts(metric);
            graph.attach_metric(evaluation_id, metric)?;
            graph.record_conflict(evaluation_id, metric, &resolution)?;
            if resolution.contested {
                contested.push(metric.name.clone());
            }
        }
    }
    Ok(contested)
}

#[instrument(name = "glassbox.stage", skip_all, fields(stage = "evidence"))]
pub(crate) async fn run(
    inner: &EngineInner,
    evaluation: &mut Evaluation,
    now: DateTime<Utc>,
) -> GlassBoxResult<()> {
    let company = Arc::clone(&evaluation.company);
    let documents = async { ingestion::from_company(&company, now) };
    let external = fetch_external(&company, &inner.sources);
    let (mut observations, (external_observations, failures)) = tokio::join!(documents, external);
    observations.extend(external_observations);

    for failure in &failures {
        events::source_failed(&evaluation.id, &failure.source_type, &failure.error.to_string());
        evaluation.record(
            AuditAction::ApiIngestionFailed,
            json!({
                "source_type": failure.source_type,
                "error": failure.error.to_string(),
                "error_code": failure.error.error_code(),
            }),
            AuditActor::System,
        );
    }

    let items = inner.processor.process(&observations, now);
    inner.graph.add_evidence(&evaluation.id, &items)?;
    let contested = link(
        &mut evaluation.modules,
        &items,
        &inner.processor,
        &inner.graph,
        &evaluation.id,
    )?;
    debug!(items = items.len(), contested = contested.len(), "evidence linked");

    let sources: BTreeSet<&str> = items.iter().map(|e| e.source_type.as_str()).collect();
    let linked_metrics = evaluation
        .modules
        .iter()
        .flat_map(|m| m.metrics.iter())
        .filter(|m| !m.evidence_items().is_empty())
        .count();
    evaluation.record(
        AuditAction::EvidenceCollected,
        json!({
            "evidence_count": items.len(),
            "sources": sources,
            "linked_metrics": linked_metrics,
            "contested_metrics": contested,
            "failed_sources": failures.len(),
        }),
        AuditActor::System,
    );
    Ok(())
}

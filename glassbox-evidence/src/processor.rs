//! The evidence processor: grading, scoring and conflict resolution behind one API.

use chrono::{DateTime, Utc};

use glassbox_core::config::EvidenceConfig;
use glassbox_core::models::{EvidenceDraft, EvidenceGrade, EvidenceItem, Metric, SqsComponents};

use crate::conflict::{ConflictResolution, ConflictResolver};
use crate::grading;
use crate::ingestion::Observation;
use crate::quality::{QualityContext, SourceQualityScorer};

#[derive(Debug, Clone, Default)]
pub struct EvidenceProcessor {
    scorer: SourceQualityScorer,
    resolver: ConflictResolver,
}

impl EvidenceProcessor {
    pub fn new(config: EvidenceConfig) -> Self {
        Self {
            resolver: ConflictResolver::new(&config),
            scorer: SourceQualityScorer::new(config),
        }
    }

    pub fn grade(&self, source_type: &str) -> EvidenceGrade {
        grading::grade(source_type)
    }

    /// SQS and its components for a source observed at `timestamp`.
    pub fn score_quality(
        &self,
        source_type: &str,
        timestamp: DateTime<Utc>,
        metric: &str,
        ctx: &QualityContext,
    ) -> (f64, SqsComponents) {
        let components = self.scorer.components(source_type, timestamp, metric, ctx);
        (components.sqs(), components)
    }

    /// Construct and immediately score an evidence item.
    pub fn create_evidence_item(&self, observation: &Observation, ctx: &QualityContext) -> EvidenceItem {
        let (_, components) = self.score_quality(
            &observation.source_type,
            observation.timestamp,
            &observation.metric_name,
            ctx,
        );
        EvidenceItem::scored(
            EvidenceDraft {
                source_ref: observation.source_ref.clone(),
                source_type: observation.source_type.clone(),
                grade: observation.grade(),
                extraction_confidence: observation.extraction_confidence,
                metric_hint: Some(observation.metric_name.clone()),
                claimed_value: Some(observation.value.clone()),
                snippet: Some(observation.snippet.clone()),
                page_ref: observation.page_ref.clone(),
                license: None,
                timestamp: observation.timestamp,
            },
            components,
        )
    }

    /// Score a batch of observations together. An observation's
    /// cross-references are the other source types making the same claim
    /// for the same metric.
    pub fn process(&self, observations: &[Observation], now: DateTime<Utc>) -> Vec<EvidenceItem> {
        observations
            .iter()
            .map(|obs| {
                let claim = obs.value.claim_key();
                let mut corroborating: Vec<&str> = observations
                    .iter()
                    .filter(|other| {
                        other.source_type != obs.source_type
                            && other.metric_name == obs.metric_name
                            && other.value.claim_key() == claim
                    })
                    .map(|other| other.source_type.as_str())
                    .collect();
                corroborating.sort_unstable();
                corroborating.dedup();

                let ctx = QualityContext {
                    cross_references: corroborating.len(),
                    is_primary: obs.is_primary,
                    license_valid: obs.license_valid,
                    ..QualityContext::new(now)
                };
                self.create_evidence_item(obs, &ctx)
            })
            .collect()
    }

    pub fn resolve_conflicts(&self, metric: &mut Metric) -> ConflictResolution {
        self.resolver.resolve(metric)
    }
}

//! Read-only views over stored evaluation snapshots.
//!
//! Every view reads one owned snapshot from the repository, so a view is
//! consistent even while the pipeline keeps writing newer snapshots.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use glassbox_core::errors::{GlassBoxError, GlassBoxResult};
use glassbox_core::models::{
    AuditAction, AuditEntry, Benchmark, BiasFeature, BiasReport, Classification, Company,
    CompanyStage, Decision, EvaluationModule, EvaluationStatus, EvidenceGrade, FormulaKind,
    MetricValue, ModuleKind, Recommendation, Risk, ScoreBreakdown,
};
use glassbox_domain::PlaylistRationale;
use glassbox_evidence::GraphSummary;
use glassbox_scoring::benchmark;
use glassbox_scoring::registry::FORMULAS;

use crate::engine::GlassBoxEngine;

const LOW_BIAS_DELTA: f64 = 0.5;
const MEDIUM_BIAS_DELTA: f64 = 1.0;

const BIAS_RECOMMENDATIONS: [&str; 3] = [
    "Review flagged features for potential bias sources",
    "Consider additional identity-blind validation",
    "Monitor bias trends across evaluations",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub id: String,
    pub status: EvaluationStatus,
    pub company_name: String,
    pub overall_score: f64,
    pub overall_confidence: f64,
    pub modules_completed: usize,
    pub total_modules: usize,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Failure message and code, for failed evaluations.
    pub error: Option<String>,
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyView {
    pub name: String,
    pub domain_labels: Vec<String>,
    pub stage: Option<CompanyStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallResults {
    pub score: f64,
    pub confidence: f64,
    pub recommendation: Option<Recommendation>,
    pub decision: Option<Decision>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricView {
    pub name: String,
    /// Override if present, otherwise the consensus value.
    pub value: Option<MetricValue>,
    pub confidence: f64,
    pub score: Option<f64>,
    pub contested: bool,
    pub overridden: bool,
    pub evidence_count: usize,
    pub evidence_sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleView {
    pub id: String,
    pub name: String,
    pub kind: ModuleKind,
    pub weight: f64,
    pub score: Option<f64>,
    pub confidence: f64,
    pub breakdown: Option<ScoreBreakdown>,
    pub metrics: Vec<MetricView>,
}

/// Everything needed to explain an evaluation's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainabilityView {
    pub evaluation_id: String,
    pub status: EvaluationStatus,
    pub company: CompanyView,
    pub overall_results: OverallResults,
    pub module_breakdown: Vec<ModuleView>,
    pub evidence_graph_summary: GraphSummary,
    pub risk_assessment: Vec<Risk>,
    pub bias_analysis: Option<BiasReport>,
    pub audit_trail: Vec<AuditEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceLink {
    pub evidence_id: String,
    pub source_type: String,
    pub source_ref: String,
    pub grade: EvidenceGrade,
    pub weight: f64,
    pub claimed_value: Option<MetricValue>,
    pub snippet: Option<String>,
}

/// Module id → metric name → supporting evidence.
pub type EvidenceLinks = BTreeMap<String, BTreeMap<String, Vec<EvidenceLink>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasMagnitude {
    Low,
    Medium,
    High,
}

impl BiasMagnitude {
    pub fn from_delta(delta: f64) -> Self {
        let delta = delta.abs();
        if delta < LOW_BIAS_DELTA {
            Self::Low
        } else if delta < MEDIUM_BIAS_DELTA {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Sign of `full - identity_blind`: positive means identity features raised the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasDirection {
    Positive,
    Negative,
    Neutral,
}

impl BiasDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Positive
        } else if delta < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasInterpretation {
    pub identity_blind_score: f64,
    pub full_score: f64,
    pub bias_delta: f64,
    pub magnitude: BiasMagnitude,
    pub direction: BiasDirection,
    pub flagged_features: Vec<BiasFeature>,
    pub contributing_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    pub deterministic_formulas: Vec<String>,
    pub ml_signals: Vec<String>,
    pub benchmark_adjustment: String,
    pub risk_adjustment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleScore {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub score: Option<f64>,
    pub breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdownView {
    pub evaluation_id: String,
    pub overall_score: f64,
    pub modules: Vec<ModuleScore>,
    pub methodology: Methodology,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedModule {
    pub id: String,
    pub name: String,
    pub kind: ModuleKind,
    pub weight: f64,
    pub description: String,
}

/// Classification and playlist for free text, without running an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAnalysis {
    pub classification: Classification,
    pub recommended_modules: Vec<RecommendedModule>,
    pub rationale: PlaylistRationale,
}

fn metric_views(module: &EvaluationModule) -> Vec<MetricView> {
    module
        .metrics
        .iter()
        .map(|metric| {
            let evidence = metric.evidence_items();
            let sources: BTreeSet<&str> = evidence.iter().map(|e| e.source_type.as_str()).collect();
            MetricView {
                name: metric.name.clone(),
                value: metric.effective_value().cloned(),
                confidence: metric.confidence,
                score: metric.score,
                contested: metric.contested,
                overridden: metric.human_override.is_some(),
                evidence_count: evidence.len(),
                evidence_sources: sources.into_iter().map(str::to_string).collect(),
            }
        })
        .collect()
}

fn methodology() -> Methodology {
    let describe = |kind: FormulaKind| -> Vec<String> {
        FORMULAS
            .iter()
            .filter(|f| f.kind == kind)
            .map(|f| format!("{}: {}", f.name, f.description))
            .collect()
    };
    Methodology {
        deterministic_formulas: describe(FormulaKind::Deterministic),
        ml_signals: describe(FormulaKind::MlSignal),
        benchmark_adjustment: "Metric scores nudged by percentile band against domain and stage benchmarks"
            .to_string(),
        risk_adjustment: "Regulatory and market risks subtract severity × likelihood × category cap, floored at 0"
            .to_string(),
    }
}

impl GlassBoxEngine {
    pub fn get_status(&self, evaluation_id: &str) -> GlassBoxResult<StatusView> {
        let evaluation = self.snapshot(evaluation_id)?;
        let failure = evaluation
            .audit_log()
            .iter()
            .rev()
            .find(|e| e.action == AuditAction::EvaluationFailed);
        let detail = |key: &str| {
            failure
                .and_then(|e| e.details.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        Ok(StatusView {
            id: evaluation.id.clone(),
            status: evaluation.status(),
            company_name: evaluation.company.name.clone(),
            overall_score: evaluation.overall_score,
            overall_confidence: evaluation.overall_confidence,
            modules_completed: evaluation.modules_completed(),
            total_modules: evaluation.modules.len(),
            created_at: evaluation.created_at,
            completed_at: evaluation.completed_at,
            error: detail("error"),
            error_code: detail("error_code"),
        })
    }

    /// Status of every stored evaluation, oldest first.
    pub fn list_evaluations(&self) -> GlassBoxResult<Vec<StatusView>> {
        let mut views = self
            .inner
            .repository
            .list()?
            .iter()
            .map(|id| self.get_status(id))
            .collect::<GlassBoxResult<Vec<_>>>()?;
        views.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(views)
    }

    pub fn get_explainability(&self, evaluation_id: &str) -> GlassBoxResult<ExplainabilityView> {
        let evaluation = self.snapshot(evaluation_id)?;
        let evidence_graph_summary = self.inner.graph.summary(evaluation_id)?;

        Ok(ExplainabilityView {
            evaluation_id: evaluation.id.clone(),
            status: evaluation.status(),
            company: CompanyView {
                name: evaluation.company.name.clone(),
                domain_labels: evaluation.company.domain_labels.clone(),
                stage: evaluation.company.stage,
            },
            overall_results: OverallResults {
                score: evaluation.overall_score,
                confidence: evaluation.overall_confidence,
                recommendation: evaluation.decision.as_ref().map(|d| d.recommendation),
                decision: evaluation.decision.clone(),
            },
            module_breakdown: evaluation
                .modules
                .iter()
                .map(|m| ModuleView {
                    id: m.id.clone(),
                    name: m.name.clone(),
                    kind: m.kind,
                    weight: m.weight,
                    score: m.score,
                    confidence: m.confidence,
                    breakdown: m.breakdown.clone(),
                    metrics: metric_views(m),
                })
                .collect(),
            evidence_graph_summary,
            risk_assessment: evaluation.risks.clone(),
            bias_analysis: evaluation.bias_report.clone(),
            audit_trail: evaluation.audit_log().as_slice().to_vec(),
        })
    }

    /// Evidence behind every linked metric. Metrics without evidence are omitted.
    pub fn get_evidence_links(&self, evaluation_id: &str) -> GlassBoxResult<EvidenceLinks> {
        let evaluation = self.snapshot(evaluation_id)?;
        let mut links = EvidenceLinks::new();
        for module in &evaluation.modules {
            for metric in &module.metrics {
                let evidence: Vec<EvidenceLink> = metric
                    .evidence_items()
                    .iter()
                    .map(|e| EvidenceLink {
                        evidence_id: e.id.clone(),
                        source_type: e.source_type.clone(),
                        source_ref: e.source_ref.clone(),
                        grade: e.grade,
                        weight: e.weight(),
                        claimed_value: e.claimed_value.clone(),
                        snippet: e.snippet.clone(),
                    })
                    .collect();
                if evidence.is_empty() {
                    continue;
                }
                links
                    .entry(module.id.clone())
                    .or_default()
                    .insert(metric.name.clone(), evidence);
            }
        }
        Ok(links)
    }

    pub fn get_bias_interpretation(&self, evaluation_id: &str) -> GlassBoxResult<BiasInterpretation> {
        let evaluation = self.snapshot(evaluation_id)?;
        let report = evaluation
            .bias_report
            .ok_or_else(|| GlassBoxError::InvalidState {
                reason: format!("evaluation {evaluation_id} has no bias analysis yet"),
            })?;

        Ok(BiasInterpretation {
            identity_blind_score: report.identity_blind_score,
            full_score: report.full_score,
            bias_delta: report.bias_delta,
            magnitude: BiasMagnitude::from_delta(report.bias_delta),
            direction: BiasDirection::from_delta(report.bias_delta),
            flagged_features: report.flagged_features,
            contributing_factors: report.contributing_factors,
            recommendations: BIAS_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn get_score_breakdown(&self, evaluation_id: &str) -> GlassBoxResult<ScoreBreakdownView> {
        let evaluation = self.snapshot(evaluation_id)?;
        Ok(ScoreBreakdownView {
            evaluation_id: evaluation.id.clone(),
            overall_score: evaluation.overall_score,
            modules: evaluation
                .modules
                .iter()
                .map(|m| ModuleScore {
                    id: m.id.clone(),
                    name: m.name.clone(),
                    weight: m.weight,
                    score: m.score,
                    breakdown: m.breakdown.clone(),
                })
                .collect(),
            methodology: methodology(),
        })
    }

    /// Classify free text and show the playlist an evaluation would run.
    pub fn analyze_domain(
        &self,
        description: &str,
        website_text: Option<&str>,
        industry_hint: Option<&str>,
    ) -> DomainAnalysis {
        let mut company = Company::new("Analysis Target");
        company.description = Some(description.to_string());
        company.industry = industry_hint.map(str::to_string);

        let classification = self.inner.classifier.classify(
            &company,
            industry_hint.unwrap_or_default(),
            website_text.unwrap_or_default(),
        );
        let modules = self.inner.orchestrator.build_playlist(&classification, None);
        let rationale = self.inner.orchestrator.rationale(&classification, &modules, None);

        DomainAnalysis {
            recommended_modules: modules
                .into_iter()
                .map(|m| RecommendedModule {
                    id: m.id,
                    name: m.name,
                    kind: m.kind,
                    weight: m.weight,
                    description: m.description,
                })
                .collect(),
            classification,
            rationale,
        }
    }

    /// Reference benchmarks, optionally narrowed to one domain and/or stage.
    pub fn get_benchmarks(&self, domain: Option<&str>, stage: Option<CompanyStage>) -> Vec<Benchmark> {
        benchmark::reference_benchmarks()
            .into_iter()
            .filter(|b| domain.map_or(true, |d| b.industry == d))
            .filter(|b| stage.map_or(true, |s| b.stage == s))
            .collect()
    }
}

//! GlassBoxEngine: the main entry point for running evaluations.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::watch;
use tracing::info;

use glassbox_core::config::GlassBoxConfig;
use glassbox_core::errors::{GlassBoxError, GlassBoxResult, LookupError};
use glassbox_core::models::{
    AuditAction, AuditActor, Company, Evaluation, EvaluationStatus, EvaluationType, MetricValue,
};
use glassbox_core::traits::{IEvaluationRepository, IExternalDataSource, IScoringSignalProvider};
use glassbox_domain::{DomainClassifier, ModuleOrchestrator};
use glassbox_evidence::{EvidenceGraph, EvidenceProcessor};
use glassbox_scoring::{BenchmarkCatalog, ScoringEngine};

use crate::handle::EvaluationHandle;
use crate::pipeline::phase5_risk::RiskAssessor;
use crate::pipeline::phase6_bias::BiasAnalyzer;
use crate::pipeline::phase7_decision::DecisionMaker;
use crate::pipeline;
use crate::repository::InMemoryEvaluationRepository;
use crate::tracing_setup::events;

/// Shared state behind every clone of the engine and every running pipeline.
pub(crate) struct EngineInner {
    pub(crate) config: GlassBoxConfig,
    pub(crate) classifier: DomainClassifier,
    pub(crate) orchestrator: ModuleOrchestrator,
    pub(crate) processor: EvidenceProcessor,
    pub(crate) scoring: ScoringEngine,
    pub(crate) graph: EvidenceGraph,
    pub(crate) repository: Arc<dyn IEvaluationRepository>,
    pub(crate) sources: Vec<Arc<dyn IExternalDataSource>>,
    pub(crate) benchmarks: BenchmarkCatalog,
    pub(crate) risk: RiskAssessor,
    pub(crate) bias: BiasAnalyzer,
    pub(crate) decision: DecisionMaker,
}

/// Runs evaluations on the tokio runtime and serves read-only views.
///
/// Cheap to clone; clones share the repository and the evidence graph.
#[derive(Clone)]
pub struct GlassBoxEngine {
    pub(crate) inner: Arc<EngineInner>,
}

impl GlassBoxEngine {
    /// Engine with an in-memory repository, heuristic signals, no external
    /// sources and no score benchmarks.
    pub fn new(config: GlassBoxConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: GlassBoxConfig) -> GlassBoxEngineBuilder {
        GlassBoxEngineBuilder {
            config,
            repository: None,
            sources: Vec::new(),
            signals: None,
            benchmarks: BenchmarkCatalog::new(),
            graph: None,
        }
    }

    pub fn config(&self) -> &GlassBoxConfig {
        &self.inner.config
    }

    /// Process-wide evidence graph shared by all evaluations.
    pub fn evidence_graph(&self) -> &EvidenceGraph {
        &self.inner.graph
    }

    /// Create a pending evaluation, persist it, and spawn its pipeline.
    ///
    /// Must be called from within a tokio runtime. The evaluation id is
    /// readable through [`EvaluationHandle::id`] before the pipeline runs.
    pub async fn start_evaluation(
        &self,
        company: Company,
        evaluation_type: EvaluationType,
        custom_weights: Option<HashMap<String, f64>>,
        analyst: &str,
    ) -> GlassBoxResult<EvaluationHandle> {
        let mut evaluation = Evaluation::new(Arc::new(company), evaluation_type, analyst);
        evaluation.record(
            AuditAction::EvaluationStarted,
            json!({
                "company_name": evaluation.company.name,
                "evaluation_type": evaluation_type.as_str(),
                "custom_weights": custom_weights,
            }),
            AuditActor::Analyst(analyst.to_string()),
        );
        self.inner.repository.put(&evaluation)?;
        events::evaluation_started(&evaluation.id, &evaluation.company.name);

        let id = evaluation.id.clone();
        let (cancel, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(pipeline::drive(
            Arc::clone(&self.inner),
            evaluation,
            custom_weights,
            cancel_rx,
        ));
        Ok(EvaluationHandle::new(id, cancel, task))
    }

    /// Record an analyst override on one metric of a completed evaluation.
    ///
    /// Applied through [`IEvaluationRepository::update`], so concurrent
    /// overrides on one evaluation never lose each other's writes.
    pub fn override_metric(
        &self,
        evaluation_id: &str,
        module_id: &str,
        metric_name: &str,
        value: MetricValue,
        reason: &str,
        analyst: &str,
    ) -> GlassBoxResult<()> {
        let mut apply = |evaluation: &mut Evaluation| -> GlassBoxResult<()> {
            if evaluation.status() != EvaluationStatus::Completed {
                return Err(GlassBoxError::InvalidState {
                    reason: format!(
                        "evaluation {evaluation_id} is {}; overrides need a completed evaluation",
                        evaluation.status()
                    ),
                });
            }

            let module = evaluation
                .module_mut(module_id)
                .ok_or_else(|| LookupError::UnknownModule {
                    id: module_id.to_string(),
                })?;
            let metric = module
                .metric_mut(metric_name)
                .ok_or_else(|| LookupError::UnknownMetric {
                    module: module_id.to_string(),
                    metric: metric_name.to_string(),
                })?;
            let previous = metric.effective_value().cloned();
            metric.apply_override(value.clone(), reason, analyst);

            evaluation.record(
                AuditAction::MetricOverridden,
                json!({
                    "module_id": module_id,
                    "metric": metric_name,
                    "previous_value": previous,
                    "value": value,
                    "reason": reason,
                }),
                AuditActor::Analyst(analyst.to_string()),
            );
            Ok(())
        };

        self.inner
            .repository
            .update(evaluation_id, &mut apply)?
            .ok_or_else(|| GlassBoxError::EvaluationNotFound {
                id: evaluation_id.to_string(),
            })?;
        info!(evaluation_id, module_id, metric = metric_name, "metric overridden");
        Ok(())
    }

    /// Latest stored snapshot of an evaluation.
    pub fn snapshot(&self, evaluation_id: &str) -> GlassBoxResult<Evaluation> {
        self.inner
            .repository
            .get(evaluation_id)?
            .ok_or_else(|| GlassBoxError::EvaluationNotFound {
                id: evaluation_id.to_string(),
            })
    }
}

/// Builder for [`GlassBoxEngine`] with injected collaborators.
pub struct GlassBoxEngineBuilder {
    config: GlassBoxConfig,
    repository: Option<Arc<dyn IEvaluationRepository>>,
    sources: Vec<Arc<dyn IExternalDataSource>>,
    signals: Option<Arc<dyn IScoringSignalProvider>>,
    benchmarks: BenchmarkCatalog,
    graph: Option<EvidenceGraph>,
}

impl GlassBoxEngineBuilder {
    pub fn with_repository(mut self, repository: Arc<dyn IEvaluationRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Add an external data source, fetched during evidence collection.
    pub fn with_source(mut self, source: Arc<dyn IExternalDataSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_signal_provider(mut self, signals: Arc<dyn IScoringSignalProvider>) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Score-scale benchmarks used for percentile nudges.
    pub fn with_benchmarks(mut self, benchmarks: BenchmarkCatalog) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    /// Share an existing evidence graph, e.g. between several engines.
    pub fn with_evidence_graph(mut self, graph: EvidenceGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn build(self) -> GlassBoxEngine {
        let config = self.config;
        let scoring = match self.signals {
            Some(signals) => ScoringEngine::new(config.scoring.clone(), signals),
            None => ScoringEngine::with_heuristics(config.scoring.clone()),
        };
        let decision = DecisionMaker::new(config.decision.clone());
        let inner = EngineInner {
            classifier: DomainClassifier::new(),
            orchestrator: ModuleOrchestrator::new(config.orchestration.clone()),
            processor: EvidenceProcessor::new(config.evidence.clone()),
            scoring,
            graph: self.graph.unwrap_or_default(),
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(InMemoryEvaluationRepository::new())),
            sources: self.sources,
            benchmarks: self.benchmarks,
            risk: RiskAssessor::new(),
            bias: BiasAnalyzer::new(&config.bias, decision.clone()),
            decision,
            config,
        };
        GlassBoxEngine {
            inner: Arc::new(inner),
        }
    }
}

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use glassbox_core::config::GlassBoxConfig;
use glassbox_core::errors::{error_code, GlassBoxError, GlassBoxErrorCode, GlassBoxResult};
use glassbox_core::models::{
    AuditAction, Company, Evaluation, EvaluationStatus, EvaluationType, ExternalPayload,
    MetricValue, RiskCategory,
};
use glassbox_core::traits::{IEvaluationRepository, IExternalDataSource};
use glassbox_engine::{GlassBoxEngine, InMemoryEvaluationRepository, StaticDataSource};
use test_fixtures::load_fixture;

fn ledgerly() -> Company {
    load_fixture("companies/b2b_saas_seed.json")
}

fn sparse() -> Company {
    load_fixture("companies/sparse_intake.json")
}

/// Blocks its worker thread before returning nothing.
struct SlowSource {
    delay: Duration,
}

impl IExternalDataSource for SlowSource {
    fn source_type(&self) -> &str {
        "crunchbase"
    }

    fn fetch(&self, _company: &Company) -> GlassBoxResult<Vec<ExternalPayload>> {
        std::thread::sleep(self.delay);
        Ok(Vec::new())
    }
}

struct BrokenSource;

impl IExternalDataSource for BrokenSource {
    fn source_type(&self) -> &str {
        "stripe_api"
    }

    fn fetch(&self, _company: &Company) -> GlassBoxResult<Vec<ExternalPayload>> {
        Err(GlassBoxError::InvalidState {
            reason: "upstream returned 503".into(),
        })
    }
}

fn actions(engine: &GlassBoxEngine, id: &str) -> Vec<AuditAction> {
    engine
        .snapshot(id)
        .unwrap()
        .audit_log()
        .iter()
        .map(|e| e.action)
        .collect()
}

// ── Happy path ──

#[tokio::test]
async fn b2b_saas_evaluation_completes() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::DeepDive, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    assert_eq!(handle.join().await.unwrap(), EvaluationStatus::Completed);

    let evaluation = engine.snapshot(&id).unwrap();
    assert_eq!(evaluation.status(), EvaluationStatus::Completed);
    assert!(evaluation.completed_at.is_some());
    assert!(evaluation.decision.is_some());
    assert!(evaluation.bias_report.is_some());
    assert!(evaluation.audit_log().verify());

    let ids: Vec<&str> = evaluation.modules.iter().map(|m| m.id.as_str()).collect();
    assert!(ids.contains(&"cac_payback"));
    assert!(ids.contains(&"ndr"));
    let total: f64 = evaluation.modules.iter().map(|m| m.weight).sum();
    assert!((total - 1.0).abs() < 1e-9);

    assert!(evaluation.overall_score > 0.0 && evaluation.overall_score <= 10.0);
    assert!((evaluation.overall_score - evaluation.calculate_overall_score()).abs() < 1e-9);
}

#[tokio::test]
async fn every_stage_leaves_an_audit_entry() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    handle.join().await.unwrap();

    let actions = actions(&engine, &id);
    assert_eq!(actions.first(), Some(&AuditAction::EvaluationStarted));
    assert_eq!(actions.last(), Some(&AuditAction::EvaluationCompleted));
    let ordered = [
        AuditAction::DomainClassified,
        AuditAction::ModulesSelected,
        AuditAction::EvidenceCollected,
        AuditAction::ModuleScored,
        AuditAction::RisksAssessed,
        AuditAction::BiasAnalyzed,
        AuditAction::DecisionGenerated,
    ];
    let positions: Vec<usize> = ordered
        .iter()
        .map(|a| actions.iter().position(|x| x == a).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{actions:?}");

    let evaluation = engine.snapshot(&id).unwrap();
    let scored = actions.iter().filter(|a| **a == AuditAction::ModuleScored).count();
    assert_eq!(scored, evaluation.modules.len());
}

#[tokio::test]
async fn started_entry_is_attributed_to_the_analyst() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-7")
        .await
        .unwrap();
    let id = handle.id().to_string();
    handle.join().await.unwrap();

    let evaluation = engine.snapshot(&id).unwrap();
    let first = evaluation.audit_log().iter().next().unwrap();
    assert_eq!(first.actor.name(), "analyst-7");
    assert_eq!(evaluation.audit_log().last().unwrap().actor.name(), "system");
}

#[tokio::test]
async fn custom_weights_shape_the_playlist() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let weights = HashMap::from([("ndr".to_string(), 5.0)]);
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::DeepDive, Some(weights), "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    handle.join().await.unwrap();

    let evaluation = engine.snapshot(&id).unwrap();
    let ndr = evaluation.module("ndr").unwrap().weight;
    assert!(evaluation.modules.iter().all(|m| m.weight <= ndr));
    let total: f64 = evaluation.modules.iter().map(|m| m.weight).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn sparse_company_still_completes() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let handle = engine
        .start_evaluation(sparse(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    assert_eq!(handle.join().await.unwrap(), EvaluationStatus::Completed);

    let status = engine.get_status(&id).unwrap();
    assert_eq!(status.status, EvaluationStatus::Completed);
    assert!(status.total_modules > 0);
    assert!(status.overall_score >= 0.0);
    assert!(status.error.is_none());
}

// ── Evidence conflicts ──

async fn completed(engine: &GlassBoxEngine, company: Company) -> Evaluation {
    let handle = engine
        .start_evaluation(company, EvaluationType::DeepDive, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    assert_eq!(handle.join().await.unwrap(), EvaluationStatus::Completed);
    engine.snapshot(&id).unwrap()
}

fn contested(evaluation: &Evaluation) -> Vec<String> {
    evaluation
        .modules
        .iter()
        .flat_map(|m| m.metrics.iter())
        .filter(|m| m.contested)
        .map(|m| m.name.clone())
        .collect()
}

#[tokio::test]
async fn only_disagreement_on_one_quantity_contests_a_metric() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let evaluation = completed(&engine, ledgerly()).await;

    // Deck ARR 1.2M against statement ARR 1.15M. Cash balance next to burn
    // rate, and net new ARR next to ARR, are different quantities.
    assert_eq!(contested(&evaluation), ["revenue"]);
    let burn = evaluation
        .modules
        .iter()
        .flat_map(|m| m.metrics.iter())
        .find(|m| m.name == "burn_rate")
        .unwrap();
    assert!(!burn.contested);
    assert_eq!(burn.value, Some(MetricValue::Number(150_000.0)));

    let evidence_risks: Vec<_> = evaluation
        .risks
        .iter()
        .filter(|r| r.category == RiskCategory::Evidence)
        .collect();
    assert_eq!(evidence_risks.len(), 1);
    assert_eq!(evidence_risks[0].description, "Conflicting evidence for revenue");
}

#[tokio::test]
async fn agreeing_documents_raise_no_evidence_risk() {
    let mut company = ledgerly();
    for document in &mut company.documents {
        if document.intake.financial_data.arr.is_some() {
            document.intake.financial_data.arr = Some(1_200_000.0);
        }
    }
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let evaluation = completed(&engine, company).await;

    assert!(contested(&evaluation).is_empty());
    assert!(evaluation.risks.iter().all(|r| r.category != RiskCategory::Evidence));
}

// ── Deadline and cancellation ──

#[tokio::test]
async fn deadline_marks_evaluation_failed_with_timeout() {
    let mut config = GlassBoxConfig::default();
    config.pipeline.timeout_ms = 20;
    let engine = GlassBoxEngine::builder(config)
        .with_source(Arc::new(SlowSource {
            delay: Duration::from_millis(300),
        }))
        .build();

    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    assert_eq!(handle.join().await.unwrap(), EvaluationStatus::Failed);

    let status = engine.get_status(&id).unwrap();
    assert_eq!(status.status, EvaluationStatus::Failed);
    assert_eq!(status.error_code.as_deref(), Some(error_code::TIMEOUT));
    assert!(status.completed_at.is_none());
    assert_eq!(
        actions(&engine, &id).last(),
        Some(&AuditAction::EvaluationFailed)
    );
}

#[tokio::test]
async fn cancel_marks_evaluation_failed() {
    let engine = GlassBoxEngine::builder(GlassBoxConfig::default())
        .with_source(Arc::new(SlowSource {
            delay: Duration::from_millis(300),
        }))
        .build();

    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    handle.cancel();
    assert_eq!(handle.join().await.unwrap(), EvaluationStatus::Failed);

    let status = engine.get_status(&id).unwrap();
    assert_eq!(status.error_code.as_deref(), Some(error_code::CANCELLED));
    assert!(engine.snapshot(&id).unwrap().audit_log().verify());
}

#[tokio::test]
async fn dropped_handle_does_not_cancel() {
    let repository = Arc::new(InMemoryEvaluationRepository::new());
    let engine = GlassBoxEngine::builder(GlassBoxConfig::default())
        .with_repository(repository.clone())
        .build();

    let id = {
        let handle = engine
            .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
            .await
            .unwrap();
        handle.id().to_string()
    };

    let mut status = EvaluationStatus::Pending;
    for _ in 0..200 {
        status = repository.get(&id).unwrap().unwrap().status();
        if status.is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(status, EvaluationStatus::Completed);
}

// ── External sources ──

#[tokio::test]
async fn failing_source_is_recorded_and_skipped() {
    let engine = GlassBoxEngine::builder(GlassBoxConfig::default())
        .with_source(Arc::new(BrokenSource))
        .build();
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    assert_eq!(handle.join().await.unwrap(), EvaluationStatus::Completed);

    let evaluation = engine.snapshot(&id).unwrap();
    let failure = evaluation
        .audit_log()
        .iter()
        .find(|e| e.action == AuditAction::ApiIngestionFailed)
        .unwrap();
    assert_eq!(failure.details["source_type"], "stripe_api");
    assert_eq!(failure.details["error_code"], error_code::INVALID_STATE);
}

#[tokio::test]
async fn external_records_reach_the_evidence_graph() {
    let source = StaticDataSource::new("stripe_api")
        .with_record("mrr", 100_000.0)
        .with_record("net_burn", MetricValue::Number(150_000.0));
    let engine = GlassBoxEngine::builder(GlassBoxConfig::default())
        .with_source(Arc::new(source))
        .build();
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::DeepDive, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    handle.join().await.unwrap();

    let summary = engine.evidence_graph().summary(&id).unwrap();
    assert_eq!(summary.source_breakdown.get("stripe_api"), Some(&2));
    assert!(summary.evidence_by_grade["E3"] >= 2);
}

#[tokio::test]
async fn graph_summaries_are_scoped_per_evaluation() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let first = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let second = engine
        .start_evaluation(sparse(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let (first_id, second_id) = (first.id().to_string(), second.id().to_string());
    first.join().await.unwrap();
    second.join().await.unwrap();

    let graph = engine.evidence_graph();
    assert!(graph.summary(&first_id).unwrap().total_evidence_items > 0);
    assert_eq!(graph.summary(&second_id).unwrap().total_evidence_items, 0);
}

// ── Overrides ──

#[tokio::test]
async fn override_on_completed_evaluation_is_audited() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    handle.join().await.unwrap();

    engine
        .override_metric(&id, "cac_payback", "cac", MetricValue::Number(450.0), "audited figure", "partner-2")
        .unwrap();

    let evaluation = engine.snapshot(&id).unwrap();
    let metric = evaluation.module("cac_payback").unwrap().metric("cac").unwrap();
    assert_eq!(metric.effective_value(), Some(&MetricValue::Number(450.0)));
    let last = evaluation.audit_log().last().unwrap();
    assert_eq!(last.action, AuditAction::MetricOverridden);
    assert_eq!(last.actor.name(), "partner-2");
    assert!(evaluation.audit_log().verify());
}

#[tokio::test]
async fn concurrent_overrides_keep_every_write() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let evaluation = completed(&engine, ledgerly()).await;
    let metrics = ["cac", "ltv", "payback_months", "cac_ltv_ratio"];

    std::thread::scope(|scope| {
        for (n, metric) in metrics.iter().enumerate() {
            let engine = engine.clone();
            let id = evaluation.id.clone();
            scope.spawn(move || {
                engine
                    .override_metric(&id, "cac_payback", metric, MetricValue::Number(n as f64), "restated", "partner-2")
                    .unwrap();
            });
        }
    });

    let evaluation = engine.snapshot(&evaluation.id).unwrap();
    let module = evaluation.module("cac_payback").unwrap();
    for (n, metric) in metrics.iter().enumerate() {
        let overridden = module.metric(metric).unwrap().effective_value();
        assert_eq!(overridden, Some(&MetricValue::Number(n as f64)), "{metric}");
    }
    let overrides = evaluation
        .audit_log()
        .iter()
        .filter(|e| e.action == AuditAction::MetricOverridden)
        .count();
    assert_eq!(overrides, metrics.len());
    assert!(evaluation.audit_log().verify());
}

#[tokio::test]
async fn rejected_override_leaves_snapshot_unchanged() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let evaluation = completed(&engine, ledgerly()).await;
    let before = evaluation.audit_log().len();

    engine
        .override_metric(&evaluation.id, "cac_payback", "no_such_metric", MetricValue::Number(1.0), "", "a")
        .unwrap_err();
    assert_eq!(engine.snapshot(&evaluation.id).unwrap().audit_log().len(), before);
}

#[tokio::test]
async fn override_rejects_unknown_targets() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();
    let id = handle.id().to_string();
    handle.join().await.unwrap();

    let err = engine
        .override_metric(&id, "no_such_module", "cac", MetricValue::Number(1.0), "", "a")
        .unwrap_err();
    assert_eq!(err.error_code(), error_code::LOOKUP_ERROR);
    let err = engine
        .override_metric(&id, "cac_payback", "no_such_metric", MetricValue::Number(1.0), "", "a")
        .unwrap_err();
    assert_eq!(err.error_code(), error_code::LOOKUP_ERROR);
}

#[tokio::test]
async fn override_requires_completed_evaluation() {
    let engine = GlassBoxEngine::builder(GlassBoxConfig::default())
        .with_source(Arc::new(SlowSource {
            delay: Duration::from_millis(200),
        }))
        .build();
    let handle = engine
        .start_evaluation(ledgerly(), EvaluationType::FastScan, None, "analyst-1")
        .await
        .unwrap();

    let err = engine
        .override_metric(handle.id(), "cac_payback", "cac", MetricValue::Number(1.0), "", "a")
        .unwrap_err();
    assert_eq!(err.error_code(), error_code::INVALID_STATE);
    handle.join().await.unwrap();
}

// ── Lookups ──

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let engine = GlassBoxEngine::new(GlassBoxConfig::default());
    let err = engine.get_status("missing").unwrap_err();
    assert!(matches!(err, GlassBoxError::EvaluationNotFound { .. }));
    let err = engine.get_explainability("missing").unwrap_err();
    assert_eq!(err.error_code(), error_code::EVALUATION_NOT_FOUND);
}

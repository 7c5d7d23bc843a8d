use std::sync::Arc;

use chrono::{Duration, Utc};
use glassbox_core::models::*;
use proptest::prelude::*;

fn evidence(grade: EvidenceGrade, authority: f64, extraction_confidence: f64) -> EvidenceItem {
    EvidenceItem::scored(
        EvidenceDraft {
            source_ref: "doc-1#slide 8".into(),
            source_type: "pitch_deck".into(),
            grade,
            extraction_confidence,
            metric_hint: Some("revenue".into()),
            claimed_value: Some(MetricValue::Number(1_200_000.0)),
            snippet: Some("1.2M ARR".into()),
            page_ref: Some("slide 8".into()),
            license: None,
            timestamp: Utc::now(),
        },
        SqsComponents::new(authority, 1.0, 0.3, 1.0, 0.8, 1.0),
    )
}

// ── SQS ──

proptest! {
    #[test]
    fn sqs_is_bounded_and_equals_weighted_sum(
        a in -1.0f64..2.0, f in -1.0f64..2.0, i in -1.0f64..2.0,
        d in -1.0f64..2.0, c in -1.0f64..2.0, l in -1.0f64..2.0,
    ) {
        let components = SqsComponents::new(a, f, i, d, c, l);
        let sqs = components.sqs();
        prop_assert!((0.0..=1.0).contains(&sqs));

        let expected = 0.25 * components.authority
            + 0.20 * components.freshness
            + 0.15 * components.independence
            + 0.15 * components.directness
            + 0.15 * components.consistency
            + 0.10 * components.legal;
        prop_assert!((sqs - expected).abs() < 1e-12);
    }
}

#[test]
fn sqs_weights_sum_to_one() {
    let total: f64 = glassbox_core::constants::SQS_WEIGHTS.iter().sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn non_finite_components_become_zero() {
    let components = SqsComponents::new(f64::NAN, f64::INFINITY, 1.0, 1.0, 1.0, 1.0);
    assert_eq!(components.authority, 0.0);
    assert_eq!(components.freshness, 0.0);
}

#[test]
fn rescoring_keeps_id_and_updates_sqs() {
    let item = evidence(EvidenceGrade::E2, 0.75, 0.9);
    let rescored = item.with_consistency(0.5);
    assert_eq!(rescored.id, item.id);
    assert_eq!(rescored.components().consistency, 0.5);
    assert!(rescored.source_quality() < item.source_quality());
    assert!((rescored.source_quality() - rescored.components().sqs()).abs() < 1e-12);
}

#[test]
fn evidence_weight_multiplies_grade_and_sqs() {
    let item = evidence(EvidenceGrade::E3, 0.95, 0.98);
    let expected = 0.9 * item.source_quality();
    assert!((item.weight() - expected).abs() < 1e-12);
    assert!((item.evidence_weight(0.5, 0.5) - expected * 0.25).abs() < 1e-12);
}

#[test]
fn claim_key_normalises_numbers_and_text() {
    assert_eq!(MetricValue::Number(1.20).claim_key(), MetricValue::Number(1.2).claim_key());
    assert_eq!(MetricValue::from(" 1.2M ARR ").claim_key(), "1.2m arr");
}

// ── Metric ──

#[test]
fn metric_confidence_is_weighted_average_of_extraction_confidence() {
    let mut metric = Metric::new("revenue", MetricType::Financial, 0.4);
    assert_eq!(metric.calculate_confidence(), 0.0);

    let strong = evidence(EvidenceGrade::E3, 0.95, 1.0);
    let weak = evidence(EvidenceGrade::E1, 0.4, 0.0);
    let (ws, ww) = (strong.weight(), weak.weight());
    metric.add_evidence(strong);
    metric.add_evidence(weak);

    let expected = ws / (ws + ww);
    assert!((metric.confidence - expected).abs() < 1e-12);
}

#[test]
fn confidence_and_score_are_idempotent() {
    let mut metric = Metric::new("revenue", MetricType::Financial, 0.4);
    metric.add_evidence(evidence(EvidenceGrade::E2, 0.8, 0.7));
    metric.score = Some(8.0);
    assert_eq!(metric.calculate_confidence(), metric.calculate_confidence());

    let mut module = EvaluationModule::new("traction", "Traction", ModuleKind::Core, "", 0.3);
    module.metrics.push(metric);
    let first = module.calculate_score();
    assert_eq!(first, module.calculate_score());
    assert_eq!(first, 8.0);
}

#[test]
fn override_supersedes_consensus_value() {
    let mut metric = Metric::new("ndr", MetricType::Traction, 1.0);
    metric.value = Some(MetricValue::Number(4.0));
    metric.apply_override(MetricValue::Number(7.0), "verified with customer calls", "alice");
    assert_eq!(metric.effective_value(), Some(&MetricValue::Number(7.0)));
    assert_eq!(metric.value, Some(MetricValue::Number(4.0)));
}

#[test]
fn module_score_ignores_unscored_metrics() {
    let mut module = EvaluationModule::new("team", "Team", ModuleKind::Core, "", 0.2);
    let mut scored = Metric::new("founder_experience", MetricType::Team, 0.5);
    scored.score = Some(6.0);
    let mut unscored = Metric::new("advisory_board", MetricType::Team, 0.5);
    unscored.value = Some(MetricValue::from("strong"));
    module.metrics = vec![scored, unscored];
    assert_eq!(module.calculate_score(), 6.0);
}

// ── Intake ──

#[test]
fn merge_keeps_first_present_value() {
    let mut first = DocumentIntake::default();
    first.financial_data.arr = Some(1_200_000.0);
    let mut second = DocumentIntake::default();
    second.financial_data.arr = Some(900_000.0);
    second.financial_data.net_burn = Some(150_000.0);

    first.merge(&second);
    assert_eq!(first.financial_data.arr, Some(1_200_000.0));
    assert_eq!(first.financial_data.net_burn, Some(150_000.0));
}

#[test]
fn sanitize_drops_negative_and_non_finite_values() {
    let mut intake = DocumentIntake::default();
    intake.financial_data.cac = Some(-5.0);
    intake.financial_data.arr = Some(f64::NAN);
    intake.financial_data.net_burn = Some(-10_000.0);

    let dropped = intake.sanitize();
    assert_eq!(dropped.len(), 2);
    assert_eq!(intake.financial_data.cac, None);
    assert_eq!(intake.financial_data.arr, None);
    assert_eq!(intake.financial_data.net_burn, Some(-10_000.0));
}

#[test]
fn intake_deserializes_with_missing_keys() {
    let intake: DocumentIntake =
        serde_json::from_str(r#"{"financial_data": {"arr": 1200000}}"#).unwrap();
    assert_eq!(intake.financial_data.arr, Some(1_200_000.0));
    assert_eq!(intake.market_data, MarketData::default());
}

#[test]
fn company_age_ignores_future_founding_dates() {
    let now = Utc::now();
    let mut company = Company::new("Acme");
    company.founded_date = Some(now - Duration::days(400));
    assert_eq!(company.age_days(now), Some(400));
    company.founded_date = Some(now + Duration::days(3));
    assert_eq!(company.age_days(now), None);
}

// ── Evaluation ──

#[test]
fn status_follows_single_forward_path() {
    let mut eval = Evaluation::new(Arc::new(Company::new("Acme")), EvaluationType::FastScan, "system");
    assert_eq!(eval.status(), EvaluationStatus::Pending);
    assert!(eval.transition(EvaluationStatus::Completed).is_err());
    eval.transition(EvaluationStatus::Processing).unwrap();
    eval.transition(EvaluationStatus::Completed).unwrap();
    assert!(eval.completed_at.is_some());
    assert!(eval.status().is_terminal());
    assert!(eval.transition(EvaluationStatus::Failed).is_err());
}

#[test]
fn overall_score_counts_unscored_modules_as_zero() {
    let mut eval = Evaluation::new(Arc::new(Company::new("Acme")), EvaluationType::FastScan, "system");
    let mut a = EvaluationModule::new("team", "Team", ModuleKind::Core, "", 0.5);
    a.score = Some(8.0);
    a.confidence = 0.6;
    let b = EvaluationModule::new("market", "Market", ModuleKind::Core, "", 0.5);
    eval.modules = vec![a, b];

    assert_eq!(eval.calculate_overall_score(), 4.0);
    assert_eq!(eval.calculate_overall_confidence(), 0.3);
    assert_eq!(eval.modules_completed(), 1);
}

#[test]
fn status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&EvaluationStatus::Processing).unwrap(), "\"processing\"");
    assert_eq!(serde_json::to_string(&Recommendation::Invest).unwrap(), "\"invest\"");
    assert_eq!(serde_json::to_string(&CompanyStage::SeriesA).unwrap(), "\"series_a\"");
}

use chrono::Utc;
use glassbox_core::config::EvidenceConfig;
use glassbox_core::models::{EvidenceItem, Metric, MetricType, MetricValue};
use glassbox_evidence::{ConflictResolver, EvidenceProcessor, Observation, QualityContext};

fn item(source_type: &str, value: f64) -> EvidenceItem {
    hinted("revenue", source_type, value)
}

fn hinted(metric_name: &str, source_type: &str, value: f64) -> EvidenceItem {
    let now = Utc::now();
    let observation = Observation {
        metric_name: metric_name.into(),
        value: MetricValue::Number(value),
        source_type: source_type.into(),
        source_ref: format!("{source_type}#{metric_name}"),
        snippet: format!("{}: {value}", metric_name.replace('_', " ")),
        page_ref: None,
        extraction_confidence: 0.9,
        timestamp: now,
        is_primary: true,
        license_valid: true,
    };
    EvidenceProcessor::default().create_evidence_item(&observation, &QualityContext::new(now))
}

fn metric_with(items: Vec<EvidenceItem>) -> Metric {
    let mut metric = Metric::new("revenue", MetricType::Financial, 0.4);
    for e in items {
        metric.add_evidence(e);
    }
    metric
}

#[test]
fn no_evidence_resolves_to_nothing() {
    let mut metric = metric_with(Vec::new());
    let resolution = ConflictResolver::default().resolve(&mut metric);
    assert_eq!(resolution.value, None);
    assert_eq!(resolution.claim_count, 0);
    assert!(!resolution.contested);
    assert!(metric.value.is_none());
}

#[test]
fn single_claim_is_uncontested() {
    let mut metric = metric_with(vec![item("pitch_deck", 1_200_000.0), item("crunchbase", 1_200_000.0)]);
    let resolution = ConflictResolver::default().resolve(&mut metric);
    assert_eq!(resolution.value, Some(MetricValue::Number(1_200_000.0)));
    assert_eq!(resolution.claim_count, 1);
    assert!(!resolution.contested);
    assert!(!metric.contested);
    assert_eq!(metric.value, Some(MetricValue::Number(1_200_000.0)));
}

#[test]
fn heavier_claim_wins_and_light_dissent_is_tolerated() {
    // E3 evidence outweighs an E1 claim by far more than the threshold.
    let mut metric = metric_with(vec![item("pitch_deck", 2_000_000.0), item("stripe_api", 1_100_000.0)]);
    let resolution = ConflictResolver::default().resolve(&mut metric);
    assert_eq!(resolution.value, Some(MetricValue::Number(1_100_000.0)));
    assert!(resolution.runner_up_weight < resolution.weight * 0.3);
    assert!(!resolution.contested);
}

#[test]
fn equal_weight_disagreement_is_contested_and_penalised() {
    let a = item("pitch_deck", 1_000_000.0);
    let b = item("pitch_deck", 1_500_000.0);
    let before = a.source_quality();
    let mut metric = metric_with(vec![a.clone(), b]);

    let resolution = ConflictResolver::default().resolve(&mut metric);
    assert!(resolution.contested);
    assert_eq!(resolution.claim_count, 2);
    // Ties keep first-seen order.
    assert_eq!(resolution.value, Some(MetricValue::Number(1_000_000.0)));
    assert!(metric.contested);

    let penalised = metric.evidence_items().iter().find(|e| e.id == a.id).unwrap();
    assert!((penalised.components().consistency - 0.5).abs() < 1e-12);
    assert!(penalised.source_quality() < before);
}

#[test]
fn consistency_penalty_stops_at_floor() {
    let resolver = ConflictResolver::new(&EvidenceConfig::default());
    let mut metric = metric_with(vec![
        item("pitch_deck", 1.0).with_consistency(0.2),
        item("pitch_deck", 2.0).with_consistency(0.2),
    ]);
    resolver.resolve(&mut metric);
    for e in metric.evidence_items() {
        assert!((e.components().consistency - 0.1).abs() < 1e-12);
    }
}

#[test]
fn evaluate_does_not_touch_metric() {
    let metric = metric_with(vec![item("pitch_deck", 1.0), item("pitch_deck", 2.0)]);
    let resolution = ConflictResolver::default().evaluate(metric.evidence_items());
    assert!(resolution.contested);
    assert!(!metric.contested);
    assert!(metric.value.is_none());
}

#[test]
fn values_for_other_quantities_are_not_rival_claims() {
    let mut metric = Metric::new("burn_rate", MetricType::Financial, 0.4);
    metric.add_evidence(hinted("burn_rate", "pitch_deck", 150_000.0));
    metric.add_evidence(hinted("burn_rate", "financial_statement", 150_000.0));
    metric.add_evidence(hinted("cash_balance", "financial_statement", 2_100_000.0));
    let before: Vec<f64> = metric.evidence_items().iter().map(|e| e.source_quality()).collect();

    let resolution = ConflictResolver::default().resolve(&mut metric);
    assert!(!resolution.contested);
    assert!(!metric.contested);
    assert_eq!(resolution.claim_count, 1);
    assert_eq!(metric.value, Some(MetricValue::Number(150_000.0)));
    let after: Vec<f64> = metric.evidence_items().iter().map(|e| e.source_quality()).collect();
    assert_eq!(before, after);
}

#[test]
fn heaviest_quantity_decides_when_none_is_named_after_the_metric() {
    let mut metric = Metric::new("revenue", MetricType::Financial, 0.4);
    metric.add_evidence(hinted("arr", "pitch_deck", 1_200_000.0));
    metric.add_evidence(hinted("net_new_arr", "pitch_deck", 100_000.0));
    metric.add_evidence(hinted("revenue_growth", "pitch_deck", 90.0));
    metric.add_evidence(hinted("arr", "pitch_deck", 1_200_000.0));

    let resolution = ConflictResolver::default().resolve(&mut metric);
    assert!(!resolution.contested);
    assert_eq!(resolution.value, Some(MetricValue::Number(1_200_000.0)));
}

#[test]
fn disagreement_within_one_quantity_penalises_only_that_quantity() {
    let mut metric = Metric::new("revenue", MetricType::Financial, 0.4);
    metric.add_evidence(hinted("arr", "pitch_deck", 1_200_000.0));
    metric.add_evidence(hinted("arr", "pitch_deck", 900_000.0));
    let bystander = hinted("revenue_growth", "pitch_deck", 90.0);
    metric.add_evidence(bystander.clone());

    let resolution = ConflictResolver::default().resolve(&mut metric);
    assert!(resolution.contested);
    assert_eq!(resolution.claim_count, 2);
    let untouched = metric.evidence_items().iter().find(|e| e.id == bystander.id).unwrap();
    assert_eq!(untouched.source_quality(), bystander.source_quality());
}

#[test]
fn evaluate_for_prefers_the_named_quantity() {
    let items = vec![
        hinted("arr", "pitch_deck", 1.0),
        hinted("arr", "pitch_deck", 2.0),
        hinted("revenue", "pitch_deck", 5.0),
    ];
    let resolver = ConflictResolver::default();
    let named = resolver.evaluate_for(Some("revenue"), &items);
    assert!(!named.contested);
    assert_eq!(named.value, Some(MetricValue::Number(5.0)));
    assert!(resolver.evaluate(&items).contested);
}

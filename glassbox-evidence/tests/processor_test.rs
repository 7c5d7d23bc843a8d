use chrono::{TimeZone, Utc};
use glassbox_core::models::{
    Company, DocumentKind, EvidenceGrade, ExternalPayload, ExternalRecord, MetricValue,
};
use glassbox_evidence::ingestion::{self, snippet_for, COMPANY_PROFILE_SOURCE};
use glassbox_evidence::{EvidenceProcessor, Observation, QualityContext};
use test_fixtures::load_fixture;

fn observation(source_type: &str, metric: &str, value: f64) -> Observation {
    let value = MetricValue::Number(value);
    Observation {
        metric_name: metric.into(),
        snippet: snippet_for(metric, &value),
        value,
        source_type: source_type.into(),
        source_ref: format!("{source_type}#{metric}"),
        page_ref: None,
        extraction_confidence: 0.8,
        timestamp: Utc::now(),
        is_primary: true,
        license_valid: true,
    }
}

// ── Ingestion ──

#[test]
fn snippets_use_spaced_metric_names() {
    assert_eq!(snippet_for("burn_rate", &MetricValue::Number(150000.0)), "burn rate: 150000");
}

#[test]
fn company_fixture_yields_document_observations() {
    let company: Company = load_fixture("companies/b2b_saas_seed.json");
    let observations = ingestion::from_company(&company, Utc::now());

    let deck: Vec<&Observation> = observations.iter().filter(|o| o.source_type == "pitch_deck").collect();
    let statement: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.source_type == "financial_statement")
        .collect();
    assert!(deck.iter().any(|o| o.metric_name == "arr" && o.value == MetricValue::Number(1_200_000.0)));
    assert!(statement.iter().any(|o| o.metric_name == "arr" && o.value == MetricValue::Number(1_150_000.0)));
    assert!(statement.iter().all(|o| (o.extraction_confidence - 0.95).abs() < 1e-12));
    assert!(deck.iter().any(|o| o.metric_name == "burn_rate" && o.snippet == "burn rate: 150000"));
    assert!(observations.iter().all(|o| o.source_type != COMPANY_PROFILE_SOURCE));
}

#[test]
fn malformed_intake_fields_are_dropped() {
    let mut company = Company::new("Broken Books");
    company.intake.financial_data.cac = Some(-5.0);
    company.intake.financial_data.arr = Some(f64::NAN);
    company.intake.financial_data.net_burn = Some(80_000.0);

    let observations = ingestion::from_company(&company, Utc::now());
    assert!(observations.iter().all(|o| o.metric_name != "cac" && o.metric_name != "arr"));
    assert!(observations
        .iter()
        .any(|o| o.metric_name == "burn_rate" && o.source_type == COMPANY_PROFILE_SOURCE));
}

#[test]
fn document_kind_maps_to_source_type() {
    assert_eq!(DocumentKind::PitchDeck.source_type(), "pitch_deck");
    assert_eq!(DocumentKind::Other.source_type(), "self_reported");
}

#[test]
fn payload_observations_follow_source_grade() {
    let retrieved_at = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
    let payload = ExternalPayload {
        source_type: "crunchbase".into(),
        source_ref: "crunchbase:ledgerly".into(),
        records: vec![ExternalRecord {
            metric_name: "headcount".into(),
            value: MetricValue::Number(14.0),
        }],
        retrieved_at,
        license_valid: false,
    };
    let observations = ingestion::from_payload(&payload);
    assert_eq!(observations.len(), 1);
    let o = &observations[0];
    assert_eq!(o.grade(), EvidenceGrade::E2);
    assert!(!o.is_primary);
    assert!(!o.license_valid);
    assert_eq!(o.source_ref, "crunchbase:ledgerly#headcount");
    assert_eq!(o.timestamp, retrieved_at);
    assert!((o.extraction_confidence - 0.85).abs() < 1e-12);
}

// ── Processing ──

#[test]
fn created_item_carries_observation_and_quality() {
    let processor = EvidenceProcessor::default();
    let obs = observation("stripe_api", "mrr", 100_000.0);
    let item = processor.create_evidence_item(&obs, &QualityContext::new(Utc::now()));

    assert_eq!(item.grade, EvidenceGrade::E3);
    assert_eq!(item.metric_hint.as_deref(), Some("mrr"));
    assert_eq!(item.claimed_value, Some(MetricValue::Number(100_000.0)));
    assert_eq!(item.snippet.as_deref(), Some("mrr: 100000"));
    assert!((item.source_quality() - item.components().sqs()).abs() < 1e-12);
    assert!(item.source_quality() > 0.0 && item.source_quality() <= 1.0);
}

#[test]
fn agreeing_sources_cross_reference_each_other() {
    let observations = vec![
        observation("pitch_deck", "arr", 1_200_000.0),
        observation("crunchbase", "arr", 1_200_000.0),
        observation("stripe_api", "arr", 1_200_000.0),
        observation("linkedin", "arr", 900_000.0),
        // Same source type twice counts once.
        observation("crunchbase", "arr", 1_200_000.0),
    ];
    let items = EvidenceProcessor::default().process(&observations, Utc::now());
    assert_eq!(items.len(), observations.len());

    let independence = |i: usize| items[i].components().independence;
    // Two other source types agree with the deck: 0.3 + 0.7 × 2 / 5.
    assert!((independence(0) - 0.58).abs() < 1e-12);
    assert!((independence(3) - 0.3).abs() < 1e-12);
}

#[test]
fn cross_references_are_scoped_to_the_metric() {
    let observations = vec![
        observation("pitch_deck", "arr", 100.0),
        observation("crunchbase", "mrr", 100.0),
    ];
    let items = EvidenceProcessor::default().process(&observations, Utc::now());
    assert!(items.iter().all(|e| (e.components().independence - 0.3).abs() < 1e-12));
}

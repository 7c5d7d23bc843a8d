use glassbox_core::errors::FormulaError;
use glassbox_core::models::{FormulaInputs, SignalKind};
use glassbox_core::traits::IScoringSignalProvider;
use glassbox_scoring::formulas::{self, burn_multiple, cac_payback, gross_margin, ltv_cac_ratio, rule_of_40};
use glassbox_scoring::HeuristicSignalProvider;
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── CAC payback ──

#[test]
fn cac_payback_breakpoints() {
    assert!(close(cac_payback(500.0, 100.0).score, 10.0));
    assert!(close(cac_payback(900.0, 100.0).score, 9.0));
    assert!(close(cac_payback(1800.0, 100.0).score, 7.0));
    assert!(close(cac_payback(3000.0, 100.0).score, 4.0));
    assert!(close(cac_payback(4000.0, 100.0).score, 1.0));
}

#[test]
fn cac_payback_without_revenue_is_a_sentinel() {
    let outcome = cac_payback(500.0, 0.0);
    assert_eq!(outcome.score, 0.0);
    assert!(outcome.explanation.contains("monthly_revenue_per_customer"));
}

proptest! {
    #[test]
    fn cac_payback_is_non_increasing_in_cac(
        cac in 0.0f64..100_000.0,
        extra in 0.0f64..100_000.0,
        revenue in 1.0f64..10_000.0,
    ) {
        let cheaper = cac_payback(cac, revenue).score;
        let dearer = cac_payback(cac + extra, revenue).score;
        prop_assert!(dearer <= cheaper + 1e-9);
    }

    #[test]
    fn cac_payback_is_non_decreasing_in_revenue(
        cac in 0.0f64..100_000.0,
        revenue in 1.0f64..10_000.0,
        extra in 0.0f64..10_000.0,
    ) {
        let lower = cac_payback(cac, revenue).score;
        let higher = cac_payback(cac, revenue + extra).score;
        prop_assert!(higher + 1e-9 >= lower);
    }

    #[test]
    fn deterministic_scores_stay_in_range(a in -1e7f64..1e7, b in -1e7f64..1e7) {
        for outcome in [
            cac_payback(a, b),
            ltv_cac_ratio(a, b),
            burn_multiple(a, b),
            rule_of_40(a, b),
            gross_margin(a, b),
        ] {
            prop_assert!((0.0..=10.0).contains(&outcome.score));
        }
    }
}

// ── Other formulas ──

#[test]
fn ltv_cac_ratio_interpolates() {
    assert!(close(ltv_cac_ratio(2400.0, 500.0).score, 9.8));
    assert!(close(ltv_cac_ratio(6000.0, 1000.0).score, 10.0));
    assert!(close(ltv_cac_ratio(1500.0, 1000.0).score, 5.0));
    assert!(close(ltv_cac_ratio(500.0, 1000.0).score, 1.0));
    assert_eq!(ltv_cac_ratio(2400.0, 0.0).score, 0.0);
}

#[test]
fn burn_multiple_of_one_and_a_half_scores_nine() {
    let outcome = burn_multiple(150_000.0, 100_000.0);
    assert!(close(outcome.score, 9.0));
    assert!(outcome.explanation.contains("1.5x"));
}

#[test]
fn burn_multiple_without_arr_growth() {
    assert_eq!(burn_multiple(0.0, 0.0).score, 10.0);
    assert_eq!(burn_multiple(-10.0, -5.0).score, 10.0);
    assert_eq!(burn_multiple(50_000.0, 0.0).score, 1.0);
    assert_eq!(burn_multiple(600_000.0, 100_000.0).score, 2.0);
}

#[test]
fn rule_of_40_bands() {
    assert!(close(rule_of_40(90.0, -40.0).score, 10.0));
    assert!(close(rule_of_40(60.0, 0.0).score, 10.0));
    assert!(close(rule_of_40(30.0, 5.0).score, 7.0));
    assert!(close(rule_of_40(10.0, 0.0).score, 1.0));
    assert_eq!(rule_of_40(10.0, -30.0).score, 0.0);
}

#[test]
fn gross_margin_against_industry() {
    assert!(close(gross_margin(55.0, 80.0).score, 4.875));
    assert!(close(gross_margin(90.0, 80.0).score, 9.0));
    assert!(close(gross_margin(120.0, 80.0).score, 10.0));
    assert!(close(gross_margin(70.0, 80.0).score, 6.75));
    assert!(close(gross_margin(24.0, 80.0).score, 2.0));
    assert_eq!(gross_margin(-5.0, 80.0).score, 0.0);
}

#[test]
fn industry_benchmarks_resolve_by_name() {
    assert_eq!(formulas::industry_gross_margin_benchmark("B2B SaaS"), Some(80.0));
    assert_eq!(formulas::industry_gross_margin_benchmark("Fintech"), None);

    let unknown = FormulaInputs::new()
        .with("gross_margin", 60.0)
        .with_label("industry", "Fintech");
    let outcome = formulas::evaluate(formulas::GROSS_MARGIN, &unknown, 60.0).unwrap().unwrap();
    assert!(close(outcome.score, 8.0));
}

#[test]
fn evaluate_reports_missing_inputs() {
    let inputs = FormulaInputs::new().with("net_burn", 1.0);
    let err = formulas::evaluate(formulas::BURN_MULTIPLE, &inputs, 60.0).unwrap().unwrap_err();
    assert_eq!(
        err,
        FormulaError::MissingInput {
            formula: "burn_multiple".into(),
            input: "net_new_arr".into()
        }
    );
}

#[test]
fn evaluate_rejects_non_finite_inputs() {
    let inputs = FormulaInputs::new().with("ltv", f64::NAN).with("cac", 10.0);
    let err = formulas::evaluate(formulas::LTV_CAC_RATIO, &inputs, 60.0).unwrap().unwrap_err();
    assert!(matches!(err, FormulaError::NonFinite { .. }));
}

#[test]
fn evaluate_ignores_signal_ids() {
    assert!(formulas::evaluate("team_credibility", &FormulaInputs::new(), 60.0).is_none());
}

// ── Signals ──

#[test]
fn team_credibility_caps_at_ten() {
    let inputs = FormulaInputs::new()
        .with("previous_exits", 1.0)
        .with("experience_years", 12.0)
        .with("education_tier", 3.0)
        .with("linkedin_connections", 2400.0);
    assert!(close(HeuristicSignalProvider::team_credibility(&inputs).score, 10.0));
}

#[test]
fn signals_use_neutral_defaults() {
    let empty = FormulaInputs::new();
    assert!(close(HeuristicSignalProvider::team_credibility(&empty).score, 1.5));
    assert!(close(HeuristicSignalProvider::market_sentiment(&empty).score, 4.375));
    assert!(close(HeuristicSignalProvider::product_differentiation(&empty).score, 5.0));
}

#[test]
fn provider_dispatches_by_signal_kind() {
    let provider = HeuristicSignalProvider::new();
    let inputs = FormulaInputs::new()
        .with("uniqueness_score", 1.0)
        .with("complexity_score", 1.0)
        .with("patent_strength", 0.0);
    let outcome = provider
        .score_signal(SignalKind::ProductDifferentiation, &inputs)
        .unwrap();
    assert!(close(outcome.score, 7.0));
    assert_eq!(provider.name(), "heuristic");
}

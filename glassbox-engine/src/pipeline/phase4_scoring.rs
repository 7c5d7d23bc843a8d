//! Phase 4: module scoring.

use std::collections::HashMap;

use serde_json::json;
use tracing::instrument;

use glassbox_core::models::{
    AuditAction, AuditActor, Benchmark, Classification, Company, Evaluation, EvaluationModule,
    FormulaInputs, Risk, SignalKind,
};
use glassbox_scoring::formulas::{BURN_MULTIPLE, CAC_PAYBACK, GROSS_MARGIN, LTV_CAC_RATIO, RULE_OF_40};
use glassbox_scoring::{CompanyData, ScoringEngine};

use crate::engine::EngineInner;

fn put(inputs: &mut FormulaInputs, name: &str, value: Option<f64>) {
    if let Some(value) = value {
        inputs.set(name, value);
    }
}

/// Formula inputs derived from the company's merged intake and team.
///
/// Absent values are left out: deterministic formulas then report a
/// missing input, and signals fall back to their neutral defaults.
pub fn extract_company_data(company: &Company, classification: &Classification) -> CompanyData {
    let mut intake = company.merged_intake();
    intake.sanitize();
    let f = &intake.financial_data;
    let m = &intake.market_data;
    let p = &intake.company_info.product;

    let mut data = CompanyData::new();

    let inputs = data.entry(CAC_PAYBACK.to_string()).or_default();
    put(inputs, "cac", f.cac);
    put(inputs, "monthly_revenue_per_customer", f.monthly_revenue_per_customer);

    let inputs = data.entry(LTV_CAC_RATIO.to_string()).or_default();
    put(inputs, "ltv", f.ltv);
    put(inputs, "cac", f.cac);

    let inputs = data.entry(BURN_MULTIPLE.to_string()).or_default();
    put(inputs, "net_burn", f.net_burn);
    put(inputs, "net_new_arr", f.net_new_arr);

    let inputs = data.entry(RULE_OF_40.to_string()).or_default();
    put(inputs, "growth_rate", f.revenue_growth_pct);
    put(inputs, "profit_margin", f.profit_margin_pct);

    let mut gross_margin =
        FormulaInputs::new().with_label("industry", classification.primary_domain.clone());
    put(&mut gross_margin, "gross_margin", f.gross_margin_pct);
    data.insert(GROSS_MARGIN.to_string(), gross_margin);

    let team = &company.team;
    let inputs = data.entry(SignalKind::TeamCredibility.as_str().to_string()).or_default();
    if !team.is_empty() {
        inputs.set("previous_exits", f64::from(company.team_exits()));
    }
    put(
        inputs,
        "experience_years",
        team.iter().filter_map(|p| p.experience_years).reduce(f64::max),
    );
    put(
        inputs,
        "education_tier",
        team.iter().filter_map(|p| p.education_tier).max().map(f64::from),
    );
    put(
        inputs,
        "linkedin_connections",
        team.iter()
            .filter_map(|p| p.linkedin_connections)
            .reduce(|a, b| a.saturating_add(b))
            .map(f64::from),
    );

    let inputs = data.entry(SignalKind::MarketSentiment.as_str().to_string()).or_default();
    put(inputs, "news_sentiment", m.news_sentiment);
    put(inputs, "search_trends", m.search_trends);
    put(inputs, "funding_activity", m.funding_activity);
    put(inputs, "regulatory_sentiment", m.regulatory_sentiment);

    let inputs = data
        .entry(SignalKind::ProductDifferentiation.as_str().to_string())
        .or_default();
    put(inputs, "uniqueness_score", p.uniqueness_score);
    put(inputs, "complexity_score", p.complexity_score);
    put(inputs, "patent_strength", p.patent_strength);

    data
}

/// Score copies of `modules` and apply the same risk penalties. Used for
/// counterfactual re-scoring; the originals are left untouched.
pub fn rescore(
    scoring: &ScoringEngine,
    modules: &[EvaluationModule],
    data: &CompanyData,
    benchmarks: &HashMap<String, Benchmark>,
    risks: &[Risk],
) -> Vec<EvaluationModule> {
    let mut modules = modules.to_vec();
    for module in modules.iter_mut() {
        scoring.score_module(module, data, Some(benchmarks));
        scoring.apply_risk_adjustment(module, risks);
    }
    modules
}

#[instrument(name = "glassbox.stage", skip_all, fields(stage = "scoring"))]
pub(crate) fn run(inner: &EngineInner, evaluation: &mut Evaluation, classification: &Classification) {
    let data = extract_company_data(&evaluation.company, classification);
    let benchmarks = inner
        .benchmarks
        .for_context(&classification.primary_domain, classification.stage);

    let mut entries = Vec::with_capacity(evaluation.modules.len());
    for module in evaluation.modules.iter_mut() {
        let breakdown = inner.scoring.score_module(module, &data, Some(&benchmarks));
        let evidence_count: usize = module.metrics.iter().map(|m| m.evidence_items().len()).sum();
        entries.push(json!({
            "module_id": module.id,
            "score": breakdown.final_score,
            "confidence": breakdown.confidence,
            "formulas_used": breakdown.formulas_used,
            "evidence_count": evidence_count,
        }));
    }
    for details in entries {
        evaluation.record(AuditAction::ModuleScored, details, AuditActor::System);
    }
    evaluation.refresh_overall();
}

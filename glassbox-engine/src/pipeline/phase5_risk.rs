//! Phase 5: rule-based risk assessment.
//!
//! Regulatory and market risks feed the score penalty applied by the
//! scoring engine. Financial, team and evidence risks are reported only.

use serde_json::json;
use tracing::instrument;

use glassbox_core::models::{
    AuditAction, AuditActor, Classification, Company, DocumentIntake, Evaluation, EvaluationModule,
    Risk, RiskCategory,
};

use crate::engine::EngineInner;

/// Domains operating under sector regulators.
pub const REGULATED_DOMAINS: &[&str] = &["Fintech", "Healthcare", "Biotech/Deep Tech"];

const HOSTILE_REGULATORY_SENTIMENT: f64 = 0.4;
const CROWDED_MARKET_COMPETITORS: u32 = 10;
const MIN_RUNWAY_MONTHS: f64 = 12.0;
const HIGH_SEVERITY: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAssessor;

impl RiskAssessor {
    pub fn new() -> Self {
        Self
    }

    /// At most one risk per category, in category order.
    pub fn assess(
        &self,
        company: &Company,
        classification: &Classification,
        modules: &[EvaluationModule],
    ) -> Vec<Risk> {
        let mut intake = company.merged_intake();
        intake.sanitize();

        [
            regulatory(classification, &intake),
            market(&intake),
            financial(&intake),
            team(company, &intake),
            evidence(modules),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn regulatory(classification: &Classification, intake: &DocumentIntake) -> Option<Risk> {
    let primary = classification.primary_domain.as_str();
    let regulated = REGULATED_DOMAINS.contains(&primary);
    let sentiment = intake.market_data.regulatory_sentiment;
    let hostile = sentiment.is_some_and(|s| s < HOSTILE_REGULATORY_SENTIMENT);
    if !regulated && !hostile {
        return None;
    }

    let mut reasons = Vec::new();
    if regulated {
        reasons.push(format!("operates in regulated domain ({primary})"));
    }
    if hostile {
        reasons.push("regulatory sentiment is unfavourable".to_string());
    }
    let severity = if regulated { 0.6 } else { 0.4 };
    let likelihood = sentiment.map_or(0.5, |s| 1.0 - s.min(1.0));
    Some(
        Risk::new(RiskCategory::Regulatory, sentence(&reasons), severity, likelihood)
            .with_mitigation("Engage regulatory counsel early and budget for licensing"),
    )
}

fn market(intake: &DocumentIntake) -> Option<Risk> {
    let market = &intake.market_data;
    let crowded = market
        .competitor_count
        .filter(|&c| c >= CROWDED_MARKET_COMPETITORS);
    let negative_news = market.news_sentiment.filter(|&n| n < 0.0);
    if crowded.is_none() && negative_news.is_none() {
        return None;
    }

    let mut reasons = Vec::new();
    if let Some(count) = crowded {
        reasons.push(format!("crowded market with {count} competitors"));
    }
    if negative_news.is_some() {
        reasons.push("negative news sentiment".to_string());
    }
    let severity = if crowded.is_some() { 0.7 } else { 0.5 };
    let likelihood = market
        .news_sentiment
        .map_or(0.6, |n| ((1.0 - n) / 2.0).clamp(0.0, 1.0));
    Some(
        Risk::new(RiskCategory::Market, sentence(&reasons), severity, likelihood)
            .with_mitigation("Focus on defensible moats and rapid scaling"),
    )
}

/// Runway in months, treating `net_burn` as monthly.
fn runway_months(intake: &DocumentIntake) -> Option<f64> {
    let f = &intake.financial_data;
    match (f.cash_balance, f.net_burn) {
        (Some(cash), Some(burn)) if burn > 0.0 => Some(cash / burn),
        _ => None,
    }
}

fn financial(intake: &DocumentIntake) -> Option<Risk> {
    let runway = runway_months(intake).filter(|&m| m < MIN_RUNWAY_MONTHS)?;
    Some(
        Risk::new(
            RiskCategory::Financial,
            format!("Runway of {runway:.1} months is below {MIN_RUNWAY_MONTHS:.0}"),
            0.8,
            1.0 - runway / MIN_RUNWAY_MONTHS,
        )
        .with_mitigation("Plan the next raise or cut burn before runway drops below six months"),
    )
}

fn team(company: &Company, intake: &DocumentIntake) -> Option<Risk> {
    let founders = intake
        .team_data
        .founder_count
        .unwrap_or(company.team.len() as u32);
    let single_founder = founders <= 1;
    let inexperienced = company.team.iter().all(|p| {
        p.previous_exits == 0 && p.experience_years.map_or(true, |y| y <= 0.0)
    });
    if !single_founder && !inexperienced {
        return None;
    }

    let mut reasons = Vec::new();
    if single_founder {
        reasons.push("single-founder team".to_string());
    }
    if inexperienced {
        reasons.push("no recorded operating experience or exits".to_string());
    }
    let severity = if single_founder && inexperienced { 0.7 } else { 0.5 };
    Some(
        Risk::new(RiskCategory::Team, sentence(&reasons), severity, 0.5)
            .with_mitigation("Check references and plan key hires"),
    )
}

fn evidence(modules: &[EvaluationModule]) -> Option<Risk> {
    let contested: Vec<&str> = modules
        .iter()
        .flat_map(|m| m.metrics.iter())
        .filter(|m| m.contested)
        .map(|m| m.name.as_str())
        .collect();
    if contested.is_empty() {
        return None;
    }
    let linked = modules
        .iter()
        .flat_map(|m| m.metrics.iter())
        .filter(|m| !m.evidence_items().is_empty())
        .count()
        .max(1);
    Some(
        Risk::new(
            RiskCategory::Evidence,
            format!("Conflicting evidence for {}", contested.join(", ")),
            0.4,
            contested.len() as f64 / linked as f64,
        )
        .with_mitigation("Verify contested metrics against a primary source"),
    )
}

/// `["a", "b"]` → `"A; b"`.
fn sentence(reasons: &[String]) -> String {
    let joined = reasons.join("; ");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => joined,
    }
}

#[instrument(name = "glassbox.stage", skip_all, fields(stage = "risk"))]
pub(crate) fn run(inner: &EngineInner, evaluation: &mut Evaluation, classification: &Classification) {
    let risks = inner
        .risk
        .assess(&evaluation.company, classification, &evaluation.modules);

    let mut penalty = 0.0;
    for module in evaluation.modules.iter_mut() {
        penalty += inner.scoring.apply_risk_adjustment(module, &risks) * module.weight;
    }

    let categories: Vec<&str> = risks.iter().map(|r| r.category.as_str()).collect();
    evaluation.record(
        AuditAction::RisksAssessed,
        json!({
            "risk_count": risks.len(),
            "high_severity_risks": risks.iter().filter(|r| r.severity > HIGH_SEVERITY).count(),
            "categories": categories,
            "overall_penalty": penalty,
        }),
        AuditActor::System,
    );
    evaluation.risks = risks;
    evaluation.refresh_overall();
}

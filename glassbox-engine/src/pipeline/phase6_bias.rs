//! Phase 6: identity-blind counterfactual scoring.
//!
//! Each feature category is neutralised on its own and the evaluation is
//! re-scored. A category is flagged when removing it shifts the overall
//! score by at least the configured threshold or changes the
//! recommendation. The identity-blind score neutralises every category
//! at once.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use glassbox_core::config::BiasConfig;
use glassbox_core::models::{
    AuditAction, AuditActor, BiasFeature, BiasReport, Classification, Company, Evaluation,
    EvaluationModule,
};

use super::phase4_scoring;
use super::phase7_decision::DecisionMaker;
use crate::engine::EngineInner;

/// Education tier every founder is assigned when education is neutralised.
pub const BASELINE_EDUCATION_TIER: u8 = 1;

/// A copy of `company` with the given feature categories removed from the team.
pub fn neutralise(company: &Company, features: &[BiasFeature]) -> Company {
    let mut company = company.clone();
    for person in company.team.iter_mut() {
        for feature in features {
            match feature {
                BiasFeature::Education => {
                    person.education = None;
                    person.education_tier = Some(BASELINE_EDUCATION_TIER);
                }
                BiasFeature::Network => {
                    person.linkedin_connections = Some(0);
                    person.linkedin_url = None;
                }
                BiasFeature::NameInferable => {
                    person.name.clear();
                    person.email = None;
                }
            }
        }
    }
    company
}

#[derive(Debug, Clone)]
pub struct BiasAnalyzer {
    flag_threshold: f64,
    decision: DecisionMaker,
}

impl Default for BiasAnalyzer {
    fn default() -> Self {
        Self::new(&BiasConfig::default(), DecisionMaker::default())
    }
}

impl BiasAnalyzer {
    pub fn new(config: &BiasConfig, decision: DecisionMaker) -> Self {
        Self {
            flag_threshold: config.flag_threshold,
            decision,
        }
    }

    /// Compare the evaluation's current overall score with counterfactual
    /// scores. `rescore` produces scored modules for a neutralised company.
    pub fn analyze<F>(&self, evaluation: &Evaluation, mut rescore: F) -> BiasReport
    where
        F: FnMut(&Company) -> Vec<EvaluationModule>,
    {
        let full_score = evaluation.calculate_overall_score();
        let full_confidence = evaluation.calculate_overall_confidence();
        let full_call = self.decision.recommend(full_score, full_confidence);

        let mut contributing_factors = Vec::new();
        let mut flagged_features = Vec::new();
        for feature in BiasFeature::ALL {
            let (score, confidence) = counterfactual(evaluation, &[feature], &mut rescore);
            let delta = full_score - score;
            contributing_factors.push(format!("{}: {delta:+.2}", feature.as_str()));
            let flips = self.decision.recommend(score, confidence) != full_call;
            if delta.abs() >= self.flag_threshold || flips {
                flagged_features.push(feature);
            }
        }

        let (identity_blind_score, _) = counterfactual(evaluation, &BiasFeature::ALL, &mut rescore);
        BiasReport {
            identity_blind_score,
            full_score,
            bias_delta: full_score - identity_blind_score,
            contributing_factors,
            flagged_features,
            confidence: full_confidence,
        }
    }
}

fn counterfactual<F>(evaluation: &Evaluation, features: &[BiasFeature], rescore: &mut F) -> (f64, f64)
where
    F: FnMut(&Company) -> Vec<EvaluationModule>,
{
    let company = Arc::new(neutralise(&evaluation.company, features));
    let modules = rescore(&company);
    let mut shadow = Evaluation::new(company, evaluation.evaluation_type, evaluation.analyst.as_str());
    shadow.modules = modules;
    (shadow.calculate_overall_score(), shadow.calculate_overall_confidence())
}

#[instrument(name = "glassbox.stage", skip_all, fields(stage = "bias"))]
pub(crate) fn run(inner: &EngineInner, evaluation: &mut Evaluation, classification: &Classification) {
    let benchmarks = inner
        .benchmarks
        .for_context(&classification.primary_domain, classification.stage);
    let report = inner.bias.analyze(evaluation, |company| {
        let data = phase4_scoring::extract_company_data(company, classification);
        phase4_scoring::rescore(
            &inner.scoring,
            &evaluation.modules,
            &data,
            &benchmarks,
            &evaluation.risks,
        )
    });

    let flagged: Vec<&str> = report.flagged_features.iter().map(|f| f.as_str()).collect();
    evaluation.record(
        AuditAction::BiasAnalyzed,
        json!({
            "identity_blind_score": report.identity_blind_score,
            "full_score": report.full_score,
            "bias_delta": report.bias_delta,
            "flagged_features": flagged,
        }),
        AuditActor::System,
    );
    evaluation.bias_report = Some(report);
}

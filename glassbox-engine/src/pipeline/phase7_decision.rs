//! Phase 7: recommendation and rationale.

use chrono::Utc;
use serde_json::json;
use tracing::instrument;

use glassbox_core::config::DecisionConfig;
use glassbox_core::constants::DECISION_AUTHOR;
use glassbox_core::models::{AuditAction, AuditActor, Decision, Evaluation, Recommendation};

use crate::engine::EngineInner;

const STANDARD_FOLLOW_UPS: [&str; 3] = [
    "Request detailed financial projections",
    "Schedule technical deep dive",
    "Check references from previous employers",
];

#[derive(Debug, Clone, Default)]
pub struct DecisionMaker {
    config: DecisionConfig,
}

impl DecisionMaker {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    /// Invest above both invest thresholds, monitor above both monitor
    /// thresholds, otherwise pass.
    pub fn recommend(&self, score: f64, confidence: f64) -> Recommendation {
        let c = &self.config;
        if score >= c.invest_score && confidence >= c.invest_confidence {
            Recommendation::Invest
        } else if score >= c.monitor_score && confidence >= c.monitor_confidence {
            Recommendation::Monitor
        } else {
            Recommendation::Pass
        }
    }

    /// Build a decision from the evaluation's current modules, risks and
    /// bias report. Modules scoring exactly zero are neither strengths nor
    /// concerns: they had nothing to score.
    pub fn decide(&self, evaluation: &Evaluation) -> Decision {
        let score = evaluation.calculate_overall_score();
        let confidence = evaluation.calculate_overall_confidence();
        let recommendation = self.recommend(score, confidence);

        let mut key_strengths = Vec::new();
        let mut key_concerns = Vec::new();
        for module in &evaluation.modules {
            let Some(module_score) = module.score.filter(|s| *s > 0.0) else {
                continue;
            };
            let name = module.name.to_lowercase();
            if module_score > self.config.strength_threshold {
                key_strengths.push(format!("Strong {name} (Score: {module_score:.1})"));
            } else if module_score < self.config.concern_threshold {
                key_concerns.push(format!("Weak {name} (Score: {module_score:.1})"));
            }
        }

        let mut follow_up_items: Vec<String> =
            STANDARD_FOLLOW_UPS.iter().map(|s| s.to_string()).collect();
        follow_up_items.extend(
            evaluation
                .modules
                .iter()
                .flat_map(|m| m.metrics.iter())
                .filter(|m| m.contested)
                .map(|m| format!("Resolve conflicting evidence for {}", m.name)),
        );
        if let Some(report) = evaluation.bias_report.as_ref().filter(|r| r.is_flagged()) {
            let features: Vec<&str> = report.flagged_features.iter().map(|f| f.as_str()).collect();
            follow_up_items.push(format!(
                "Review score sensitivity to {}",
                features.join(", ")
            ));
        }

        Decision {
            id: uuid::Uuid::new_v4().to_string(),
            recommendation,
            confidence,
            rationale: format!(
                "Overall score: {score:.1}/10 with {:.1}% confidence",
                confidence * 100.0
            ),
            key_strengths,
            key_concerns,
            follow_up_items,
            analyst: DECISION_AUTHOR.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[instrument(name = "glassbox.stage", skip_all, fields(stage = "decision"))]
pub(crate) fn run(inner: &EngineInner, evaluation: &mut Evaluation) {
    evaluation.refresh_overall();
    let decision = inner.decision.decide(evaluation);
    evaluation.record(
        AuditAction::DecisionGenerated,
        json!({
            "recommendation": decision.recommendation.as_str(),
            "overall_score": evaluation.overall_score,
            "confidence": decision.confidence,
            "strengths": decision.key_strengths.len(),
            "concerns": decision.key_concerns.len(),
        }),
        AuditActor::System,
    );
    evaluation.decision = Some(decision);
}

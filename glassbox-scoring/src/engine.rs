//! Metric and module scoring.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use glassbox_core::config::ScoringConfig;
use glassbox_core::constants::MAX_SCORE;
use glassbox_core::errors::{GlassBoxResult, LookupError};
use glassbox_core::models::{
    Benchmark, EvaluationModule, FormulaInputs, FormulaKind, FormulaOutcome, Metric, Risk,
    ScoreBreakdown,
};
use glassbox_core::traits::IScoringSignalProvider;

use crate::benchmark;
use crate::formulas;
use crate::registry;
use crate::risk::RiskAdjuster;
use crate::signals::HeuristicSignalProvider;

/// Formula inputs keyed by formula id.
pub type CompanyData = BTreeMap<String, FormulaInputs>;

/// Hybrid scoring engine: deterministic formulas plus an injected signal provider.
#[derive(Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    signals: Arc<dyn IScoringSignalProvider>,
    risk: RiskAdjuster,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::with_heuristics(ScoringConfig::default())
    }
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig, signals: Arc<dyn IScoringSignalProvider>) -> Self {
        Self {
            risk: RiskAdjuster::new(&config),
            config,
            signals,
        }
    }

    /// Engine backed by [`HeuristicSignalProvider`].
    pub fn with_heuristics(config: ScoringConfig) -> Self {
        Self::new(config, Arc::new(HeuristicSignalProvider::new()))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn signal_provider(&self) -> &dyn IScoringSignalProvider {
        self.signals.as_ref()
    }

    /// Raw formula outcome, before benchmark nudges. Signal scores are
    /// clamped into [0, 10] here.
    pub fn evaluate_formula(&self, formula_id: &str, inputs: &FormulaInputs) -> GlassBoxResult<FormulaOutcome> {
        let spec = registry::formula(formula_id)?;
        let outcome = match spec.signal {
            Some(kind) => self.signals.score_signal(kind, inputs)?,
            None => formulas::evaluate(spec.id, inputs, self.config.default_gross_margin_benchmark)
                .ok_or_else(|| LookupError::UnknownFormula {
                    id: formula_id.to_string(),
                })??,
        };
        Ok(FormulaOutcome::new(outcome.score, outcome.explanation))
    }

    /// Score one metric with one formula.
    ///
    /// Only an unknown formula id is an error. A formula that cannot be
    /// evaluated yields a zero score at the configured error confidence.
    pub fn score_metric(
        &self,
        metric: &Metric,
        formula_id: &str,
        inputs: &FormulaInputs,
        benchmark: Option<&Benchmark>,
    ) -> GlassBoxResult<ScoreBreakdown> {
        let spec = registry::formula(formula_id)?;

        let outcome = match self.evaluate_formula(formula_id, inputs) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(metric = %metric.name, formula = formula_id, error = %e, "formula fell back to zero score");
                return Ok(ScoreBreakdown {
                    final_score: 0.0,
                    confidence: self.config.error_confidence,
                    components: BTreeMap::from([(formula_id.to_string(), 0.0)]),
                    formulas_used: vec![formula_id.to_string()],
                    evidence_summary: vec![format!("Error in {formula_id}: {e}")],
                    ..ScoreBreakdown::default()
                });
            }
        };

        let mut score = outcome.score;
        let mut benchmark_comparison = Vec::new();
        if let Some(benchmark) = benchmark.filter(|_| score > 0.0) {
            let comparison = benchmark::compare(score, benchmark);
            score = (score + comparison.adjustment).clamp(0.0, MAX_SCORE);
            benchmark_comparison.push(comparison);
        }

        let mut confidence = if metric.confidence > 0.0 {
            metric.confidence
        } else {
            self.config.fallback_metric_confidence
        };
        if spec.kind == FormulaKind::MlSignal {
            confidence *= self.config.ml_confidence_multiplier;
        }

        Ok(ScoreBreakdown {
            final_score: score,
            confidence: confidence.clamp(0.0, 1.0),
            components: BTreeMap::from([(formula_id.to_string(), score)]),
            formulas_used: vec![formula_id.to_string()],
            benchmark_comparison,
            evidence_summary: vec![outcome.explanation],
            risk_adjustments: Vec::new(),
        })
    }

    /// Score every mappable metric and aggregate by metric weight.
    ///
    /// Writes each scored metric's `score` and the module's `score`,
    /// `confidence` and `breakdown`. Module components are keyed by metric
    /// name. Unmapped metrics are skipped.
    #[instrument(skip_all, fields(module = %module.id))]
    pub fn score_module(
        &self,
        module: &mut EvaluationModule,
        company_data: &CompanyData,
        benchmarks: Option<&HashMap<String, Benchmark>>,
    ) -> ScoreBreakdown {
        if module.metrics.is_empty() {
            return finish(module, ScoreBreakdown::empty("No metrics to evaluate"));
        }

        let no_inputs = FormulaInputs::default();
        let mut total_weight = 0.0;
        let mut weighted_score = 0.0;
        let mut weighted_confidence = 0.0;
        let mut breakdown = ScoreBreakdown::default();

        for metric in module.metrics.iter_mut() {
            let formula_id = match registry::formula_for_metric(&metric.name) {
                Ok(id) => id,
                Err(e) => {
                    debug!(error = %e, "metric skipped");
                    continue;
                }
            };
            let inputs = company_data.get(formula_id).unwrap_or(&no_inputs);
            let benchmark = benchmarks.and_then(|b| b.get(&metric.name));
            let scored = match self.score_metric(metric, formula_id, inputs, benchmark) {
                Ok(scored) => scored,
                Err(e) => {
                    debug!(metric = %metric.name, error = %e, "metric skipped");
                    continue;
                }
            };

            metric.score = Some(scored.final_score);
            total_weight += metric.weight;
            weighted_score += metric.weight * scored.final_score;
            weighted_confidence += metric.weight * scored.confidence;

            breakdown.components.insert(metric.name.clone(), scored.final_score);
            for formula in scored.formulas_used {
                if !breakdown.formulas_used.contains(&formula) {
                    breakdown.formulas_used.push(formula);
                }
            }
            breakdown.benchmark_comparison.extend(scored.benchmark_comparison);
            breakdown.evidence_summary.extend(scored.evidence_summary);
        }

        if breakdown.components.is_empty() {
            let note = format!("No scorable metrics in {}", module.name);
            return finish(module, ScoreBreakdown::empty(note));
        }
        if total_weight > 0.0 {
            breakdown.final_score = weighted_score / total_weight;
            breakdown.confidence = weighted_confidence / total_weight;
        }
        debug!(score = breakdown.final_score, confidence = breakdown.confidence, "module scored");
        finish(module, breakdown)
    }

    /// Penalise a scored module for regulatory and market risks. Returns
    /// the penalty applied. A no-op when risk adjustment is disabled.
    pub fn apply_risk_adjustment(&self, module: &mut EvaluationModule, risks: &[Risk]) -> f64 {
        let Some(score) = module.score.filter(|_| self.config.apply_risk_adjustment) else {
            return 0.0;
        };
        let (adjusted, notes) = self.risk.adjust(score, risks);
        module.score = Some(adjusted);
        if let Some(breakdown) = module.breakdown.as_mut() {
            breakdown.final_score = adjusted;
            breakdown.risk_adjustments.extend(notes);
        }
        score - adjusted
    }
}

fn finish(module: &mut EvaluationModule, breakdown: ScoreBreakdown) -> ScoreBreakdown {
    module.score = Some(breakdown.final_score);
    module.confidence = breakdown.confidence;
    module.breakdown = Some(breakdown.clone());
    breakdown
}

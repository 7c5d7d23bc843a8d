//! Deterministic stand-ins for the model-based signals.
//!
//! Each signal is a fixed weighted sum over normalised sub-factors. Missing
//! inputs take neutral defaults so a sparse company still gets a score.

use glassbox_core::errors::GlassBoxResult;
use glassbox_core::models::{FormulaInputs, FormulaOutcome, SignalKind};
use glassbox_core::traits::IScoringSignalProvider;

/// The default [`IScoringSignalProvider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSignalProvider;

impl HeuristicSignalProvider {
    pub fn new() -> Self {
        Self
    }

    /// `min(exits·2, 4) + min(years/5, 3) + tier·1.5 + min(connections/1000, 2)`, capped at 10.
    pub fn team_credibility(inputs: &FormulaInputs) -> FormulaOutcome {
        let exits = (inputs.get_or("previous_exits", 0.0) * 2.0).min(4.0);
        let experience = (inputs.get_or("experience_years", 0.0) / 5.0).min(3.0);
        let education = inputs.get_or("education_tier", 1.0) * 1.5;
        let network = (inputs.get_or("linkedin_connections", 0.0) / 1000.0).min(2.0);
        let score = (exits + experience + education + network).min(10.0);
        FormulaOutcome::new(
            score,
            format!("Team credibility (ML): {score:.1}/10 based on experience, exits, network"),
        )
    }

    /// News sentiment (−1..1), search trends (0..100), funding activity and
    /// regulatory sentiment (0..1), each mapped to 0..5 and halved.
    pub fn market_sentiment(inputs: &FormulaInputs) -> FormulaOutcome {
        let news = (inputs.get_or("news_sentiment", 0.5) + 1.0) * 2.5;
        let trends = inputs.get_or("search_trends", 50.0) / 20.0;
        let funding = inputs.get_or("funding_activity", 0.5) * 2.5;
        let regulatory = inputs.get_or("regulatory_sentiment", 0.5) * 2.5;
        let score = (news + trends + funding + regulatory) / 2.0;
        FormulaOutcome::new(
            score,
            format!("Market sentiment (ML): {score:.1}/10 based on news, trends, funding climate"),
        )
    }

    /// `uniqueness·4 + complexity·3 + patent strength·3`, inputs in 0..1.
    pub fn product_differentiation(inputs: &FormulaInputs) -> FormulaOutcome {
        let score = inputs.get_or("uniqueness_score", 0.5) * 4.0
            + inputs.get_or("complexity_score", 0.5) * 3.0
            + inputs.get_or("patent_strength", 0.5) * 3.0;
        FormulaOutcome::new(
            score,
            format!("Product differentiation (ML): {score:.1}/10 based on uniqueness, complexity, IP"),
        )
    }
}

impl IScoringSignalProvider for HeuristicSignalProvider {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn score_signal(&self, kind: SignalKind, inputs: &FormulaInputs) -> GlassBoxResult<FormulaOutcome> {
        Ok(match kind {
            SignalKind::TeamCredibility => Self::team_credibility(inputs),
            SignalKind::MarketSentiment => Self::market_sentiment(inputs),
            SignalKind::ProductDifferentiation => Self::product_differentiation(inputs),
        })
    }
}

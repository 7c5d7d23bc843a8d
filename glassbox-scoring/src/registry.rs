//! Formula catalog and the metric → formula lookup table.

use glassbox_core::errors::LookupError;
use glassbox_core::models::{FormulaKind, SignalKind};

use crate::formulas::{BURN_MULTIPLE, CAC_PAYBACK, GROSS_MARGIN, LTV_CAC_RATIO, RULE_OF_40};

/// A scoring formula as presented in breakdowns and methodology views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulaSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: FormulaKind,
    pub description: &'static str,
    /// Human-readable formula.
    pub formula: &'static str,
    /// Set for model-based signals.
    pub signal: Option<SignalKind>,
}

const fn deterministic(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    formula: &'static str,
) -> FormulaSpec {
    FormulaSpec {
        id,
        name,
        kind: FormulaKind::Deterministic,
        description,
        formula,
        signal: None,
    }
}

const fn ml_signal(
    signal: SignalKind,
    name: &'static str,
    description: &'static str,
    formula: &'static str,
) -> FormulaSpec {
    FormulaSpec {
        id: signal.as_str(),
        name,
        kind: FormulaKind::MlSignal,
        description,
        formula,
        signal: Some(signal),
    }
}

pub const FORMULAS: &[FormulaSpec] = &[
    deterministic(
        CAC_PAYBACK,
        "CAC Payback Period",
        "Customer acquisition cost payback period",
        "Score based on months to payback CAC from monthly revenue",
    ),
    deterministic(
        LTV_CAC_RATIO,
        "LTV:CAC Ratio",
        "Lifetime value to customer acquisition cost ratio",
        "LTV ÷ CAC",
    ),
    deterministic(
        BURN_MULTIPLE,
        "Burn Multiple",
        "Capital efficiency: burn ÷ net new ARR",
        "Net Burn ÷ Net New ARR (lower is better)",
    ),
    deterministic(
        RULE_OF_40,
        "Rule of 40",
        "Growth rate plus profit margin",
        "Growth % + Profit Margin %",
    ),
    deterministic(
        GROSS_MARGIN,
        "Gross Margin",
        "Gross margin against the industry benchmark",
        "Gross Margin % vs industry benchmark %",
    ),
    ml_signal(
        SignalKind::TeamCredibility,
        "Team Credibility",
        "Model-based assessment of team strength",
        "Weighted model considering experience, exits, network",
    ),
    ml_signal(
        SignalKind::MarketSentiment,
        "Market Sentiment",
        "Model-based market timing and sentiment",
        "News sentiment, search trends, funding climate analysis",
    ),
    ml_signal(
        SignalKind::ProductDifferentiation,
        "Product Differentiation",
        "Model-based assessment of product uniqueness and IP",
        "Uniqueness, complexity, patent strength",
    ),
];

/// Which formula scores a metric. Metrics not listed are skipped.
const METRIC_FORMULAS: &[(&str, &str)] = &[
    ("cac", CAC_PAYBACK),
    ("payback_months", CAC_PAYBACK),
    ("ltv", LTV_CAC_RATIO),
    ("cac_ltv_ratio", LTV_CAC_RATIO),
    ("burn_rate", BURN_MULTIPLE),
    ("capital_efficiency", BURN_MULTIPLE),
    ("gross_margin", GROSS_MARGIN),
    ("revenue", RULE_OF_40),
    ("founder_experience", "team_credibility"),
    ("team_experience", "team_credibility"),
    ("founder_background", "team_credibility"),
    ("market_timing", "market_sentiment"),
    ("differentiation", "product_differentiation"),
    ("ip_moats", "product_differentiation"),
];

pub fn formula(id: &str) -> Result<&'static FormulaSpec, LookupError> {
    FORMULAS
        .iter()
        .find(|f| f.id == id)
        .ok_or_else(|| LookupError::UnknownFormula { id: id.to_string() })
}

pub fn formula_for_metric(metric: &str) -> Result<&'static str, LookupError> {
    METRIC_FORMULAS
        .iter()
        .find(|(name, _)| *name == metric)
        .map(|(_, id)| *id)
        .ok_or_else(|| LookupError::UnmappedMetric {
            metric: metric.to_string(),
        })
}

//! Deterministic business formulas.
//!
//! Each formula maps a raw ratio onto a piecewise-linear score in [0, 10].
//! A zero or negative denominator is not an error: the formula returns a
//! sentinel zero score whose explanation says why.

use glassbox_core::errors::FormulaError;
use glassbox_core::models::{FormulaInputs, FormulaOutcome};

pub const CAC_PAYBACK: &str = "cac_payback";
pub const LTV_CAC_RATIO: &str = "ltv_cac_ratio";
pub const BURN_MULTIPLE: &str = "burn_multiple";
pub const RULE_OF_40: &str = "rule_of_40";
pub const GROSS_MARGIN: &str = "gross_margin";

/// Gross margin (%) considered "good" per industry.
const INDUSTRY_GROSS_MARGINS: &[(&str, f64)] = &[
    ("B2B SaaS", 80.0),
    ("D2C/E-commerce", 45.0),
    ("Food/QSR", 65.0),
    ("Healthcare", 70.0),
    ("Manufacturing", 35.0),
    ("Manufacturing/Industrial", 35.0),
];

pub fn industry_gross_margin_benchmark(industry: &str) -> Option<f64> {
    INDUSTRY_GROSS_MARGINS
        .iter()
        .find(|(name, _)| *name == industry)
        .map(|(_, margin)| *margin)
}

fn division_by_zero(formula: &str, denominator: &str) -> FormulaOutcome {
    FormulaOutcome::sentinel(&FormulaError::DivisionByZero {
        formula: formula.to_string(),
        denominator: denominator.to_string(),
    })
}

/// Months to recover CAC from monthly revenue per customer.
///
/// ```text
/// payback < 6        → 10
/// 6  ≤ payback < 12  → 8 + 2·(12 − p)/6
/// 12 ≤ payback < 24  → 6 + 2·(24 − p)/12
/// 24 ≤ payback < 36  → 2 + 4·(36 − p)/12
/// payback ≥ 36       → 1
/// ```
pub fn cac_payback(cac: f64, monthly_revenue_per_customer: f64) -> FormulaOutcome {
    if monthly_revenue_per_customer <= 0.0 {
        return division_by_zero(CAC_PAYBACK, "monthly_revenue_per_customer");
    }
    let months = cac / monthly_revenue_per_customer;
    let score = if months < 6.0 {
        10.0
    } else if months < 12.0 {
        8.0 + 2.0 * (12.0 - months) / 6.0
    } else if months < 24.0 {
        6.0 + 2.0 * (24.0 - months) / 12.0
    } else if months < 36.0 {
        2.0 + 4.0 * (36.0 - months) / 12.0
    } else {
        1.0
    };
    FormulaOutcome::new(score, format!("CAC payback: {months:.1} months → Score: {score:.1}/10"))
}

/// ```text
/// ratio > 5      → 10
/// 3 < ratio ≤ 5  → 8 + (ratio − 3)
/// 2 < ratio ≤ 3  → 6 + 2·(ratio − 2)
/// 1 < ratio ≤ 2  → 4 + 2·(ratio − 1)
/// ratio ≤ 1      → 2·ratio
/// ```
pub fn ltv_cac_ratio(ltv: f64, cac: f64) -> FormulaOutcome {
    if cac <= 0.0 {
        return division_by_zero(LTV_CAC_RATIO, "cac");
    }
    let ratio = ltv / cac;
    let score = if ratio > 5.0 {
        10.0
    } else if ratio > 3.0 {
        8.0 + 2.0 * (ratio - 3.0) / 2.0
    } else if ratio > 2.0 {
        6.0 + 2.0 * (ratio - 2.0)
    } else if ratio > 1.0 {
        4.0 + 2.0 * (ratio - 1.0)
    } else {
        2.0 * ratio
    };
    FormulaOutcome::new(score, format!("LTV:CAC ratio: {ratio:.1}x → Score: {score:.1}/10"))
}

/// Net burn ÷ net new ARR, lower is better.
///
/// Without ARR growth the multiple is undefined: profitable companies
/// score 10, companies still burning score 1.
pub fn burn_multiple(net_burn: f64, net_new_arr: f64) -> FormulaOutcome {
    if net_new_arr <= 0.0 {
        return if net_burn <= 0.0 {
            FormulaOutcome::new(10.0, "Profitable growth (no burn) → Score: 10.0/10")
        } else {
            FormulaOutcome::new(1.0, "Burning cash with no ARR growth → Score: 1.0/10")
        };
    }
    let multiple = net_burn / net_new_arr;
    let score = if multiple < 1.0 {
        10.0
    } else if multiple < 2.0 {
        8.0 + 2.0 * (2.0 - multiple)
    } else if multiple < 3.0 {
        6.0 + 2.0 * (3.0 - multiple)
    } else if multiple < 5.0 {
        4.0 + 2.0 * (5.0 - multiple) / 2.0
    } else {
        2.0
    };
    FormulaOutcome::new(score, format!("Burn Multiple: {multiple:.1}x → Score: {score:.1}/10"))
}

/// Growth rate % + profit margin %.
pub fn rule_of_40(growth_rate: f64, profit_margin: f64) -> FormulaOutcome {
    let total = growth_rate + profit_margin;
    let score = if total > 50.0 {
        10.0
    } else if total > 40.0 {
        8.0 + 2.0 * (total - 40.0) / 10.0
    } else if total > 30.0 {
        6.0 + 2.0 * (total - 30.0) / 10.0
    } else if total > 20.0 {
        4.0 + 2.0 * (total - 20.0) / 10.0
    } else if total > 0.0 {
        2.0 * total / 20.0
    } else {
        0.0
    };
    FormulaOutcome::new(score, format!("Rule of 40: {total:.1}% → Score: {score:.1}/10"))
}

/// Gross margin % scored against an industry benchmark `b`.
///
/// ```text
/// gm ≥ b          → 8 + 2·min((gm − b)/20, 1)
/// 0.8b ≤ gm < b   → 6 + 2·(gm − 0.8b)/(0.2b)
/// 0.6b ≤ gm < 0.8b → 4 + 2·(gm − 0.6b)/(0.2b)
/// gm < 0.6b       → 4·gm/(0.6b), 0 when gm ≤ 0
/// ```
pub fn gross_margin(gross_margin: f64, benchmark: f64) -> FormulaOutcome {
    if benchmark <= 0.0 {
        return division_by_zero(GROSS_MARGIN, "benchmark");
    }
    let b = benchmark;
    let score = if gross_margin >= b {
        8.0 + 2.0 * ((gross_margin - b) / 20.0).min(1.0)
    } else if gross_margin >= b * 0.8 {
        6.0 + 2.0 * (gross_margin - b * 0.8) / (b * 0.2)
    } else if gross_margin >= b * 0.6 {
        4.0 + 2.0 * (gross_margin - b * 0.6) / (b * 0.2)
    } else if gross_margin > 0.0 {
        4.0 * gross_margin / (b * 0.6)
    } else {
        0.0
    };
    FormulaOutcome::new(
        score,
        format!("Gross Margin: {gross_margin:.1}% (vs {b:.1}% industry) → Score: {score:.1}/10"),
    )
}

/// Evaluate a deterministic formula by id from named inputs. `None` when
/// the id is not a deterministic formula.
///
/// `gross_margin` reads its benchmark from the `industry` label, falling
/// back to `default_gm_benchmark`.
pub fn evaluate(
    formula_id: &str,
    inputs: &FormulaInputs,
    default_gm_benchmark: f64,
) -> Option<Result<FormulaOutcome, FormulaError>> {
    let outcome = match formula_id {
        CAC_PAYBACK => pair(inputs, CAC_PAYBACK, ["cac", "monthly_revenue_per_customer"], cac_payback),
        LTV_CAC_RATIO => pair(inputs, LTV_CAC_RATIO, ["ltv", "cac"], ltv_cac_ratio),
        BURN_MULTIPLE => pair(inputs, BURN_MULTIPLE, ["net_burn", "net_new_arr"], burn_multiple),
        RULE_OF_40 => pair(inputs, RULE_OF_40, ["growth_rate", "profit_margin"], rule_of_40),
        GROSS_MARGIN => inputs.require(GROSS_MARGIN, "gross_margin").map(|gm| {
            let benchmark = inputs
                .label("industry")
                .and_then(industry_gross_margin_benchmark)
                .unwrap_or(default_gm_benchmark);
            gross_margin(gm, benchmark)
        }),
        _ => return None,
    };
    Some(outcome)
}

fn pair(
    inputs: &FormulaInputs,
    formula: &str,
    [a, b]: [&str; 2],
    f: fn(f64, f64) -> FormulaOutcome,
) -> Result<FormulaOutcome, FormulaError> {
    Ok(f(inputs.require(formula, a)?, inputs.require(formula, b)?))
}

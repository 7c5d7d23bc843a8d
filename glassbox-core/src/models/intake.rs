//! Typed intake records produced by document parsing and external ingestion.
//!
//! Every field is optional: upstream extraction guarantees nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metric::MetricValue;
use crate::errors::InputError;

/// Product characteristics used by the differentiation signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductProfile {
    /// 0.0–1.0.
    pub uniqueness_score: Option<f64>,
    /// 0.0–1.0.
    pub complexity_score: Option<f64>,
    /// 0.0–1.0.
    pub patent_strength: Option<f64>,
    pub patent_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub product: ProductProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialData {
    pub revenue: Option<f64>,
    pub arr: Option<f64>,
    pub mrr: Option<f64>,
    pub net_new_arr: Option<f64>,
    /// Net cash burn over the period. Negative means cash-generative.
    pub net_burn: Option<f64>,
    pub cash_balance: Option<f64>,
    pub gross_margin_pct: Option<f64>,
    pub revenue_growth_pct: Option<f64>,
    pub profit_margin_pct: Option<f64>,
    pub cac: Option<f64>,
    pub ltv: Option<f64>,
    pub monthly_revenue_per_customer: Option<f64>,
    pub churn_rate_pct: Option<f64>,
    pub ndr_pct: Option<f64>,
    pub customer_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamData {
    pub headcount: Option<u32>,
    pub founder_count: Option<u32>,
    pub advisor_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketData {
    pub tam: Option<f64>,
    pub sam: Option<f64>,
    pub som: Option<f64>,
    pub competitor_count: Option<u32>,
    /// -1.0 (negative) – 1.0 (positive).
    pub news_sentiment: Option<f64>,
    /// 0–100 search-interest index.
    pub search_trends: Option<f64>,
    /// 0.0–1.0 sector funding activity.
    pub funding_activity: Option<f64>,
    /// 0.0 (hostile) – 1.0 (favourable).
    pub regulatory_sentiment: Option<f64>,
}

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentIntake {
    pub company_info: CompanyInfo,
    pub financial_data: FinancialData,
    pub team_data: TeamData,
    pub market_data: MarketData,
}

macro_rules! first_present {
    ($dst:expr, $src:expr; $($field:ident),+ $(,)?) => {
        $( if $dst.$field.is_none() { $dst.$field = $src.$field.clone(); } )+
    };
}

impl DocumentIntake {
    /// Fold another intake into this one. Values already present win.
    pub fn merge(&mut self, other: &DocumentIntake) {
        first_present!(self.company_info, other.company_info;
            name, description, industry, website, location);
        first_present!(self.company_info.product, other.company_info.product;
            uniqueness_score, complexity_score, patent_strength, patent_count);
        first_present!(self.financial_data, other.financial_data;
            revenue, arr, mrr, net_new_arr, net_burn, cash_balance, gross_margin_pct,
            revenue_growth_pct, profit_margin_pct, cac, ltv, monthly_revenue_per_customer,
            churn_rate_pct, ndr_pct, customer_count);
        first_present!(self.team_data, other.team_data;
            headcount, founder_count, advisor_count);
        first_present!(self.market_data, other.market_data;
            tam, sam, som, competitor_count, news_sentiment, search_trends,
            funding_activity, regulatory_sentiment);
    }

    /// Drop malformed numbers, returning what was dropped.
    ///
    /// Non-finite values are dropped everywhere. Negative values are dropped
    /// for fields that cannot be negative. `net_burn`, `net_new_arr`, growth
    /// and margin percentages may legitimately be negative.
    pub fn sanitize(&mut self) -> Vec<InputError> {
        let mut dropped = Vec::new();
        let mut check = |field: &'static str, slot: &mut Option<f64>, signed: bool| {
            if let Some(v) = *slot {
                let reason = if !v.is_finite() {
                    Some("not a finite number")
                } else if !signed && v < 0.0 {
                    Some("must not be negative")
                } else {
                    None
                };
                if let Some(reason) = reason {
                    *slot = None;
                    dropped.push(InputError::InvalidField {
                        field: field.to_string(),
                        reason: reason.to_string(),
                    });
                }
            }
        };

        let p = &mut self.company_info.product;
        check("product.uniqueness_score", &mut p.uniqueness_score, false);
        check("product.complexity_score", &mut p.complexity_score, false);
        check("product.patent_strength", &mut p.patent_strength, false);

        let f = &mut self.financial_data;
        check("financial.revenue", &mut f.revenue, false);
        check("financial.arr", &mut f.arr, false);
        check("financial.mrr", &mut f.mrr, false);
        check("financial.net_new_arr", &mut f.net_new_arr, true);
        check("financial.net_burn", &mut f.net_burn, true);
        check("financial.cash_balance", &mut f.cash_balance, false);
        check("financial.gross_margin_pct", &mut f.gross_margin_pct, true);
        check("financial.revenue_growth_pct", &mut f.revenue_growth_pct, true);
        check("financial.profit_margin_pct", &mut f.profit_margin_pct, true);
        check("financial.cac", &mut f.cac, false);
        check("financial.ltv", &mut f.ltv, false);
        check(
            "financial.monthly_revenue_per_customer",
            &mut f.monthly_revenue_per_customer,
            false,
        );
        check("financial.churn_rate_pct", &mut f.churn_rate_pct, false);
        check("financial.ndr_pct", &mut f.ndr_pct, false);

        let m = &mut self.market_data;
        check("market.tam", &mut m.tam, false);
        check("market.sam", &mut m.sam, false);
        check("market.som", &mut m.som, false);
        check("market.news_sentiment", &mut m.news_sentiment, true);
        check("market.search_trends", &mut m.search_trends, false);
        check("market.funding_activity", &mut m.funding_activity, false);
        check("market.regulatory_sentiment", &mut m.regulatory_sentiment, false);

        dropped
    }

    /// Numeric financial fields as `(metric name, value)` pairs.
    pub fn financial_claims(&self) -> Vec<(&'static str, f64)> {
        let f = &self.financial_data;
        [
            ("revenue", f.revenue),
            ("arr", f.arr),
            ("mrr", f.mrr),
            ("net_new_arr", f.net_new_arr),
            ("burn_rate", f.net_burn),
            ("cash_balance", f.cash_balance),
            ("gross_margin", f.gross_margin_pct),
            ("revenue_growth", f.revenue_growth_pct),
            ("cac", f.cac),
            ("ltv", f.ltv),
            ("churn_rate", f.churn_rate_pct),
            ("ndr", f.ndr_pct),
            ("customer_count", f.customer_count.map(|c| c as f64)),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, v)))
        .collect()
    }

    /// Numeric market and team fields as `(metric name, value)` pairs.
    pub fn market_claims(&self) -> Vec<(&'static str, f64)> {
        let m = &self.market_data;
        let t = &self.team_data;
        [
            ("market_size", m.tam),
            ("sam", m.sam),
            ("som", m.som),
            ("competition", m.competitor_count.map(f64::from)),
            ("headcount", t.headcount.map(f64::from)),
            ("founder_count", t.founder_count.map(f64::from)),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, v)))
        .collect()
    }
}

/// One `(metric name, value)` pair from an external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRecord {
    pub metric_name: String,
    pub value: MetricValue,
}

/// A batch of records from one external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalPayload {
    /// Recognised source type (e.g. `stripe_api`, `crunchbase`).
    pub source_type: String,
    pub source_ref: String,
    pub records: Vec<ExternalRecord>,
    pub retrieved_at: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub license_valid: bool,
}

fn default_true() -> bool {
    true
}

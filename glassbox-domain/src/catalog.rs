//! Static catalog of evaluation modules and the metrics each one carries.

use glassbox_core::models::{CompanyStage, Metric, MetricType, ModuleKind};

/// A metric slot in a module, with the snippet keywords that link evidence to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpec {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub weight: f64,
    pub keywords: &'static [&'static str],
}

impl MetricSpec {
    pub fn instantiate(&self) -> Metric {
        Metric::new(self.name, self.metric_type, self.weight)
    }

    /// Whether a lower-cased snippet mentions any of this metric's keywords.
    pub fn matches(&self, snippet: &str) -> bool {
        self.keywords.iter().any(|kw| snippet.contains(kw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ModuleKind,
    pub metrics: &'static [MetricSpec],
}

const fn spec(
    name: &'static str,
    metric_type: MetricType,
    weight: f64,
    keywords: &'static [&'static str],
) -> MetricSpec {
    MetricSpec {
        name,
        metric_type,
        weight,
        keywords,
    }
}

use MetricType::{DomainSpecific as Dom, Financial, Market, Product, Risk, Team, Traction};

pub const CORE_MODULES: &[ModuleDefinition] = &[
    ModuleDefinition {
        id: "team",
        name: "Team Assessment",
        description: "Founder and team evaluation",
        kind: ModuleKind::Core,
        metrics: &[
            spec("founder_experience", Team, 0.4, &["founder", "experience", "background", "previous"]),
            spec("team_composition", Team, 0.3, &["team", "employee", "hire", "talent", "headcount"]),
            spec("advisory_board", Team, 0.3, &["advisor", "board", "mentor", "guidance"]),
        ],
    },
    ModuleDefinition {
        id: "market",
        name: "Market Analysis",
        description: "Market size, competition, timing",
        kind: ModuleKind::Core,
        metrics: &[
            spec("market_size", Market, 0.3, &["market size", "tam", "sam", "som"]),
            spec("competition", Market, 0.25, &["competition", "competitor"]),
            spec("market_timing", Market, 0.25, &["timing", "trend", "sentiment", "funding"]),
            spec("go_to_market", Market, 0.2, &["go-to-market", "channel", "distribution"]),
        ],
    },
    ModuleDefinition {
        id: "traction",
        name: "Traction & Growth",
        description: "Revenue, users, growth metrics",
        kind: ModuleKind::Core,
        metrics: &[
            spec("revenue", Financial, 0.4, &["revenue", "arr", "mrr", "sales", "income"]),
            spec("user_growth", Traction, 0.3, &["user", "customer", "growth", "acquisition"]),
            spec("retention", Traction, 0.3, &["retention", "churn", "cohort", "repeat"]),
        ],
    },
    ModuleDefinition {
        id: "product",
        name: "Product & Defensibility",
        description: "Product quality, differentiation, moats",
        kind: ModuleKind::Core,
        metrics: &[
            spec("product_quality", Product, 0.25, &["quality", "uptime", "rating"]),
            spec("differentiation", Product, 0.3, &["unique", "differentiat", "novel"]),
            spec("ip_moats", Product, 0.25, &["patent", "ip", "moat"]),
            spec("switching_costs", Product, 0.2, &["switching", "lock-in", "integration"]),
        ],
    },
    ModuleDefinition {
        id: "finance",
        name: "Financial Health",
        description: "Burn rate, runway, unit economics",
        kind: ModuleKind::Core,
        metrics: &[
            spec("burn_rate", Financial, 0.4, &["burn", "cash", "runway", "expenses"]),
            spec("gross_margin", Financial, 0.3, &["margin", "gross", "profit", "cost"]),
            spec("capital_efficiency", Financial, 0.3, &["efficiency", "capital", "roi", "multiple"]),
        ],
    },
    ModuleDefinition {
        id: "risk",
        name: "Risk Assessment",
        description: "Regulatory, market, execution risks",
        kind: ModuleKind::Core,
        metrics: &[
            spec("regulatory_risk", Risk, 0.25, &["regulat", "compliance", "license"]),
            spec("market_risk", Risk, 0.25, &["market risk", "demand"]),
            spec("execution_risk", Risk, 0.25, &["execution", "delivery risk"]),
            spec("competitive_risk", Risk, 0.25, &["competitor", "incumbent"]),
        ],
    },
];

pub const DOMAIN_MODULES: &[(&str, &[ModuleDefinition])] = &[
    (
        "B2B SaaS",
        &[
            ModuleDefinition {
                id: "cac_payback",
                name: "CAC Payback Analysis",
                description: "Customer acquisition cost and payback period",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("cac", Financial, 0.3, &["cac", "acquisition cost"]),
                    spec("ltv", Financial, 0.3, &["ltv", "lifetime value"]),
                    spec("payback_months", Financial, 0.2, &["payback"]),
                    spec("cac_ltv_ratio", Financial, 0.2, &["ltv:cac", "ltv/cac"]),
                ],
            },
            ModuleDefinition {
                id: "ndr",
                name: "Net Dollar Retention",
                description: "Revenue expansion from existing customers",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("ndr", Traction, 0.4, &["ndr", "net dollar retention"]),
                    spec("expansion_revenue", Traction, 0.2, &["expansion"]),
                    spec("churn_rate", Traction, 0.2, &["churn"]),
                    spec("upsell_rate", Traction, 0.2, &["upsell"]),
                ],
            },
            ModuleDefinition {
                id: "sales_efficiency",
                name: "Sales Efficiency",
                description: "Sales cycle, pipeline, conversion rates",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("sales_cycle", Dom, 0.25, &["sales cycle"]),
                    spec("pipeline_coverage", Dom, 0.25, &["pipeline"]),
                    spec("conversion_rates", Dom, 0.25, &["conversion"]),
                    spec("acv", Dom, 0.25, &["acv", "contract value"]),
                ],
            },
        ],
    ),
    (
        "D2C/E-commerce",
        &[
            ModuleDefinition {
                id: "brand_sentiment",
                name: "Brand & Sentiment Analysis",
                description: "Brand strength, customer sentiment, social presence",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("brand_awareness", Dom, 0.25, &["brand", "awareness"]),
                    spec("sentiment_score", Dom, 0.25, &["sentiment", "review"]),
                    spec("social_engagement", Dom, 0.25, &["social", "engagement", "followers"]),
                    spec("nps", Dom, 0.25, &["nps", "net promoter"]),
                ],
            },
            ModuleDefinition {
                id: "repeat_rate",
                name: "Repeat Purchase Analysis",
                description: "Customer loyalty and repeat purchase behavior",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("repeat_rate", Traction, 0.3, &["repeat"]),
                    spec("customer_lifetime", Traction, 0.25, &["lifetime"]),
                    spec("cohort_retention", Traction, 0.25, &["cohort"]),
                    spec("subscription_rate", Traction, 0.2, &["subscription"]),
                ],
            },
        ],
    ),
    (
        "Food/QSR",
        &[
            ModuleDefinition {
                id: "unit_economics",
                name: "Store Unit Economics",
                description: "Store-level profitability and payback",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("store_payback", Financial, 0.3, &["store payback", "payback"]),
                    spec("prime_cost_percent", Financial, 0.3, &["prime cost"]),
                    spec("labor_cost_percent", Financial, 0.2, &["labor cost", "labour cost"]),
                    spec("food_cost_percent", Financial, 0.2, &["food cost"]),
                ],
            },
            ModuleDefinition {
                id: "same_store_growth",
                name: "Same Store Sales Growth",
                description: "SSSG and store maturation",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("sssg", Traction, 0.4, &["sssg", "same store"]),
                    spec("transaction_count", Traction, 0.2, &["transactions"]),
                    spec("average_ticket", Traction, 0.2, &["ticket"]),
                    spec("store_maturity", Traction, 0.2, &["maturity"]),
                ],
            },
        ],
    ),
    (
        "Logistics/Delivery",
        &[ModuleDefinition {
            id: "delivery_metrics",
            name: "Delivery Performance",
            description: "Cost per drop, density, SLA performance",
            kind: ModuleKind::Domain,
            metrics: &[
                spec("cost_per_drop", Dom, 0.3, &["cost per drop", "per delivery"]),
                spec("delivery_density", Dom, 0.25, &["density"]),
                spec("sla_performance", Dom, 0.25, &["sla", "on-time"]),
                spec("route_efficiency", Dom, 0.2, &["route"]),
            ],
        }],
    ),
    (
        "Healthcare",
        &[ModuleDefinition {
            id: "regulatory_compliance",
            name: "Regulatory & Compliance",
            description: "FDA approvals, clinical trials, compliance",
            kind: ModuleKind::Domain,
            metrics: &[
                spec("fda_status", Risk, 0.3, &["fda"]),
                spec("clinical_trials", Risk, 0.3, &["clinical", "trial"]),
                spec("hipaa_compliance", Risk, 0.2, &["hipaa"]),
                spec("regulatory_pathway", Risk, 0.2, &["pathway", "510(k)"]),
            ],
        }],
    ),
    (
        "Biotech/Deep Tech",
        &[
            ModuleDefinition {
                id: "ip_portfolio",
                name: "IP & Publications",
                description: "Patent portfolio, publications, research depth",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("patent_count", Product, 0.3, &["patent"]),
                    spec("publication_count", Product, 0.25, &["publication", "paper"]),
                    spec("citation_index", Product, 0.2, &["citation"]),
                    spec("ip_quality", Product, 0.25, &["ip quality", "claims"]),
                ],
            },
            ModuleDefinition {
                id: "technical_risk",
                name: "Technical Risk Assessment",
                description: "Technical feasibility, development timeline",
                kind: ModuleKind::Domain,
                metrics: &[
                    spec("technical_feasibility", Risk, 0.3, &["feasibility"]),
                    spec("development_timeline", Risk, 0.25, &["timeline", "milestone"]),
                    spec("proof_of_concept", Risk, 0.25, &["proof of concept", "poc"]),
                    spec("scalability", Risk, 0.2, &["scalab"]),
                ],
            },
        ],
    ),
];

/// Core module weights in percent, per stage. Stages without a row use seed.
/// Modules missing from a row fall back to 1%.
const STAGE_WEIGHTS: &[(CompanyStage, &[(&str, f64)])] = &[
    (
        CompanyStage::PreSeed,
        &[("team", 35.0), ("market", 30.0), ("product", 20.0), ("traction", 10.0), ("finance", 5.0)],
    ),
    (
        CompanyStage::Seed,
        &[("traction", 30.0), ("market", 25.0), ("team", 20.0), ("product", 15.0), ("finance", 10.0)],
    ),
    (
        CompanyStage::SeriesA,
        &[("traction", 35.0), ("finance", 20.0), ("product", 15.0), ("market", 15.0), ("team", 15.0)],
    ),
];

const MISSING_STAGE_WEIGHT_PCT: f64 = 1.0;

/// Core module weight as a fraction for a stage.
pub fn stage_weight(stage: CompanyStage, module_id: &str) -> f64 {
    let row = STAGE_WEIGHTS
        .iter()
        .find(|(s, _)| *s == stage)
        .or_else(|| STAGE_WEIGHTS.iter().find(|(s, _)| *s == CompanyStage::Seed))
        .map(|(_, row)| *row)
        .unwrap_or(&[]);
    row.iter()
        .find(|(id, _)| *id == module_id)
        .map_or(MISSING_STAGE_WEIGHT_PCT, |(_, pct)| *pct)
        / 100.0
}

/// Whether the stage has its own weight row rather than the seed fallback.
pub fn has_stage_weights(stage: CompanyStage) -> bool {
    STAGE_WEIGHTS.iter().any(|(s, _)| *s == stage)
}

pub fn domain_modules(domain: &str) -> &'static [ModuleDefinition] {
    DOMAIN_MODULES
        .iter()
        .find(|(d, _)| *d == domain)
        .map(|(_, modules)| *modules)
        .unwrap_or(&[])
}

/// Look up any module definition, core or domain, by id.
pub fn module_definition(id: &str) -> Option<&'static ModuleDefinition> {
    CORE_MODULES
        .iter()
        .chain(DOMAIN_MODULES.iter().flat_map(|(_, modules)| modules.iter()))
        .find(|m| m.id == id)
}

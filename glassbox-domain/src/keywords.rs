//! Classification keyword tables. Order matters: ties resolve to the
//! earlier entry.

use glassbox_core::models::CompanyStage;

pub const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "B2B SaaS",
        &[
            "saas", "software as a service", "b2b", "enterprise", "api", "platform", "dashboard",
            "workflow", "automation", "crm", "erp", "integration", "subscription", "acv", "arr",
            "mrr",
        ],
    ),
    (
        "D2C/E-commerce",
        &[
            "d2c", "direct to consumer", "e-commerce", "ecommerce", "retail", "marketplace",
            "shopify", "amazon", "brand", "consumer goods", "fashion", "apparel", "beauty",
            "lifestyle",
        ],
    ),
    (
        "Fintech",
        &[
            "fintech", "financial", "banking", "payment", "lending", "crypto", "blockchain",
            "insurance", "wealth", "trading", "neobank", "embedded finance", "api", "compliance",
        ],
    ),
    (
        "Healthcare",
        &[
            "healthcare", "health", "medical", "telemedicine", "biotech", "pharma", "clinical",
            "therapy", "wellness", "mental health", "medical device", "diagnostics", "telehealth",
        ],
    ),
    (
        "Food/QSR",
        &[
            "food", "restaurant", "qsr", "quick service", "delivery", "ghost kitchen", "food tech",
            "catering", "beverage", "grocery", "meal", "dining", "franchise",
        ],
    ),
    (
        "Logistics/Delivery",
        &[
            "logistics", "delivery", "shipping", "supply chain", "last mile", "fulfillment",
            "warehouse", "freight", "transportation", "fleet", "routing", "tracking",
        ],
    ),
    (
        "Real Estate/PropTech",
        &[
            "real estate", "proptech", "property", "construction", "smart building", "iot",
            "facilities", "commercial real estate", "residential", "mortgage", "leasing",
            "property management",
        ],
    ),
    (
        "Biotech/Deep Tech",
        &[
            "biotech", "deep tech", "ai", "machine learning", "robotics", "quantum",
            "semiconductor", "materials", "energy", "cleantech", "research", "ip", "patent",
            "clinical trial",
        ],
    ),
    (
        "Manufacturing/Industrial",
        &[
            "manufacturing", "industrial", "factory", "production", "supply chain", "b2b",
            "hardware", "machinery", "automotive", "aerospace", "chemicals", "materials",
        ],
    ),
];

pub const STAGE_KEYWORDS: &[(CompanyStage, &[&str])] = &[
    (
        CompanyStage::PreSeed,
        &["pre-seed", "idea", "prototype", "mvp", "concept", "founder", "co-founder", "early", "stealth"],
    ),
    (
        CompanyStage::Seed,
        &["seed", "early revenue", "pilot", "beta", "traction", "product-market fit", "validation", "customers"],
    ),
    (
        CompanyStage::SeriesA,
        &["series a", "growth", "scaling", "expansion", "revenue", "go-to-market", "sales team", "established"],
    ),
    (
        CompanyStage::SeriesB,
        &["series b", "scale", "profitability", "market leader", "international", "acquisition"],
    ),
    (CompanyStage::Later, &["series c", "late stage", "ipo", "exit", "mature"]),
];

/// NAICS sector code per domain.
pub const NAICS_CODES: &[(&str, &str)] = &[
    ("B2B SaaS", "54151"),
    ("D2C/E-commerce", "44-45"),
    ("Fintech", "52"),
    ("Healthcare", "62"),
    ("Food/QSR", "72"),
    ("Logistics/Delivery", "48-49"),
    ("Real Estate/PropTech", "53"),
    ("Biotech/Deep Tech", "54171"),
    ("Manufacturing/Industrial", "31-33"),
];

pub fn naics_code(domain: &str) -> Option<&'static str> {
    NAICS_CODES
        .iter()
        .find(|(d, _)| *d == domain)
        .map(|(_, code)| *code)
}

/// Keywords that match a domain, if the domain is known.
pub fn domain_keywords(domain: &str) -> Option<&'static [&'static str]> {
    DOMAIN_KEYWORDS
        .iter()
        .find(|(d, _)| *d == domain)
        .map(|(_, kws)| *kws)
}

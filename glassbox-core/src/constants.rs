/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SQS component weights: authority, freshness, independence, directness, consistency, legal.
pub const SQS_WEIGHTS: [f64; 6] = [0.25, 0.20, 0.15, 0.15, 0.15, 0.10];

/// Evidence weight multiplier per grade.
pub const GRADE_WEIGHT_E1: f64 = 0.25;
pub const GRADE_WEIGHT_E2: f64 = 0.6;
pub const GRADE_WEIGHT_E3: f64 = 0.9;

/// Cross-reference count at which independence saturates.
pub const MAX_CROSS_REFERENCES: usize = 5;

/// Score scale upper bound shared by every formula.
pub const MAX_SCORE: f64 = 10.0;

/// Domain used when no classification keyword matched.
pub const DEFAULT_DOMAIN: &str = "B2B SaaS";

/// Classification confidence reported for the fallback domain.
pub const FALLBACK_DOMAIN_CONFIDENCE: f64 = 0.1;

/// Secondary domains must score at least this fraction of the primary.
pub const SECONDARY_DOMAIN_RATIO: f64 = 0.5;

/// Actor recorded for pipeline-generated audit entries.
pub const SYSTEM_ACTOR: &str = "system";

/// Analyst name stamped on machine-generated decisions.
pub const DECISION_AUTHOR: &str = "Glass-Box Engine";

// Single source of truth for all default values.

// --- Evidence ---
pub const DEFAULT_CONFLICT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_CONSISTENCY: f64 = 0.8;
pub const DEFAULT_CONSISTENCY_PENALTY: f64 = 0.3;
pub const DEFAULT_CONSISTENCY_FLOOR: f64 = 0.1;
pub const DEFAULT_RECENCY_TAU_DAYS: u64 = 90;
pub const DEFAULT_AUTHORITY: f64 = 0.5;

// --- Orchestration ---
pub const DEFAULT_DOMAIN_WEIGHT_BUDGET: f64 = 0.2;

// --- Scoring ---
pub const DEFAULT_ML_CONFIDENCE_MULTIPLIER: f64 = 0.8;
pub const DEFAULT_FALLBACK_METRIC_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_ERROR_CONFIDENCE: f64 = 0.1;
pub const DEFAULT_REGULATORY_RISK_CAP: f64 = 2.0;
pub const DEFAULT_MARKET_RISK_CAP: f64 = 1.5;
pub const DEFAULT_GROSS_MARGIN_BENCHMARK: f64 = 60.0;
pub const DEFAULT_APPLY_RISK_ADJUSTMENT: bool = true;

// --- Decision ---
pub const DEFAULT_INVEST_SCORE: f64 = 7.5;
pub const DEFAULT_INVEST_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_MONITOR_SCORE: f64 = 6.0;
pub const DEFAULT_MONITOR_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_STRENGTH_THRESHOLD: f64 = 7.0;
pub const DEFAULT_CONCERN_THRESHOLD: f64 = 5.0;

// --- Bias ---
pub const DEFAULT_BIAS_FLAG_THRESHOLD: f64 = 0.25;

// --- Pipeline ---
pub const DEFAULT_PIPELINE_TIMEOUT_SECS: u64 = 300;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::company::CompanyStage;

/// Industry/stage percentile markers for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub metric_name: String,
    pub industry: String,
    pub stage: CompanyStage,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
    pub sample_size: Option<u32>,
    pub data_source: String,
    pub updated_at: DateTime<Utc>,
}

impl Benchmark {
    /// The p25/p50/p75 markers, when all three are present.
    pub fn quartiles(&self) -> Option<(f64, f64, f64)> {
        Some((self.p25?, self.p50?, self.p75?))
    }
}

/// Where a score landed against a benchmark and the nudge applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub metric_name: String,
    pub percentile_band: String,
    pub adjustment: f64,
    pub benchmark_median: Option<f64>,
    pub sample_size: Option<u32>,
}

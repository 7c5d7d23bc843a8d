//! Benchmark lookup and percentile nudges.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use glassbox_core::models::{Benchmark, BenchmarkComparison, CompanyStage};

const TOP_QUARTILE_NUDGE: f64 = 0.5;
const ABOVE_MEDIAN_NUDGE: f64 = 0.2;
const BELOW_MEDIAN_NUDGE: f64 = -0.2;
const BOTTOM_QUARTILE_NUDGE: f64 = -0.5;

/// Compare a metric score against a benchmark's p25/p50/p75 markers.
///
/// Markers are on the same 0–10 scale as the score. A benchmark missing any
/// quartile yields no adjustment.
pub fn compare(score: f64, benchmark: &Benchmark) -> BenchmarkComparison {
    let (band, adjustment) = match benchmark.quartiles() {
        Some((_, _, p75)) if score >= p75 => ("top 25%", TOP_QUARTILE_NUDGE),
        Some((_, p50, _)) if score >= p50 => ("top 50%", ABOVE_MEDIAN_NUDGE),
        Some((p25, _, _)) if score >= p25 => ("bottom 50%", BELOW_MEDIAN_NUDGE),
        Some(_) => ("bottom 25%", BOTTOM_QUARTILE_NUDGE),
        None => ("no benchmark", 0.0),
    };
    BenchmarkComparison {
        metric_name: benchmark.metric_name.clone(),
        percentile_band: band.to_string(),
        adjustment,
        benchmark_median: benchmark.p50,
        sample_size: benchmark.sample_size,
    }
}

/// Score-scale benchmarks keyed by industry, stage and metric name.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkCatalog {
    entries: HashMap<(String, CompanyStage), HashMap<String, Benchmark>>,
}

impl BenchmarkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the benchmark for its (industry, stage, metric).
    pub fn insert(&mut self, benchmark: Benchmark) {
        self.entries
            .entry((benchmark.industry.clone(), benchmark.stage))
            .or_default()
            .insert(benchmark.metric_name.clone(), benchmark);
    }

    pub fn get(&self, industry: &str, stage: CompanyStage, metric: &str) -> Option<&Benchmark> {
        self.entries
            .get(&(industry.to_string(), stage))
            .and_then(|by_metric| by_metric.get(metric))
    }

    /// Every benchmark for one industry and stage, keyed by metric name.
    pub fn for_context(&self, industry: &str, stage: CompanyStage) -> HashMap<String, Benchmark> {
        self.entries
            .get(&(industry.to_string(), stage))
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Benchmark> for BenchmarkCatalog {
    fn from_iter<I: IntoIterator<Item = Benchmark>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for benchmark in iter {
            catalog.insert(benchmark);
        }
        catalog
    }
}

/// Reference raw-metric percentiles (months, ratios, percentages) for
/// display alongside scores. Not used for score nudges.
pub fn reference_benchmarks() -> Vec<Benchmark> {
    const TABLE: &[(&str, CompanyStage, &str, f64, f64, f64)] = &[
        ("B2B SaaS", CompanyStage::Seed, "cac_payback_months", 8.0, 12.0, 18.0),
        ("B2B SaaS", CompanyStage::Seed, "ltv_cac_ratio", 2.5, 3.2, 4.8),
        ("B2B SaaS", CompanyStage::Seed, "gross_margin", 65.0, 75.0, 85.0),
        ("B2B SaaS", CompanyStage::Seed, "burn_multiple", 1.5, 2.2, 3.5),
        ("B2B SaaS", CompanyStage::SeriesA, "cac_payback_months", 6.0, 9.0, 14.0),
        ("B2B SaaS", CompanyStage::SeriesA, "ltv_cac_ratio", 3.0, 4.2, 6.5),
        ("B2B SaaS", CompanyStage::SeriesA, "gross_margin", 70.0, 80.0, 90.0),
        ("B2B SaaS", CompanyStage::SeriesA, "burn_multiple", 1.0, 1.5, 2.5),
        ("D2C/E-commerce", CompanyStage::Seed, "gross_margin", 30.0, 45.0, 60.0),
        ("D2C/E-commerce", CompanyStage::Seed, "repeat_purchase_rate", 15.0, 25.0, 40.0),
    ];
    let updated_at = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default();

    TABLE
        .iter()
        .map(|&(industry, stage, metric, p25, p50, p75)| Benchmark {
            metric_name: metric.to_string(),
            industry: industry.to_string(),
            stage,
            p25: Some(p25),
            p50: Some(p50),
            p75: Some(p75),
            p90: None,
            sample_size: None,
            data_source: "reference".to_string(),
            updated_at,
        })
        .collect()
}

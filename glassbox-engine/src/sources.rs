//! Ready-made external data sources.

use chrono::Utc;

use glassbox_core::errors::GlassBoxResult;
use glassbox_core::models::{Company, ExternalPayload, ExternalRecord, MetricValue};
use glassbox_core::traits::IExternalDataSource;

/// Serves a fixed set of records for every company. Useful for replaying
/// an export from a payments or company-data provider.
#[derive(Debug, Clone)]
pub struct StaticDataSource {
    source_type: String,
    records: Vec<ExternalRecord>,
    license_valid: bool,
}

impl StaticDataSource {
    pub fn new(source_type: impl Into<String>) -> Self {
        Self {
            source_type: source_type.into(),
            records: Vec::new(),
            license_valid: true,
        }
    }

    pub fn with_record(mut self, metric_name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.records.push(ExternalRecord {
            metric_name: metric_name.into(),
            value: value.into(),
        });
        self
    }

    /// Mark the data as held without a valid license.
    pub fn unlicensed(mut self) -> Self {
        self.license_valid = false;
        self
    }
}

impl IExternalDataSource for StaticDataSource {
    fn source_type(&self) -> &str {
        &self.source_type
    }

    fn fetch(&self, company: &Company) -> GlassBoxResult<Vec<ExternalPayload>> {
        if self.records.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![ExternalPayload {
            source_type: self.source_type.clone(),
            source_ref: format!("{}:{}", self.source_type, company.id),
            records: self.records.clone(),
            retrieved_at: Utc::now(),
            license_valid: self.license_valid,
        }])
    }
}

use serde::{Deserialize, Serialize};

use super::company::CompanyStage;

/// Domain and stage assigned to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub primary_domain: String,
    pub secondary_domains: Vec<String>,
    /// `primary score / total score`, or the fallback confidence.
    pub confidence: f64,
    pub stage: CompanyStage,
    /// Matched keywords per domain, in table order.
    pub keywords_found: Vec<(String, Vec<String>)>,
    pub naics_code: Option<String>,
}

impl Classification {
    /// Primary followed by secondary domains.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_domain.as_str())
            .chain(self.secondary_domains.iter().map(String::as_str))
    }
}

//! Keyword-vote domain and stage classifier.
//!
//! Deterministic: identical text always yields the identical classification,
//! with ties resolved by table order.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use glassbox_core::constants::{DEFAULT_DOMAIN, FALLBACK_DOMAIN_CONFIDENCE, SECONDARY_DOMAIN_RATIO};
use glassbox_core::models::{Classification, Company, CompanyStage};

use crate::keywords::{self, DOMAIN_KEYWORDS, STAGE_KEYWORDS};

const PRE_SEED_MAX_AGE_DAYS: i64 = 365;
const SEED_MAX_AGE_DAYS: i64 = 730;

#[derive(Debug, Clone, Default)]
pub struct DomainClassifier;

struct DomainScore {
    domain: &'static str,
    score: usize,
    keywords: Vec<String>,
}

impl DomainClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify using the current time for age-based stage inference.
    pub fn classify(&self, company: &Company, description_text: &str, website_text: &str) -> Classification {
        self.classify_at(company, description_text, website_text, Utc::now())
    }

    #[instrument(skip_all, fields(company = %company.name))]
    pub fn classify_at(
        &self,
        company: &Company,
        description_text: &str,
        website_text: &str,
        now: DateTime<Utc>,
    ) -> Classification {
        let text = combined_text(company, description_text, website_text);

        let mut scores: Vec<DomainScore> = DOMAIN_KEYWORDS
            .iter()
            .filter_map(|(domain, kws)| {
                let matched: Vec<&str> = kws.iter().copied().filter(|kw| text.contains(kw)).collect();
                if matched.is_empty() {
                    return None;
                }
                Some(DomainScore {
                    domain: *domain,
                    score: matched.iter().map(|kw| kw.split_whitespace().count()).sum(),
                    keywords: matched.into_iter().map(str::to_string).collect(),
                })
            })
            .collect();
        // Stable sort keeps table order among equal scores.
        scores.sort_by(|a, b| b.score.cmp(&a.score));

        let stage = self.classify_stage(&text, company, now);

        let Some(primary) = scores.first() else {
            debug!("no domain keyword matched, using fallback domain");
            return Classification {
                primary_domain: DEFAULT_DOMAIN.to_string(),
                secondary_domains: Vec::new(),
                confidence: FALLBACK_DOMAIN_CONFIDENCE,
                stage,
                keywords_found: Vec::new(),
                naics_code: keywords::naics_code(DEFAULT_DOMAIN).map(str::to_string),
            };
        };

        let primary_score = primary.score as f64;
        let total: usize = scores.iter().map(|s| s.score).sum();
        let secondary_domains = scores[1..]
            .iter()
            .filter(|s| s.score as f64 >= primary_score * SECONDARY_DOMAIN_RATIO)
            .map(|s| s.domain.to_string())
            .collect();

        let classification = Classification {
            primary_domain: primary.domain.to_string(),
            secondary_domains,
            confidence: primary_score / total as f64,
            stage,
            naics_code: keywords::naics_code(primary.domain).map(str::to_string),
            keywords_found: scores
                .into_iter()
                .map(|s| (s.domain.to_string(), s.keywords))
                .collect(),
        };
        debug!(
            primary = %classification.primary_domain,
            confidence = classification.confidence,
            stage = %classification.stage,
            "classified"
        );
        classification
    }

    /// Stage by keyword vote, then declared stage, then company age, then seed.
    pub fn classify_stage(&self, text: &str, company: &Company, now: DateTime<Utc>) -> CompanyStage {
        let mut best: Option<(CompanyStage, usize)> = None;
        for (stage, kws) in STAGE_KEYWORDS {
            let votes = kws.iter().filter(|kw| text.contains(*kw)).count();
            if votes > 0 && best.map_or(true, |(_, top)| votes > top) {
                best = Some((*stage, votes));
            }
        }
        if let Some((stage, _)) = best {
            return stage;
        }
        if let Some(declared) = company.stage {
            return declared;
        }
        match company.age_days(now) {
            Some(days) if days <= PRE_SEED_MAX_AGE_DAYS => CompanyStage::PreSeed,
            Some(days) if days <= SEED_MAX_AGE_DAYS => CompanyStage::Seed,
            Some(_) => CompanyStage::SeriesA,
            None => CompanyStage::Seed,
        }
    }
}

/// Description, name, and any extra text, lower-cased.
fn combined_text(company: &Company, description_text: &str, website_text: &str) -> String {
    [
        company.description.as_deref().unwrap_or(""),
        company.name.as_str(),
        description_text,
        website_text,
    ]
    .join(" ")
    .to_lowercase()
}

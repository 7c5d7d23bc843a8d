use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::intake::DocumentIntake;

/// Company development stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStage {
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    Later,
}

impl CompanyStage {
    pub const ALL: [CompanyStage; 5] = [
        Self::PreSeed,
        Self::Seed,
        Self::SeriesA,
        Self::SeriesB,
        Self::Later,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreSeed => "pre_seed",
            Self::Seed => "seed",
            Self::SeriesA => "series_a",
            Self::SeriesB => "series_b",
            Self::Later => "later",
        }
    }
}

impl std::fmt::Display for CompanyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Founder or team member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub background: Option<String>,
    pub education: Option<String>,
    /// 1 (baseline) – 3 (top-tier institution).
    pub education_tier: Option<u8>,
    pub experience_years: Option<f64>,
    pub previous_exits: u32,
    pub linkedin_connections: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PitchDeck,
    FinancialStatement,
    BusinessPlan,
    Other,
}

impl DocumentKind {
    /// Evidence source type for facts extracted from this kind of document.
    pub fn source_type(self) -> &'static str {
        match self {
            Self::PitchDeck => "pitch_deck",
            Self::FinancialStatement => "financial_statement",
            Self::BusinessPlan => "business_plan",
            Self::Other => "self_reported",
        }
    }
}

/// An uploaded document, already parsed upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub kind: DocumentKind,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub intake: DocumentIntake,
    /// Extracted free text, used for classification and snippets.
    #[serde(default)]
    pub text: Option<String>,
}

/// The startup being evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Declared stage, if the founders gave one.
    #[serde(default)]
    pub stage: Option<CompanyStage>,
    #[serde(default)]
    pub founded_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub team: Vec<Person>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub domain_labels: Vec<String>,
    /// Self-reported data entered directly rather than via a document.
    #[serde(default)]
    pub intake: DocumentIntake,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            website: None,
            industry: None,
            stage: None,
            founded_date: None,
            location: None,
            team: Vec::new(),
            documents: Vec::new(),
            domain_labels: Vec::new(),
            intake: DocumentIntake::default(),
        }
    }

    /// Company intake folded with every document's intake, in order.
    pub fn merged_intake(&self) -> DocumentIntake {
        let mut merged = self.intake.clone();
        for doc in &self.documents {
            merged.merge(&doc.intake);
        }
        merged
    }

    /// Days since founding, if known and not in the future.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.founded_date
            .map(|founded| (now - founded).num_days())
            .filter(|days| *days >= 0)
    }

    /// Total prior exits across the team.
    pub fn team_exits(&self) -> u32 {
        self.team.iter().map(|p| p.previous_exits).sum()
    }
}

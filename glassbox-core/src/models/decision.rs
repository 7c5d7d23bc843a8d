use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Invest,
    Monitor,
    Pass,
}

impl Recommendation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invest => "invest",
            Self::Monitor => "monitor",
            Self::Pass => "pass",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The terminal artifact of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub rationale: String,
    pub key_strengths: Vec<String>,
    pub key_concerns: Vec<String>,
    pub follow_up_items: Vec<String>,
    pub analyst: String,
    pub timestamp: DateTime<Utc>,
}

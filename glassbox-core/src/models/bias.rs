use serde::{Deserialize, Serialize};

/// Feature categories neutralised during counterfactual re-scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasFeature {
    Education,
    Network,
    NameInferable,
}

impl BiasFeature {
    pub const ALL: [BiasFeature; 3] = [Self::Education, Self::Network, Self::NameInferable];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Network => "network",
            Self::NameInferable => "name_inferable",
        }
    }
}

/// Outcome of bias analysis. One per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub identity_blind_score: f64,
    pub full_score: f64,
    /// `full_score - identity_blind_score`.
    pub bias_delta: f64,
    /// Per-feature deltas, human readable.
    pub contributing_factors: Vec<String>,
    pub flagged_features: Vec<BiasFeature>,
    pub confidence: f64,
}

impl BiasReport {
    pub fn is_flagged(&self) -> bool {
        !self.flagged_features.is_empty()
    }
}

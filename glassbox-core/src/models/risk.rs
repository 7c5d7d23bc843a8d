use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Regulatory,
    Market,
    Technical,
    Team,
    Financial,
    Evidence,
}

impl RiskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regulatory => "regulatory",
            Self::Market => "market",
            Self::Technical => "technical",
            Self::Team => "team",
            Self::Financial => "financial",
            Self::Evidence => "evidence",
        }
    }
}

/// An identified risk. Severity and likelihood are in [0.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    pub category: RiskCategory,
    pub description: String,
    pub severity: f64,
    pub likelihood: f64,
    pub mitigation: Option<String>,
}

impl Risk {
    pub fn new(
        category: RiskCategory,
        description: impl Into<String>,
        severity: f64,
        likelihood: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            description: description.into(),
            severity: severity.clamp(0.0, 1.0),
            likelihood: likelihood.clamp(0.0, 1.0),
            mitigation: None,
        }
    }

    pub fn with_mitigation(mut self, mitigation: impl Into<String>) -> Self {
        self.mitigation = Some(mitigation.into());
        self
    }

    /// `severity × likelihood`.
    pub fn exposure(&self) -> f64 {
        self.severity * self.likelihood
    }
}

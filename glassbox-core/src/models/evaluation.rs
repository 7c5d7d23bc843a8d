use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::audit::{AuditAction, AuditActor, AuditLog};
use super::bias::BiasReport;
use super::classification::Classification;
use super::company::Company;
use super::decision::Decision;
use super::module::EvaluationModule;
use super::risk::Risk;
use crate::errors::PipelineError;

/// Evaluation lifecycle: `Pending → Processing → {Completed, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl EvaluationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Single forward path. `Pending` may fail directly (e.g. cancelled
    /// before the task started).
    pub fn can_transition_to(self, next: EvaluationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Pending, Self::Failed)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationType {
    FastScan,
    DeepDive,
}

impl EvaluationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FastScan => "fast_scan",
            Self::DeepDive => "deep_dive",
        }
    }
}

/// The aggregate root of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: String,
    pub company: Arc<Company>,
    pub evaluation_type: EvaluationType,
    pub analyst: String,
    pub classification: Option<Classification>,
    pub modules: Vec<EvaluationModule>,
    pub overall_score: f64,
    pub overall_confidence: f64,
    pub risks: Vec<Risk>,
    pub bias_report: Option<BiasReport>,
    pub decision: Option<Decision>,
    status: EvaluationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    audit_log: AuditLog,
}

impl Evaluation {
    pub fn new(company: Arc<Company>, evaluation_type: EvaluationType, analyst: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            company,
            evaluation_type,
            analyst: analyst.into(),
            classification: None,
            modules: Vec::new(),
            overall_score: 0.0,
            overall_confidence: 0.0,
            risks: Vec::new(),
            bias_report: None,
            decision: None,
            status: EvaluationStatus::Pending,
            created_at: now,
            updated_at: now,
            completed_at: None,
            audit_log: AuditLog::new(),
        }
    }

    pub fn status(&self) -> EvaluationStatus {
        self.status
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit_log
    }

    /// Move to `next`, rejecting anything off the forward path.
    pub fn transition(&mut self, next: EvaluationStatus) -> Result<(), PipelineError> {
        if !self.status.can_transition_to(next) {
            return Err(PipelineError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        if next == EvaluationStatus::Completed {
            self.completed_at = Some(self.updated_at);
        }
        Ok(())
    }

    /// Append an audit entry.
    pub fn record(&mut self, action: AuditAction, details: serde_json::Value, actor: AuditActor) {
        self.audit_log.append(action, details, actor);
        self.updated_at = Utc::now();
    }

    /// Module-weight-weighted score. Unscored modules count as 0. Pure.
    pub fn calculate_overall_score(&self) -> f64 {
        let total: f64 = self.modules.iter().map(|m| m.weight).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self
            .modules
            .iter()
            .filter_map(|m| m.score.map(|s| s * m.weight))
            .sum();
        weighted / total
    }

    /// Module-weight-weighted confidence. Pure.
    pub fn calculate_overall_confidence(&self) -> f64 {
        let total: f64 = self.modules.iter().map(|m| m.weight).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self.modules.iter().map(|m| m.confidence * m.weight).sum();
        weighted / total
    }

    /// Store both overall figures.
    pub fn refresh_overall(&mut self) {
        self.overall_score = self.calculate_overall_score();
        self.overall_confidence = self.calculate_overall_confidence();
    }

    pub fn modules_completed(&self) -> usize {
        self.modules.iter().filter(|m| m.is_scored()).count()
    }

    pub fn module(&self, id: &str) -> Option<&EvaluationModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn module_mut(&mut self, id: &str) -> Option<&mut EvaluationModule> {
        self.modules.iter_mut().find(|m| m.id == id)
    }
}

use crate::models::EvaluationStatus;

/// Errors raised while an evaluation pipeline is running.
/// Any of these moves the evaluation to `failed`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("stage {stage} failed: {reason}")]
    StageFailed { stage: String, reason: String },

    #[error("invalid status transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: EvaluationStatus,
        to: EvaluationStatus,
    },

    #[error("evaluation exceeded its deadline of {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("evaluation cancelled")]
    Cancelled,
}

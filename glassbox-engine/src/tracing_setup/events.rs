//! Structured log events for evaluation lifecycle milestones.

use glassbox_core::models::EvaluationStatus;

pub fn evaluation_started(evaluation_id: &str, company: &str) {
    tracing::info!(
        event = "evaluation_started",
        evaluation_id = %evaluation_id,
        company = %company,
        "evaluation started"
    );
}

pub fn stage_completed(evaluation_id: &str, stage: &str) {
    tracing::debug!(
        event = "stage_completed",
        evaluation_id = %evaluation_id,
        stage = %stage,
        "stage completed"
    );
}

/// Log a terminal status. Failures go out at `warn` with their error code.
pub fn evaluation_finished(
    evaluation_id: &str,
    status: EvaluationStatus,
    overall_score: f64,
    error_code: Option<&str>,
) {
    match error_code {
        None => tracing::info!(
            event = "evaluation_finished",
            evaluation_id = %evaluation_id,
            status = %status,
            overall_score = overall_score,
            "evaluation finished"
        ),
        Some(code) => tracing::warn!(
            event = "evaluation_finished",
            evaluation_id = %evaluation_id,
            status = %status,
            error_code = %code,
            "evaluation failed"
        ),
    }
}

/// Log an external source that could not be read. The evaluation continues.
pub fn source_failed(evaluation_id: &str, source_type: &str, error: &str) {
    tracing::warn!(
        event = "api_ingestion_failed",
        evaluation_id = %evaluation_id,
        source_type = %source_type,
        error = %error,
        "api ingestion failed"
    );
}

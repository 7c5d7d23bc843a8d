//! 7-stage evaluation pipeline.
//!
//! Stage 1: Classification → Stage 2: Module Selection → Stage 3: Evidence →
//! Stage 4: Scoring → Stage 5: Risk → Stage 6: Bias → Stage 7: Decision
//!
//! The whole run is bounded by the configured deadline and can be cancelled
//! through the evaluation handle. A snapshot is written to the repository
//! after every stage; any error moves the evaluation to `failed`.

pub mod phase1_classification;
pub mod phase2_selection;
pub mod phase3_evidence;
pub mod phase4_scoring;
pub mod phase5_risk;
pub mod phase6_bias;
pub mod phase7_decision;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tokio::sync::watch;
use tracing::{info_span, Instrument};

use glassbox_core::errors::{GlassBoxError, GlassBoxErrorCode, GlassBoxResult, PipelineError};
use glassbox_core::models::{AuditAction, AuditActor, Evaluation, EvaluationStatus};

use crate::engine::EngineInner;
use crate::tracing_setup::{events, PIPELINE_SPAN};

/// Run an evaluation to a terminal status.
///
/// Pipeline failures are recorded on the evaluation and reported as
/// `Ok(Failed)`. `Err` means the failure itself could not be persisted.
pub(crate) async fn drive(
    inner: Arc<EngineInner>,
    mut evaluation: Evaluation,
    custom_weights: Option<HashMap<String, f64>>,
    mut cancel: watch::Receiver<bool>,
) -> GlassBoxResult<EvaluationStatus> {
    let span = info_span!(PIPELINE_SPAN, evaluation_id = %evaluation.id);
    async move {
        let timeout_ms = inner.config.pipeline.timeout_ms;
        let deadline = inner.config.pipeline.timeout();

        let outcome: GlassBoxResult<()> = tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => Err(PipelineError::Cancelled.into()),
            result = tokio::time::timeout(deadline, run(&inner, &mut evaluation, custom_weights.as_ref())) => {
                result.unwrap_or_else(|_| Err(PipelineError::Timeout { timeout_ms }.into()))
            }
        };

        match outcome {
            Ok(()) => {
                events::evaluation_finished(
                    &evaluation.id,
                    evaluation.status(),
                    evaluation.overall_score,
                    None,
                );
                Ok(evaluation.status())
            }
            Err(error) => fail(&inner, &mut evaluation, error),
        }
    }
    .instrument(span)
    .await
}

/// Resolves once cancellation is requested. Never resolves if the handle
/// was dropped without cancelling.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let sender_dropped = cancel.wait_for(|requested| *requested).await.is_err();
    if sender_dropped {
        std::future::pending::<()>().await;
    }
}

async fn run(
    inner: &EngineInner,
    evaluation: &mut Evaluation,
    custom_weights: Option<&HashMap<String, f64>>,
) -> GlassBoxResult<()> {
    evaluation.transition(EvaluationStatus::Processing)?;
    checkpoint(inner, evaluation, "processing").await?;

    // Stage 1: Classification.
    let classification = phase1_classification::run(inner, evaluation);
    checkpoint(inner, evaluation, "classification").await?;

    // Stage 2: Module Selection.
    phase2_selection::run(inner, evaluation, &classification, custom_weights)
        .map_err(|e| stage_failed("module_selection", e))?;
    checkpoint(inner, evaluation, "module_selection").await?;

    // Stage 3: Evidence.
    phase3_evidence::run(inner, evaluation, Utc::now())
        .await
        .map_err(|e| stage_failed("evidence", e))?;
    checkpoint(inner, evaluation, "evidence").await?;

    // Stage 4: Scoring.
    phase4_scoring::run(inner, evaluation, &classification);
    checkpoint(inner, evaluation, "scoring").await?;

    // Stage 5: Risk.
    phase5_risk::run(inner, evaluation, &classification);
    checkpoint(inner, evaluation, "risk").await?;

    // Stage 6: Bias.
    phase6_bias::run(inner, evaluation, &classification);
    checkpoint(inner, evaluation, "bias").await?;

    // Stage 7: Decision.
    phase7_decision::run(inner, evaluation);

    evaluation.refresh_overall();
    evaluation.transition(EvaluationStatus::Completed)?;
    evaluation.record(
        AuditAction::EvaluationCompleted,
        json!({
            "overall_score": evaluation.overall_score,
            "overall_confidence": evaluation.overall_confidence,
            "modules_count": evaluation.modules.len(),
        }),
        AuditActor::System,
    );
    inner.repository.put(evaluation)
}

/// Persist the snapshot and give the runtime a chance to observe
/// cancellation and the deadline between stages.
async fn checkpoint(inner: &EngineInner, evaluation: &Evaluation, stage: &str) -> GlassBoxResult<()> {
    inner.repository.put(evaluation)?;
    events::stage_completed(&evaluation.id, stage);
    tokio::task::yield_now().await;
    Ok(())
}

fn stage_failed(stage: &str, error: GlassBoxError) -> GlassBoxError {
    PipelineError::StageFailed {
        stage: stage.to_string(),
        reason: error.to_string(),
    }
    .into()
}

fn fail(
    inner: &EngineInner,
    evaluation: &mut Evaluation,
    error: GlassBoxError,
) -> GlassBoxResult<EvaluationStatus> {
    // Completed but not persisted: nothing left to mark.
    if evaluation.status().is_terminal() {
        return Err(error);
    }
    let code = error.error_code();
    evaluation.transition(EvaluationStatus::Failed)?;
    evaluation.record(
        AuditAction::EvaluationFailed,
        json!({ "error": error.to_string(), "error_code": code }),
        AuditActor::System,
    );
    inner.repository.put(evaluation)?;
    events::evaluation_finished(
        &evaluation.id,
        evaluation.status(),
        evaluation.overall_score,
        Some(code),
    );
    Ok(evaluation.status())
}

//! Handle to a running evaluation.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use glassbox_core::errors::{GlassBoxError, GlassBoxResult};
use glassbox_core::models::EvaluationStatus;

/// Returned by `start_evaluation`. Dropping the handle detaches the
/// pipeline; it still runs to a terminal status.
#[derive(Debug)]
pub struct EvaluationHandle {
    id: String,
    cancel: watch::Sender<bool>,
    task: JoinHandle<GlassBoxResult<EvaluationStatus>>,
}

impl EvaluationHandle {
    pub(crate) fn new(
        id: String,
        cancel: watch::Sender<bool>,
        task: JoinHandle<GlassBoxResult<EvaluationStatus>>,
    ) -> Self {
        Self { id, cancel, task }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Request cancellation. The evaluation is marked failed with a
    /// `CANCELLED` error unless it already reached a terminal status.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the terminal status. A failed evaluation is `Ok(Failed)`;
    /// `Err` means the pipeline task itself broke.
    pub async fn join(self) -> GlassBoxResult<EvaluationStatus> {
        self.task
            .await
            .map_err(|e| GlassBoxError::ConcurrencyError(format!("evaluation task: {e}")))?
    }
}

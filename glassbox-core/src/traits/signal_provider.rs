use crate::errors::GlassBoxResult;
use crate::models::{FormulaInputs, FormulaOutcome, SignalKind};

/// Model-based scoring signals with a fixed input/output contract.
pub trait IScoringSignalProvider: Send + Sync {
    /// Human-readable provider name, recorded in score breakdowns.
    fn name(&self) -> &str;

    /// Score one signal. The returned score is clamped to [0, 10] by the caller.
    fn score_signal(&self, kind: SignalKind, inputs: &FormulaInputs) -> GlassBoxResult<FormulaOutcome>;
}

use crate::errors::GlassBoxResult;
use crate::models::Evaluation;

/// Evaluation snapshots keyed by id.
///
/// The pipeline writes a fresh snapshot after every stage; readers only
/// ever see whole snapshots.
pub trait IEvaluationRepository: Send + Sync {
    fn get(&self, id: &str) -> GlassBoxResult<Option<Evaluation>>;

    /// Insert or replace the snapshot for `evaluation.id`.
    fn put(&self, evaluation: &Evaluation) -> GlassBoxResult<()>;

    /// Apply `mutate` to the stored snapshot as one atomic step and return
    /// the new snapshot, or `None` when `id` is unknown. If `mutate` fails
    /// the stored snapshot is left unchanged.
    fn update(
        &self,
        id: &str,
        mutate: &mut dyn FnMut(&mut Evaluation) -> GlassBoxResult<()>,
    ) -> GlassBoxResult<Option<Evaluation>>;

    /// Every stored evaluation id.
    fn list(&self) -> GlassBoxResult<Vec<String>>;
}

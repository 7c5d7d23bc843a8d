//! In-memory evaluation store.

use dashmap::DashMap;

use glassbox_core::errors::GlassBoxResult;
use glassbox_core::models::Evaluation;
use glassbox_core::traits::IEvaluationRepository;

/// Snapshot store backed by a concurrent map. Readers get owned clones,
/// so no reference outlives a write.
#[derive(Debug, Default)]
pub struct InMemoryEvaluationRepository {
    evaluations: DashMap<String, Evaluation>,
}

impl InMemoryEvaluationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }
}

impl IEvaluationRepository for InMemoryEvaluationRepository {
    fn get(&self, id: &str) -> GlassBoxResult<Option<Evaluation>> {
        Ok(self.evaluations.get(id).map(|entry| entry.value().clone()))
    }

    fn put(&self, evaluation: &Evaluation) -> GlassBoxResult<()> {
        self.evaluations
            .insert(evaluation.id.clone(), evaluation.clone());
        Ok(())
    }

    fn update(
        &self,
        id: &str,
        mutate: &mut dyn FnMut(&mut Evaluation) -> GlassBoxResult<()>,
    ) -> GlassBoxResult<Option<Evaluation>> {
        // The entry guard holds the shard lock until the write lands.
        let Some(mut entry) = self.evaluations.get_mut(id) else {
            return Ok(None);
        };
        let mut draft = entry.value().clone();
        mutate(&mut draft)?;
        *entry.value_mut() = draft.clone();
        Ok(Some(draft))
    }

    fn list(&self) -> GlassBoxResult<Vec<String>> {
        let mut ids: Vec<String> = self.evaluations.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}

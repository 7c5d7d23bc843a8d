//! Phase 2: weighted module playlist.

use std::collections::HashMap;

use serde_json::json;
use tracing::instrument;

use glassbox_core::errors::GlassBoxResult;
use glassbox_core::models::{AuditAction, AuditActor, Classification, Evaluation};

use crate::engine::EngineInner;

#[instrument(name = "glassbox.stage", skip_all, fields(stage = "module_selection"))]
pub(crate) fn run(
    inner: &EngineInner,
    evaluation: &mut Evaluation,
    classification: &Classification,
    custom_weights: Option<&HashMap<String, f64>>,
) -> GlassBoxResult<()> {
    let modules = inner.orchestrator.build_playlist(classification, custom_weights);
    let rationale = inner
        .orchestrator
        .rationale(classification, &modules, custom_weights);

    let selected: Vec<serde_json::Value> = modules
        .iter()
        .map(|m| json!({ "id": m.id, "name": m.name, "kind": m.kind.as_str(), "weight": m.weight }))
        .collect();
    evaluation.modules = modules;
    evaluation.record(
        AuditAction::ModulesSelected,
        json!({
            "modules": selected,
            "rationale": serde_json::to_value(&rationale)?,
        }),
        AuditActor::System,
    );
    Ok(())
}

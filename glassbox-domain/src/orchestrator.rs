//! Classification → weighted module playlist.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use glassbox_core::config::OrchestrationConfig;
use glassbox_core::models::{Classification, CompanyStage, EvaluationModule, ModuleKind};

use crate::catalog::{self, ModuleDefinition, CORE_MODULES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRationale {
    pub primary: String,
    pub secondary: Vec<String>,
    pub confidence: f64,
    pub keywords_found: Vec<(String, Vec<String>)>,
    pub naics_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRationale {
    pub stage: CompanyStage,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRationale {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub rationale: String,
}

/// Human-readable justification of a playlist. Audit display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRationale {
    pub domain_classification: DomainRationale,
    pub stage_classification: StageRationale,
    pub core_modules: Vec<ModuleRationale>,
    pub domain_modules: Vec<ModuleRationale>,
    pub custom_weights_applied: Vec<String>,
    pub weight_explanation: String,
}

#[derive(Debug, Clone, Default)]
pub struct ModuleOrchestrator {
    config: OrchestrationConfig,
}

impl ModuleOrchestrator {
    pub fn new(config: OrchestrationConfig) -> Self {
        Self { config }
    }

    /// Core modules weighted by stage plus the primary domain's modules
    /// sharing the domain budget. Custom weights replace any module's weight
    /// by id before normalisation. The result always sums to 1.0.
    #[instrument(skip_all, fields(domain = %classification.primary_domain, stage = %classification.stage))]
    pub fn build_playlist(
        &self,
        classification: &Classification,
        custom_weights: Option<&HashMap<String, f64>>,
    ) -> Vec<EvaluationModule> {
        let domain_defs = catalog::domain_modules(&classification.primary_domain);
        let domain_share = if domain_defs.is_empty() {
            0.0
        } else {
            self.config.domain_weight_budget / domain_defs.len() as f64
        };

        let candidates = CORE_MODULES
            .iter()
            .map(|def| (def, catalog::stage_weight(classification.stage, def.id)))
            .chain(domain_defs.iter().map(|def| (def, domain_share)));

        let mut modules: Vec<EvaluationModule> = candidates
            .map(|(def, default_weight)| {
                let weight = custom_weights
                    .and_then(|w| w.get(def.id))
                    .copied()
                    .unwrap_or(default_weight);
                instantiate(def, sanitize_weight(def.id, weight))
            })
            .collect();

        normalize(&mut modules);
        debug!(modules = modules.len(), "playlist built");
        modules
    }

    pub fn rationale(
        &self,
        classification: &Classification,
        modules: &[EvaluationModule],
        custom_weights: Option<&HashMap<String, f64>>,
    ) -> PlaylistRationale {
        let stage = classification.stage;

        let stage_note = if catalog::has_stage_weights(stage) {
            format!("Stage-aware weighting applied for {stage}")
        } else {
            format!("No weight table for {stage}; seed weighting applied")
        };

        let mut custom_weights_applied: Vec<String> = custom_weights
            .map(|w| {
                w.keys()
                    .filter(|id| modules.iter().any(|m| &m.id == *id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        custom_weights_applied.sort();

        PlaylistRationale {
            domain_classification: DomainRationale {
                primary: classification.primary_domain.clone(),
                secondary: classification.secondary_domains.clone(),
                confidence: classification.confidence,
                keywords_found: classification.keywords_found.clone(),
                naics_code: classification.naics_code.clone(),
            },
            stage_classification: StageRationale {
                stage,
                rationale: stage_note,
            },
            core_modules: describe(
                modules,
                ModuleKind::Core,
                &format!("Core module always included, weight adjusted for {stage} stage"),
            ),
            domain_modules: describe(
                modules,
                ModuleKind::Domain,
                &format!("Selected for {} domain", classification.primary_domain),
            ),
            custom_weights_applied,
            weight_explanation: format!(
                "Weights optimized for {stage} stage companies in {}",
                classification.primary_domain
            ),
        }
    }
}

fn describe(modules: &[EvaluationModule], kind: ModuleKind, reason: &str) -> Vec<ModuleRationale> {
    modules
        .iter()
        .filter(|m| m.kind == kind)
        .map(|m| ModuleRationale {
            id: m.id.clone(),
            name: m.name.clone(),
            weight: m.weight,
            rationale: reason.to_string(),
        })
        .collect()
}

fn instantiate(def: &ModuleDefinition, weight: f64) -> EvaluationModule {
    let mut module = EvaluationModule::new(def.id, def.name, def.kind, def.description, weight);
    module.metrics = def.metrics.iter().map(|spec| spec.instantiate()).collect();
    module
}

fn sanitize_weight(id: &str, weight: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        warn!(module = id, weight, "invalid module weight clamped to 0");
        0.0
    }
}

/// Divide by the total, or fall back to equal weights when nothing is positive.
/// Weights are first scaled by the largest so huge overrides cannot overflow the sum.
fn normalize(modules: &mut [EvaluationModule]) {
    if modules.is_empty() {
        return;
    }
    let max = modules.iter().map(|m| m.weight).fold(0.0, f64::max);
    if max > 0.0 {
        for m in modules.iter_mut() {
            m.weight /= max;
        }
        let total: f64 = modules.iter().map(|m| m.weight).sum();
        for m in modules.iter_mut() {
            m.weight /= total;
        }
    } else {
        let equal = 1.0 / modules.len() as f64;
        for m in modules.iter_mut() {
            m.weight = equal;
        }
    }
}

//! Weighted consensus across evidence making different claims for one metric.

use serde::{Deserialize, Serialize};
use tracing::debug;

use glassbox_core::config::EvidenceConfig;
use glassbox_core::models::{EvidenceItem, Metric, MetricValue};

/// Outcome of [`ConflictResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolution {
    /// Consensus value, `None` when the metric had no evidence.
    pub value: Option<MetricValue>,
    /// Summed evidence weight of the winning claim.
    pub weight: f64,
    pub contested: bool,
    /// Summed weight of the runner-up claim, 0.0 if there was none.
    pub runner_up_weight: f64,
    /// Number of distinct claims.
    pub claim_count: usize,
}

impl ConflictResolution {
    fn empty() -> Self {
        Self {
            value: None,
            weight: 0.0,
            contested: false,
            runner_up_weight: 0.0,
            claim_count: 0,
        }
    }
}

struct ClaimGroup<'a> {
    key: String,
    weight: f64,
    representative: &'a EvidenceItem,
}

/// Evidence claiming one quantity, keyed by `metric_hint`. Items without
/// a hint form their own quantity.
struct Quantity<'a> {
    hint: Option<&'a str>,
    weight: f64,
    items: Vec<&'a EvidenceItem>,
}

#[derive(Debug, Clone)]
pub struct ConflictResolver {
    threshold: f64,
    penalty: f64,
    floor: f64,
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self::new(&EvidenceConfig::default())
    }
}

impl ConflictResolver {
    pub fn new(config: &EvidenceConfig) -> Self {
        Self {
            threshold: config.conflict_threshold,
            penalty: config.consistency_penalty,
            floor: config.consistency_floor,
        }
    }

    /// Group evidence by claim, pick the heaviest group as consensus, and
    /// mark the metric contested when the runner-up exceeds
    /// `threshold × top weight`. Contested metrics have every evidence item
    /// of the disputed quantity penalised on consistency and rescored.
    ///
    /// Only claims for the same quantity compete: the quantity named like
    /// the metric, else the heaviest hinted quantity, else un-hinted items.
    /// Writes `value` and `contested` back onto the metric.
    pub fn resolve(&self, metric: &mut Metric) -> ConflictResolution {
        let (resolution, disputed) = {
            let quantities = group_quantities(metric.evidence_items());
            match pick_quantity(&quantities, Some(metric.name.as_str())) {
                Some(quantity) => {
                    let resolution = self.resolve_claims(&quantity.items);
                    let disputed: Vec<EvidenceItem> = if resolution.contested {
                        quantity
                            .items
                            .iter()
                            .map(|e| {
                                e.with_consistency(
                                    (e.components().consistency - self.penalty).max(self.floor),
                                )
                            })
                            .collect()
                    } else {
                        Vec::new()
                    };
                    (resolution, disputed)
                }
                None => (ConflictResolution::empty(), Vec::new()),
            }
        };

        if resolution.contested {
            metric.replace_rescored(disputed);
            debug!(
                metric = %metric.name,
                top = resolution.weight,
                runner_up = resolution.runner_up_weight,
                "metric contested"
            );
        }
        metric.value = resolution.value.clone();
        metric.contested = resolution.contested;
        resolution
    }

    /// Resolution without touching any metric. Claims are compared within
    /// the heaviest quantity.
    pub fn evaluate(&self, items: &[EvidenceItem]) -> ConflictResolution {
        self.evaluate_for(None, items)
    }

    /// Like [`evaluate`](Self::evaluate), preferring evidence hinted for
    /// `metric_name`.
    pub fn evaluate_for(&self, metric_name: Option<&str>, items: &[EvidenceItem]) -> ConflictResolution {
        let quantities = group_quantities(items);
        match pick_quantity(&quantities, metric_name) {
            Some(quantity) => self.resolve_claims(&quantity.items),
            None => ConflictResolution::empty(),
        }
    }

    fn resolve_claims(&self, items: &[&EvidenceItem]) -> ConflictResolution {
        let groups = group_claims(items);
        let Some(top) = groups.first() else {
            return ConflictResolution::empty();
        };
        let runner_up_weight = groups.get(1).map_or(0.0, |g| g.weight);
        let ratio = if top.weight > 0.0 {
            runner_up_weight / top.weight
        } else {
            0.0
        };
        ConflictResolution {
            value: representative_value(top.representative),
            weight: top.weight,
            contested: groups.len() > 1 && ratio > self.threshold,
            runner_up_weight,
            claim_count: groups.len(),
        }
    }
}

/// Quantities in first-seen order.
fn group_quantities(items: &[EvidenceItem]) -> Vec<Quantity<'_>> {
    let mut quantities: Vec<Quantity<'_>> = Vec::new();
    for item in items {
        let hint = item.metric_hint.as_deref();
        match quantities.iter_mut().find(|q| q.hint == hint) {
            Some(quantity) => {
                quantity.weight += item.weight();
                quantity.items.push(item);
            }
            None => quantities.push(Quantity {
                hint,
                weight: item.weight(),
                items: vec![item],
            }),
        }
    }
    quantities
}

fn pick_quantity<'q, 'a>(
    quantities: &'q [Quantity<'a>],
    metric_name: Option<&str>,
) -> Option<&'q Quantity<'a>> {
    if let Some(named) = quantities
        .iter()
        .find(|q| q.hint.is_some() && q.hint == metric_name)
    {
        return Some(named);
    }
    // Heaviest hinted quantity; ties keep first-seen order.
    let mut heaviest: Option<&Quantity<'a>> = None;
    for quantity in quantities.iter().filter(|q| q.hint.is_some()) {
        if heaviest.map_or(true, |h| quantity.weight > h.weight) {
            heaviest = Some(quantity);
        }
    }
    heaviest.or_else(|| quantities.iter().find(|q| q.hint.is_none()))
}

/// Claim groups in descending weight. Ties keep first-seen order.
fn group_claims<'a>(items: &[&'a EvidenceItem]) -> Vec<ClaimGroup<'a>> {
    let mut groups: Vec<ClaimGroup<'a>> = Vec::new();
    for &item in items {
        let key = item.claim_key();
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.weight += item.weight(),
            None => groups.push(ClaimGroup {
                key,
                weight: item.weight(),
                representative: item,
            }),
        }
    }
    groups.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    groups
}

fn representative_value(item: &EvidenceItem) -> Option<MetricValue> {
    item.claimed_value
        .clone()
        .or_else(|| item.snippet.clone().map(MetricValue::Text))
}

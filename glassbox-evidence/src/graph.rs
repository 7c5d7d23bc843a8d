//! Process-wide bipartite graph linking metrics to the evidence behind them.
//!
//! Append-only: nodes, edges and conflicts are never removed. Every node is
//! tagged with the evaluation that produced it so summaries can be scoped.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use glassbox_core::errors::{GlassBoxError, GlassBoxResult};
use glassbox_core::models::{EvidenceGrade, EvidenceItem, Metric};

use crate::conflict::ConflictResolution;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphNode {
    Metric {
        evaluation_id: String,
        metric_id: String,
        name: String,
    },
    Evidence {
        evaluation_id: String,
        evidence_id: String,
        grade: EvidenceGrade,
        source_type: String,
        source_ref: String,
    },
}

impl GraphNode {
    fn evaluation_id(&self) -> &str {
        match self {
            Self::Metric { evaluation_id, .. } | Self::Evidence { evaluation_id, .. } => evaluation_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphEdge {
    /// Metric → evidence.
    Supports,
    /// Evidence → evidence making the same claim.
    Corroborates,
    /// Evidence → evidence making a different claim.
    Contradicts,
}

/// A contested metric as recorded at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub evaluation_id: String,
    pub metric_id: String,
    pub metric_name: String,
    pub top_weight: f64,
    pub runner_up_weight: f64,
    pub claim_count: usize,
}

/// Per-evaluation view of the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub total_evidence_items: usize,
    pub evidence_by_grade: BTreeMap<String, usize>,
    pub source_breakdown: BTreeMap<String, usize>,
    pub metric_links: usize,
    pub lineage_edges: usize,
    pub conflicts: Vec<ConflictRecord>,
}

#[derive(Default)]
struct IndexedEvidenceGraph {
    graph: StableGraph<GraphNode, GraphEdge, Directed>,
    /// `"{evaluation_id}:{id}"` → node.
    node_index: HashMap<String, NodeIndex>,
    conflicts: Vec<ConflictRecord>,
}

impl IndexedEvidenceGraph {
    fn ensure_node(&mut self, key: String, node: impl FnOnce() -> GraphNode) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(node());
        self.node_index.insert(key, idx);
        idx
    }

    fn ensure_evidence(&mut self, evaluation_id: &str, item: &EvidenceItem) -> NodeIndex {
        self.ensure_node(format!("{evaluation_id}:{}", item.id), || GraphNode::Evidence {
            evaluation_id: evaluation_id.to_string(),
            evidence_id: item.id.clone(),
            grade: item.grade,
            source_type: item.source_type.clone(),
            source_ref: item.source_ref.clone(),
        })
    }

    fn ensure_metric(&mut self, evaluation_id: &str, metric: &Metric) -> NodeIndex {
        self.ensure_node(format!("{evaluation_id}:{}", metric.id), || GraphNode::Metric {
            evaluation_id: evaluation_id.to_string(),
            metric_id: metric.id.clone(),
            name: metric.name.clone(),
        })
    }

    fn add_edge_once(&mut self, from: NodeIndex, to: NodeIndex, edge: GraphEdge) -> bool {
        let exists = self
            .graph
            .edges_connecting(from, to)
            .any(|e| *e.weight() == edge);
        if !exists {
            self.graph.add_edge(from, to, edge);
        }
        !exists
    }
}

/// Thread-safe, shareable evidence graph.
#[derive(Clone, Default)]
pub struct EvidenceGraph {
    inner: Arc<RwLock<IndexedEvidenceGraph>>,
}

impl EvidenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> GlassBoxResult<RwLockReadGuard<'_, IndexedEvidenceGraph>> {
        self.inner
            .read()
            .map_err(|e| GlassBoxError::ConcurrencyError(e.to_string()))
    }

    fn write(&self) -> GlassBoxResult<RwLockWriteGuard<'_, IndexedEvidenceGraph>> {
        self.inner
            .write()
            .map_err(|e| GlassBoxError::ConcurrencyError(e.to_string()))
    }

    /// Record collected evidence. Re-adding an item is a no-op.
    pub fn add_evidence(&self, evaluation_id: &str, items: &[EvidenceItem]) -> GlassBoxResult<()> {
        let mut graph = self.write()?;
        for item in items {
            graph.ensure_evidence(evaluation_id, item);
        }
        Ok(())
    }

    /// Link a metric to each of its evidence items and record lineage
    /// between items that agree or disagree on the same quantity.
    pub fn attach_metric(&self, evaluation_id: &str, metric: &Metric) -> GlassBoxResult<()> {
        let mut graph = self.write()?;
        let metric_idx = graph.ensure_metric(evaluation_id, metric);
        let items = metric.evidence_items();
        let indices: Vec<NodeIndex> = items
            .iter()
            .map(|item| graph.ensure_evidence(evaluation_id, item))
            .collect();

        for &idx in &indices {
            graph.add_edge_once(metric_idx, idx, GraphEdge::Supports);
        }
        for (i, a) in items.iter().enumerate() {
            for (j, b) in items.iter().enumerate().skip(i + 1) {
                if a.id == b.id || a.metric_hint != b.metric_hint {
                    continue;
                }
                let edge = if a.claim_key() == b.claim_key() {
                    GraphEdge::Corroborates
                } else {
                    GraphEdge::Contradicts
                };
                graph.add_edge_once(indices[i], indices[j], edge);
            }
        }
        Ok(())
    }

    /// Record a contested resolution. Uncontested resolutions are ignored.
    pub fn record_conflict(
        &self,
        evaluation_id: &str,
        metric: &Metric,
        resolution: &ConflictResolution,
    ) -> GlassBoxResult<()> {
        if !resolution.contested {
            return Ok(());
        }
        self.write()?.conflicts.push(ConflictRecord {
            evaluation_id: evaluation_id.to_string(),
            metric_id: metric.id.clone(),
            metric_name: metric.name.clone(),
            top_weight: resolution.weight,
            runner_up_weight: resolution.runner_up_weight,
            claim_count: resolution.claim_count,
        });
        Ok(())
    }

    pub fn summary(&self, evaluation_id: &str) -> GlassBoxResult<GraphSummary> {
        let graph = self.read()?;
        let mut summary = GraphSummary::default();
        for grade in EvidenceGrade::ALL {
            summary.evidence_by_grade.insert(grade.as_str().to_string(), 0);
        }

        for idx in graph.graph.node_indices() {
            if let GraphNode::Evidence {
                evaluation_id: owner,
                grade,
                source_type,
                ..
            } = &graph.graph[idx]
            {
                if owner != evaluation_id {
                    continue;
                }
                summary.total_evidence_items += 1;
                *summary.evidence_by_grade.entry(grade.as_str().to_string()).or_default() += 1;
                *summary.source_breakdown.entry(source_type.clone()).or_default() += 1;
            }
        }

        for edge in graph.graph.edge_references() {
            if graph.graph[edge.source()].evaluation_id() != evaluation_id {
                continue;
            }
            match edge.weight() {
                GraphEdge::Supports => summary.metric_links += 1,
                GraphEdge::Corroborates | GraphEdge::Contradicts => summary.lineage_edges += 1,
            }
        }

        summary.conflicts = graph
            .conflicts
            .iter()
            .filter(|c| c.evaluation_id == evaluation_id)
            .cloned()
            .collect();
        Ok(summary)
    }

    pub fn node_count(&self) -> GlassBoxResult<usize> {
        Ok(self.read()?.graph.node_count())
    }

    pub fn edge_count(&self) -> GlassBoxResult<usize> {
        Ok(self.read()?.graph.edge_count())
    }
}

//! # glassbox-evidence
//!
//! Turns raw observations from documents and external sources into graded,
//! quality-scored evidence, resolves conflicting claims, and maintains the
//! process-wide evidence graph used for explainability.

pub mod conflict;
pub mod grading;
pub mod graph;
pub mod ingestion;
pub mod processor;
pub mod quality;

pub use conflict::{ConflictResolution, ConflictResolver};
pub use graph::{EvidenceGraph, GraphSummary};
pub use ingestion::Observation;
pub use processor::EvidenceProcessor;
pub use quality::{QualityContext, SourceQualityScorer};

//! # glassbox-core
//!
//! Foundation crate for the glass-box evaluation engine.
//! Defines the evaluation ontology, typed intake records, errors, config,
//! constants, and the capability traits injected into the pipeline.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GlassBoxConfig;
pub use errors::{GlassBoxError, GlassBoxResult};
pub use models::{
    Company, CompanyStage, EvaluationModule, Evaluation, EvaluationStatus, EvidenceGrade,
    EvidenceItem, Metric, MetricType, MetricValue,
};

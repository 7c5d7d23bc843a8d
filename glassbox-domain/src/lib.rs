//! # glassbox-domain
//!
//! Keyword-driven domain and stage classification, the catalog of core and
//! domain-specific evaluation modules, and the orchestrator that turns a
//! classification into a normalised module playlist.

pub mod catalog;
pub mod classifier;
pub mod keywords;
pub mod orchestrator;

pub use catalog::{MetricSpec, ModuleDefinition};
pub use classifier::DomainClassifier;
pub use orchestrator::{ModuleOrchestrator, PlaylistRationale};

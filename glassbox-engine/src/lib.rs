//! # glassbox-engine
//!
//! Glass-box evaluation orchestrator: runs the 7-stage pipeline per
//! evaluation on its own tokio task, persists a snapshot after every stage,
//! and serves read-only status and explainability views.

pub mod engine;
pub mod handle;
pub mod pipeline;
pub mod repository;
pub mod sources;
pub mod tracing_setup;
pub mod views;

pub use engine::{GlassBoxEngine, GlassBoxEngineBuilder};
pub use handle::EvaluationHandle;
pub use pipeline::phase5_risk::RiskAssessor;
pub use pipeline::phase6_bias::BiasAnalyzer;
pub use pipeline::phase7_decision::DecisionMaker;
pub use repository::InMemoryEvaluationRepository;
pub use sources::StaticDataSource;
pub use tracing_setup::init_tracing;
pub use views::{
    BiasDirection, BiasInterpretation, BiasMagnitude, DomainAnalysis, ExplainabilityView,
    EvidenceLinks, ScoreBreakdownView, StatusView,
};

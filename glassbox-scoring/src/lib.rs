//! # glassbox-scoring
//!
//! Hybrid scoring engine. Metrics are scored either by deterministic
//! business formulas or by model-based signals served through
//! [`glassbox_core::traits::IScoringSignalProvider`], nudged by benchmark
//! percentiles, aggregated into module scores, and finally penalised for
//! assessed risks.

pub mod benchmark;
pub mod engine;
pub mod formulas;
pub mod registry;
pub mod risk;
pub mod signals;

pub use benchmark::BenchmarkCatalog;
pub use engine::{CompanyData, ScoringEngine};
pub use registry::FormulaSpec;
pub use risk::RiskAdjuster;
pub use signals::HeuristicSignalProvider;

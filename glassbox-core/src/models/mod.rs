mod audit;
mod benchmark;
mod bias;
mod classification;
mod company;
mod decision;
mod evaluation;
mod evidence;
mod intake;
mod metric;
mod module;
mod risk;
mod score;

pub use audit::{AuditAction, AuditActor, AuditEntry, AuditLog};
pub use benchmark::{Benchmark, BenchmarkComparison};
pub use bias::{BiasFeature, BiasReport};
pub use classification::Classification;
pub use company::{Company, CompanyStage, Document, DocumentKind, Person};
pub use decision::{Decision, Recommendation};
pub use evaluation::{Evaluation, EvaluationStatus, EvaluationType};
pub use evidence::{EvidenceDraft, EvidenceGrade, EvidenceItem, SqsComponents};
pub use intake::{
    CompanyInfo, DocumentIntake, ExternalPayload, ExternalRecord, FinancialData, MarketData,
    ProductProfile, TeamData,
};
pub use metric::{HumanOverride, Metric, MetricType, MetricValue};
pub use module::{EvaluationModule, ModuleKind};
pub use risk::{Risk, RiskCategory};
pub use score::{FormulaInputs, FormulaKind, FormulaOutcome, ScoreBreakdown, SignalKind};

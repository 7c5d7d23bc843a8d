/// Formula, metric and module lookup errors. During scoring, callers skip
/// the metric rather than abort.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("unknown formula: {id}")]
    UnknownFormula { id: String },

    #[error("no formula mapped for metric {metric}")]
    UnmappedMetric { metric: String },

    #[error("unknown module: {id}")]
    UnknownModule { id: String },

    #[error("module {module} has no metric {metric}")]
    UnknownMetric { module: String, metric: String },
}

use super::error_code::{self, GlassBoxErrorCode};
use super::{FormulaError, InputError, LookupError, PipelineError};

/// Top-level error type. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum GlassBoxError {
    #[error("evaluation not found: {id}")]
    EvaluationNotFound { id: String },

    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("formula error: {0}")]
    Formula(#[from] FormulaError),

    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("repository error: {0}")]
    RepositoryError(String),
}

pub type GlassBoxResult<T> = Result<T, GlassBoxError>;

impl GlassBoxErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::StageFailed { .. } => error_code::STAGE_FAILED,
            Self::InvalidTransition { .. } => error_code::INVALID_TRANSITION,
            Self::Timeout { .. } => error_code::TIMEOUT,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

impl GlassBoxErrorCode for GlassBoxError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EvaluationNotFound { .. } => error_code::EVALUATION_NOT_FOUND,
            Self::InvalidState { .. } => error_code::INVALID_STATE,
            Self::Input(_) => error_code::INPUT_ERROR,
            Self::Formula(_) => error_code::FORMULA_ERROR,
            Self::Lookup(_) => error_code::LOOKUP_ERROR,
            Self::Pipeline(e) => e.error_code(),
            Self::ConfigError(_) => error_code::CONFIG_ERROR,
            Self::SerializationError(_) => error_code::SERIALIZATION_ERROR,
            Self::ConcurrencyError(_) => error_code::CONCURRENCY_ERROR,
            Self::RepositoryError(_) => error_code::REPOSITORY_ERROR,
        }
    }
}

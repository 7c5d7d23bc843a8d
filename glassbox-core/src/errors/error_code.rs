//! Stable machine-readable error codes.

pub const EVALUATION_NOT_FOUND: &str = "EVALUATION_NOT_FOUND";
pub const INVALID_STATE: &str = "INVALID_STATE";
pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const FORMULA_ERROR: &str = "FORMULA_ERROR";
pub const LOOKUP_ERROR: &str = "LOOKUP_ERROR";
pub const STAGE_FAILED: &str = "STAGE_FAILED";
pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
pub const TIMEOUT: &str = "TIMEOUT";
pub const CANCELLED: &str = "CANCELLED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const CONCURRENCY_ERROR: &str = "CONCURRENCY_ERROR";
pub const REPOSITORY_ERROR: &str = "REPOSITORY_ERROR";

/// Implemented by every error type to expose a stable code.
pub trait GlassBoxErrorCode {
    fn error_code(&self) -> &'static str;
}

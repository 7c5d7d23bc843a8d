/// Malformed company or document data.
///
/// Never propagated out of the pipeline: the offending field is dropped
/// and the error is logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("missing required field {field}")]
    MissingField { field: String },
}

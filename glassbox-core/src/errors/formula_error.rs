/// Scoring formula errors.
///
/// Division-by-zero is reported as a sentinel zero score by the formula itself;
/// the remaining variants surface when inputs cannot be assembled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("{formula}: {denominator} must be positive")]
    DivisionByZero { formula: String, denominator: String },

    #[error("{formula}: missing input {input}")]
    MissingInput { formula: String, input: String },

    #[error("{formula}: input {input} is not a finite number")]
    NonFinite { formula: String, input: String },
}

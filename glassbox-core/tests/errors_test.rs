use glassbox_core::errors::*;
use glassbox_core::models::EvaluationStatus;

#[test]
fn evaluation_not_found_carries_id() {
    let err = GlassBoxError::EvaluationNotFound { id: "eval-42".into() };
    assert!(err.to_string().contains("eval-42"));
    assert_eq!(err.error_code(), error_code::EVALUATION_NOT_FOUND);
}

#[test]
fn formula_error_names_formula_and_input() {
    let err = FormulaError::DivisionByZero {
        formula: "ltv_cac_ratio".into(),
        denominator: "cac".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("ltv_cac_ratio"));
    assert!(msg.contains("cac"));
}

// --- From impls ---

#[test]
fn subsystem_errors_convert_to_glassbox_error() {
    let err: GlassBoxError = InputError::MissingField { field: "name".into() }.into();
    assert_eq!(err.error_code(), error_code::INPUT_ERROR);

    let err: GlassBoxError = LookupError::UnknownFormula { id: "nope".into() }.into();
    assert_eq!(err.error_code(), error_code::LOOKUP_ERROR);

    let err: GlassBoxError = FormulaError::MissingInput {
        formula: "burn_multiple".into(),
        input: "net_burn".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::FORMULA_ERROR);
}

#[test]
fn pipeline_errors_keep_distinct_codes_through_conversion() {
    let timeout: GlassBoxError = PipelineError::Timeout { timeout_ms: 10 }.into();
    let cancelled: GlassBoxError = PipelineError::Cancelled.into();
    let failed: GlassBoxError = PipelineError::StageFailed {
        stage: "scoring".into(),
        reason: "boom".into(),
    }
    .into();

    assert_eq!(timeout.error_code(), error_code::TIMEOUT);
    assert_eq!(cancelled.error_code(), error_code::CANCELLED);
    assert_eq!(failed.error_code(), error_code::STAGE_FAILED);
    assert!(timeout.to_string().contains("10 ms"));
}

#[test]
fn invalid_transition_names_both_states() {
    let err = PipelineError::InvalidTransition {
        from: EvaluationStatus::Completed,
        to: EvaluationStatus::Processing,
    };
    let msg = err.to_string();
    assert!(msg.contains("Completed"));
    assert!(msg.contains("Processing"));
}

#[test]
fn serde_json_error_converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: GlassBoxError = json_err.into();
    assert_eq!(err.error_code(), error_code::SERIALIZATION_ERROR);
}

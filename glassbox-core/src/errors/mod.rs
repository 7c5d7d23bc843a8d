//! Error handling for the evaluation engine.
//! One error enum per concern, `thiserror` only.

pub mod error_code;
pub mod formula_error;
pub mod glassbox_error;
pub mod input_error;
pub mod lookup_error;
pub mod pipeline_error;

pub use error_code::GlassBoxErrorCode;
pub use formula_error::FormulaError;
pub use glassbox_error::{GlassBoxError, GlassBoxResult};
pub use input_error::InputError;
pub use lookup_error::LookupError;
pub use pipeline_error::PipelineError;

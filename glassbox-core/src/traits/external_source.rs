use crate::errors::GlassBoxResult;
use crate::models::{Company, ExternalPayload};

/// A third-party data source (payments, CRM, company databases).
pub trait IExternalDataSource: Send + Sync {
    /// Recognised source type of every payload this source returns.
    fn source_type(&self) -> &str;

    /// Fetch raw records for a company. Errors are logged and the
    /// evaluation continues without this source.
    fn fetch(&self, company: &Company) -> GlassBoxResult<Vec<ExternalPayload>>;
}

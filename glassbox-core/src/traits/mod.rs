mod external_source;
mod repository;
mod signal_provider;

pub use external_source::IExternalDataSource;
pub use repository::IEvaluationRepository;
pub use signal_provider::IScoringSignalProvider;

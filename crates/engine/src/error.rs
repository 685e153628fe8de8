use request::RequestError;
use schema::{BuildError, config::ConfigError, validation::ConfigurationError};

/// Raised while booting an [crate::Engine]. Any of these leaves the engine unusable.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("No backend loader was registered.")]
    MissingLoader,
}

/// Raised while resolving a single field.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("Backend failed to load field '{field}': {source}")]
    Backend { field: String, source: anyhow::Error },
    #[error("Value fetcher '{name}' failed for field '{field}': {source}")]
    ValueFetcher {
        field: String,
        name: String,
        source: anyhow::Error,
    },
}

impl FetchError {
    pub(crate) fn backend(field: &str) -> impl Fn(anyhow::Error) -> Self + use<> {
        let field = field.to_string();
        move |source| FetchError::Backend {
            field: field.clone(),
            source,
        }
    }
}

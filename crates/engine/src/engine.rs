use std::{path::Path, sync::Arc};

use request::{ValueFetcher, ValueFetchers};
use schema::{Schema, SchemaConfig};

use crate::{BackendLoader, DataFetcher, EngineError};

/// A validated schema together with the backend serving it. Cloning is cheap, all state is shared.
#[derive(Clone)]
pub struct Engine {
    schema: Arc<Schema>,
    value_fetchers: Arc<ValueFetchers>,
    loader: Arc<dyn BackendLoader>,
}

impl Engine {
    pub fn builder(config: SchemaConfig) -> EngineBuilder {
        EngineBuilder {
            config,
            value_fetchers: ValueFetchers::default(),
            loader: None,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn value_fetchers(&self) -> &ValueFetchers {
        &self.value_fetchers
    }

    pub fn data_fetcher(&self) -> DataFetcher<'_> {
        DataFetcher::new(&self.schema, &self.value_fetchers, self.loader.as_ref())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("value_fetchers", &self.value_fetchers)
            .finish_non_exhaustive()
    }
}

pub struct EngineBuilder {
    config: SchemaConfig,
    value_fetchers: ValueFetchers,
    loader: Option<Arc<dyn BackendLoader>>,
}

impl EngineBuilder {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let config = SchemaConfig::from_path(path)?;
        Ok(Engine::builder(config))
    }

    #[must_use]
    pub fn with_loader(mut self, loader: impl BackendLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    #[must_use]
    pub fn with_value_fetcher(mut self, name: impl Into<String>, value_fetcher: impl ValueFetcher + 'static) -> Self {
        self.value_fetchers = self.value_fetchers.with(name, value_fetcher);
        self
    }

    /// Builds the schema and runs every configuration validator against it.
    pub fn build(self) -> Result<Engine, EngineError> {
        let loader = self.loader.ok_or(EngineError::MissingLoader)?;
        let schema = Schema::try_from(self.config)?;
        schema::validation::validate(&schema, &self.value_fetchers)?;

        tracing::info!(
            object_types = schema.object_types().len(),
            queries = schema.queries().len(),
            subscriptions = schema.subscriptions().len(),
            value_fetchers = self.value_fetchers.names().count(),
            "Engine is ready"
        );

        Ok(Engine {
            schema: Arc::new(schema),
            value_fetchers: Arc::new(self.value_fetchers),
            loader,
        })
    }
}

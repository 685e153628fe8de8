use std::{collections::HashMap, sync::Arc};

use schema::validation::ValueFetcherSupport;

use crate::{Record, Value};

/// Computes the value of a scalar field out of other fields of the same record, e.g. a display name
/// out of a name and a title.
pub trait ValueFetcher: Send + Sync {
    /// Fields the backend must load for [ValueFetcher::fetch] to work.
    fn source_fields(&self) -> Vec<String>;

    fn fetch(&self, source: &Record) -> anyhow::Result<Value>;
}

/// Value fetchers by name. Assembled once at startup, read-only afterwards.
#[derive(Clone, Default)]
pub struct ValueFetchers {
    fetchers: HashMap<String, Arc<dyn ValueFetcher>>,
}

impl ValueFetchers {
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, fetcher: impl ValueFetcher + 'static) -> Self {
        self.fetchers.insert(name.into(), Arc::new(fetcher));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn ValueFetcher> {
        self.fetchers.get(name).map(|fetcher| fetcher.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fetchers.keys().map(String::as_str)
    }
}

impl ValueFetcherSupport for ValueFetchers {
    fn supports(&self, value_fetcher: &str) -> bool {
        self.fetchers.contains_key(value_fetcher)
    }
}

impl std::fmt::Debug for ValueFetchers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueFetchers")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

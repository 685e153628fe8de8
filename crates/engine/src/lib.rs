#![deny(clippy::future_not_send)]

mod engine;
mod error;
mod fetcher;
mod loader;

#[cfg(test)]
mod tests;

pub use engine::{Engine, EngineBuilder};
pub use error::{EngineError, FetchError};
pub use fetcher::{DataFetcher, FetchStrategy, FieldOutput};
pub use loader::BackendLoader;
pub use request::{
    FieldContext, FieldType, OperationType, Record, ResolutionContext, SelectedField, Value, ValueFetcher,
    ValueFetchers,
};
pub use schema::{Schema, SchemaConfig};

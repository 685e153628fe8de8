mod context;
mod error;
mod factory;
mod model;
mod value_fetcher;


pub use context::*;
pub use error::*;
pub use factory::*;
pub use model::*;
pub use value_fetcher::*;

pub use serde_json::Value;

/// A record as produced by a backend: field name to value. Nested objects and lists already loaded by
/// the backend are regular values of this map.
pub type Record = serde_json::Map<String, Value>;

/// Coerced argument values of a field, by argument name.
pub type Arguments = serde_json::Map<String, Value>;

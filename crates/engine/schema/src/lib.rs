mod builder;
pub mod config;
mod field;
mod field_path;
mod names;
mod object;
mod query;
pub mod validation;


use indexmap::IndexMap;

pub use builder::BuildError;
pub use config::{SchemaConfig, SortDirection};
pub use field::*;
pub use field_path::*;
pub use names::*;
pub use object::*;
pub use query::*;

/// The immutable schema model. Built once at startup, validated, then shared read-only by every field
/// resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    object_types: IndexMap<String, ObjectType>,
    queries: IndexMap<String, Query>,
    subscriptions: IndexMap<String, Subscription>,
    contexts: IndexMap<String, Context>,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub proxy: Option<String>,
    pub max_filter_depth: usize,
    pub max_batch_key_size: usize,
    pub default_first: u64,
    pub max_first: u64,
    pub max_offset: u64,
}

impl Schema {
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.object_types.get(name)
    }

    pub fn object_types(&self) -> impl ExactSizeIterator<Item = &ObjectType> + '_ {
        self.object_types.values()
    }

    pub fn query(&self, name: &str) -> Option<&Query> {
        self.queries.get(name)
    }

    pub fn queries(&self) -> impl ExactSizeIterator<Item = &Query> + '_ {
        self.queries.values()
    }

    pub fn subscription(&self, name: &str) -> Option<&Subscription> {
        self.subscriptions.get(name)
    }

    pub fn subscriptions(&self) -> impl ExactSizeIterator<Item = &Subscription> + '_ {
        self.subscriptions.values()
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    pub fn contexts(&self) -> impl ExactSizeIterator<Item = &Context> + '_ {
        self.contexts.values()
    }

    /// The object type a field points to, `None` for scalar fields.
    pub fn target_type(&self, field: &ObjectField) -> Option<&ObjectType> {
        self.object_types.get(&field.ty)
    }

    pub fn is_object_field(&self, field: &ObjectField) -> bool {
        self.object_types.contains_key(&field.ty)
    }
}

use crate::FieldPathError;

/// A deterministic configuration problem. Always names the offending element and its owner.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("The type '{ty}', of query: '{query}', doesn't exist in the configuration.")]
    UnknownQueryType { query: String, ty: String },
    #[error("The type '{ty}', of subscription: '{subscription}', doesn't exist in the configuration.")]
    UnknownSubscriptionType { subscription: String, ty: String },
    #[error("The context '{context}', of query: '{query}', doesn't exist in the configuration.")]
    UnknownContext { query: String, context: String },
    #[error("A key can't exist out of more than {max} fields. Key: '{key}' of query '{query}'.")]
    KeyTooDeep { query: String, key: String, max: usize },
    #[error("Key '{key}' of query '{query}' can't be resolved. {source}")]
    UnresolvableKey {
        query: String,
        key: String,
        source: FieldPathError,
    },
    #[error("Key field '{field}' of query '{query}' must be a scalar field.")]
    KeyNotScalar { query: String, field: String },
    #[error("Key field '{field}' of query '{query}' can't be nullable or a list.")]
    KeyNullableOrList { query: String, field: String },
    #[error("Key name '{name}' of query '{query}' isn't unique.")]
    DuplicateKeyName { query: String, name: String },
    #[error("Paging and batching is not supported for query '{query}'.")]
    PagingWithBatching { query: String },
    #[error("Batching for query '{query}' without keys is not possible.")]
    BatchingWithoutKeys { query: String },
    #[error("Batching for query '{query}' with a composite key is not supported.")]
    BatchingWithCompositeKey { query: String },
    #[error("Sort field '{field}' in object type '{object_type}' can't be resolved to a single scalar type.")]
    InvalidSortField { object_type: String, field: String },
    #[error("Filter field '{field}' in object type '{object_type}' can't be resolved to a single scalar type.")]
    InvalidFilterField { object_type: String, field: String },
    #[error("Value fetcher '{value_fetcher}' of field '{field}' in object type '{object_type}' isn't supported.")]
    UnsupportedValueFetcher {
        object_type: String,
        field: String,
        value_fetcher: String,
    },
    #[error("Aggregation type '{ty}' of field '{field}' in object type '{object_type}' doesn't exist.")]
    UnknownAggregationType {
        object_type: String,
        field: String,
        ty: String,
    },
    #[error("Join column '{column}' of field '{field}' in object type '{object_type}' can't be resolved in '{target}'.")]
    InvalidJoinColumn {
        object_type: String,
        field: String,
        column: String,
        target: String,
    },
    #[error("Proxy '{proxy}' can't be combined with locally configured queries, subscriptions or object types.")]
    ProxyWithLocalConfiguration { proxy: String },
}

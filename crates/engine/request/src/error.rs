use schema::FieldPathError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorKind {
    /// A name of the request couldn't be resolved against the schema. Deterministic, retrying won't
    /// help.
    Configuration,
    /// Schema and request disagree on the shape of a field. Points to a bug in the schema model.
    IllegalState,
    /// An argument value doesn't have the expected shape or is out of bounds.
    InvalidArgument,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Object type '{name}' doesn't exist.")]
    UnknownObjectType { name: String },
    #[error("Field '{field}' doesn't exist in object type '{object_type}'.")]
    UnknownField { object_type: String, field: String },
    #[error(transparent)]
    FieldPath(#[from] FieldPathError),
    #[error("Sortable '{name}' doesn't exist in object type '{object_type}'.")]
    UnknownSortable { object_type: String, name: String },
    #[error("Sort field '{field}' in object type '{object_type}' is a list.")]
    ListSortField { object_type: String, field: String },
    #[error("Filter '{name}' doesn't exist in object type '{object_type}'.")]
    UnknownFilter { object_type: String, name: String },
    #[error("Filter '{filter}' doesn't support the operator '{operator}'.")]
    UnknownFilterOperator { filter: String, operator: String },
    #[error("Context '{name}' doesn't exist.")]
    UnknownContext { name: String },
    #[error("Context '{context}' has no field named '{field}'.")]
    UnknownContextField { context: String, field: String },
    #[error("Value fetcher '{name}' of field '{field}' isn't registered.")]
    UnknownValueFetcher { field: String, name: String },
    #[error("'{name}' of field '{field}' isn't an aggregate function.")]
    UnknownAggregateFunction { field: String, name: String },
    #[error("Query '{name}' doesn't exist.")]
    UnknownQuery { name: String },
    #[error("Field '{field}' doesn't resolve to an object type but to '{ty}'.")]
    NotAnObjectType { field: String, ty: String },
    #[error("Field '{field}' of object type '{object_type}' can't be aggregated, it isn't a scalar.")]
    NotAggregatable { object_type: String, field: String },
    #[error("Query '{query}' isn't a batch query.")]
    NotABatchQuery { query: String },
    #[error("Filter exceeds the maximum depth of {max}.")]
    FilterTooDeep { max: usize },
    #[error("Got {count} keys, a batch accepts at most {max}.")]
    TooManyBatchKeys { count: usize, max: usize },
    #[error("Selections under the response key '{key}' differ in their field or arguments.")]
    ConflictingSelection { key: String },
    #[error("Argument '{argument}' is invalid: {reason}")]
    InvalidArgument { argument: String, reason: String },
}

impl RequestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::UnknownObjectType { .. }
            | RequestError::UnknownField { .. }
            | RequestError::FieldPath(_)
            | RequestError::UnknownSortable { .. }
            | RequestError::ListSortField { .. }
            | RequestError::UnknownFilter { .. }
            | RequestError::UnknownFilterOperator { .. }
            | RequestError::UnknownContext { .. }
            | RequestError::UnknownContextField { .. }
            | RequestError::UnknownValueFetcher { .. }
            | RequestError::UnknownAggregateFunction { .. }
            | RequestError::UnknownQuery { .. } => ErrorKind::Configuration,
            RequestError::NotAnObjectType { .. }
            | RequestError::NotAggregatable { .. }
            | RequestError::NotABatchQuery { .. } => ErrorKind::IllegalState,
            RequestError::FilterTooDeep { .. }
            | RequestError::TooManyBatchKeys { .. }
            | RequestError::ConflictingSelection { .. }
            | RequestError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn invalid_argument(argument: &str, reason: impl Into<String>) -> Self {
        RequestError::InvalidArgument {
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }
}

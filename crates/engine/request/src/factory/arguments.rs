use schema::{
    CONTEXT_ARGUMENT_NAME, FIRST_ARGUMENT_NAME, OFFSET_ARGUMENT_NAME, ObjectType, Query, is_reserved_argument, key_name,
};

use super::RequestFactory;
use crate::{Arguments, ContextCriteria, KeyCriteria, PagingCriteria, Record, RequestError, Value};

impl<'s> RequestFactory<'s> {
    /// Every non-reserved argument is an exact match on a key. Query keys are looked up by name in the
    /// query's key paths, anything else must be a direct field of the object type.
    pub(super) fn key_criteria(
        &self,
        object_type: &'s ObjectType,
        query: Option<&Query>,
        arguments: &Arguments,
    ) -> Result<Vec<KeyCriteria<'s>>, RequestError> {
        arguments
            .iter()
            .filter(|(name, value)| !is_reserved_argument(name) && !value.is_null())
            .map(|(name, value)| {
                let path = query.and_then(|query| query.key_path(name)).unwrap_or(name);
                let field_path = self.schema.resolve_field_path(object_type, path)?;
                Ok(KeyCriteria {
                    field_path,
                    value: value.clone(),
                })
            })
            .collect()
    }

    /// A batch query has a single key, its argument carries the list of values to load.
    pub(super) fn batch_keys(
        &self,
        object_type: &'s ObjectType,
        query: &Query,
        arguments: &Arguments,
    ) -> Result<Vec<KeyCriteria<'s>>, RequestError> {
        let Some(path) = query.keys.first() else {
            return Ok(Vec::new());
        };
        let name = key_name(path);
        let field_path = self.schema.resolve_field_path(object_type, path)?;

        let values = match arguments.get(name) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(values)) => values,
            Some(_) => return Err(RequestError::invalid_argument(name, "a batch key expects a list of values")),
        };

        let max = self.schema.settings.max_batch_key_size;
        if values.len() > max {
            return Err(RequestError::TooManyBatchKeys {
                count: values.len(),
                max,
            });
        }

        Ok(values
            .iter()
            .map(|value| KeyCriteria {
                field_path: field_path.clone(),
                value: value.clone(),
            })
            .collect())
    }

    pub(super) fn paging_criteria(&self, arguments: &Arguments) -> Result<PagingCriteria, RequestError> {
        let settings = &self.schema.settings;

        let first = unsigned_argument(arguments, FIRST_ARGUMENT_NAME)?.unwrap_or(settings.default_first);
        if first > settings.max_first {
            return Err(RequestError::invalid_argument(
                FIRST_ARGUMENT_NAME,
                format!("{first} exceeds the maximum of {}", settings.max_first),
            ));
        }

        let offset = unsigned_argument(arguments, OFFSET_ARGUMENT_NAME)?.unwrap_or(0);
        if offset > settings.max_offset {
            return Err(RequestError::invalid_argument(
                OFFSET_ARGUMENT_NAME,
                format!("{offset} exceeds the maximum of {}", settings.max_offset),
            ));
        }

        Ok(PagingCriteria { first, offset })
    }

    /// Configured defaults overridden by the `context` argument. `None` when the query has no context.
    pub(super) fn context_criteria(
        &self,
        query: &Query,
        arguments: &Arguments,
    ) -> Result<Option<ContextCriteria>, RequestError> {
        let Some(name) = &query.context else {
            return Ok(None);
        };
        let context = self
            .schema
            .context(name)
            .ok_or_else(|| RequestError::UnknownContext { name: name.clone() })?;

        let mut values = context
            .fields()
            .filter_map(|field| Some((field.name.clone(), field.default.clone()?)))
            .collect::<Record>();

        match arguments.get(CONTEXT_ARGUMENT_NAME) {
            None | Some(Value::Null) => {}
            Some(Value::Object(overrides)) => {
                for (field, value) in overrides {
                    if context.field(field).is_none() {
                        return Err(RequestError::UnknownContextField {
                            context: name.clone(),
                            field: field.clone(),
                        });
                    }
                    values.insert(field.clone(), value.clone());
                }
            }
            Some(_) => {
                return Err(RequestError::invalid_argument(
                    CONTEXT_ARGUMENT_NAME,
                    "expected an object of context fields",
                ));
            }
        }

        Ok(Some(ContextCriteria {
            name: name.clone(),
            values,
        }))
    }
}

fn unsigned_argument(arguments: &Arguments, name: &str) -> Result<Option<u64>, RequestError> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| RequestError::invalid_argument(name, "expected a non-negative integer")),
    }
}

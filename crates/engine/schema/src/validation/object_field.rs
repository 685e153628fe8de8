use super::{ConfigurationError, ValueFetcherSupport, Validator};
use crate::{ObjectField, ObjectType, Schema};

/// Checks the references held by fields: value fetchers must be registered, aggregated types must exist
/// and join columns must point to fields on both sides.
pub struct ObjectFieldValidator<'a> {
    value_fetchers: &'a dyn ValueFetcherSupport,
}

impl<'a> ObjectFieldValidator<'a> {
    pub fn new(value_fetchers: &'a dyn ValueFetcherSupport) -> Self {
        Self { value_fetchers }
    }
}

impl Validator for ObjectFieldValidator<'_> {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigurationError> {
        for object_type in schema.object_types() {
            for field in object_type.fields() {
                self.validate_value_fetcher(object_type, field)?;
                validate_aggregation(schema, object_type, field)?;
                validate_join_columns(schema, object_type, field)?;
            }
        }

        Ok(())
    }
}

impl ObjectFieldValidator<'_> {
    fn validate_value_fetcher(&self, object_type: &ObjectType, field: &ObjectField) -> Result<(), ConfigurationError> {
        match &field.value_fetcher {
            Some(value_fetcher) if !self.value_fetchers.supports(value_fetcher) => {
                Err(ConfigurationError::UnsupportedValueFetcher {
                    object_type: object_type.name.clone(),
                    field: field.name.clone(),
                    value_fetcher: value_fetcher.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

fn validate_aggregation(
    schema: &Schema,
    object_type: &ObjectType,
    field: &ObjectField,
) -> Result<(), ConfigurationError> {
    match &field.aggregation_of {
        Some(ty) if schema.object_type(ty).is_none() => Err(ConfigurationError::UnknownAggregationType {
            object_type: object_type.name.clone(),
            field: field.name.clone(),
            ty: ty.clone(),
        }),
        _ => Ok(()),
    }
}

fn validate_join_columns(
    schema: &Schema,
    object_type: &ObjectType,
    field: &ObjectField,
) -> Result<(), ConfigurationError> {
    if !field.has_join_columns() {
        return Ok(());
    }

    let target = schema.target_type(field);
    for column in &field.join_columns {
        if target.and_then(|target| target.field(&column.name)).is_none() {
            return Err(ConfigurationError::InvalidJoinColumn {
                object_type: object_type.name.clone(),
                field: field.name.clone(),
                column: column.name.clone(),
                target: field.ty.clone(),
            });
        }

        if object_type.field(&column.referenced_field).is_none() {
            return Err(ConfigurationError::InvalidJoinColumn {
                object_type: object_type.name.clone(),
                field: field.name.clone(),
                column: column.referenced_field.clone(),
                target: object_type.name.clone(),
            });
        }
    }

    Ok(())
}

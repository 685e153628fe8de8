use super::{ConfigurationError, Validator, paths::scalar_field_paths};
use crate::Schema;

/// Every configured filter must target a single scalar.
pub struct FilterValidator;

impl Validator for FilterValidator {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigurationError> {
        for object_type in schema.object_types() {
            if object_type.filters().len() == 0 {
                continue;
            }

            let paths = scalar_field_paths(schema, object_type);
            if let Some(filter) = object_type.filters().find(|filter| !paths.contains(&filter.field)) {
                return Err(ConfigurationError::InvalidFilterField {
                    object_type: object_type.name.clone(),
                    field: filter.field.clone(),
                });
            }
        }

        Ok(())
    }
}

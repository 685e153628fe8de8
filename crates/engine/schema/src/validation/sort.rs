use super::{ConfigurationError, Validator, paths::scalar_field_paths};
use crate::Schema;

/// Every field of every sortable definition must lead to a single scalar.
pub struct SortValidator;

impl Validator for SortValidator {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigurationError> {
        for object_type in schema.object_types() {
            let mut sortables = object_type.sortables().peekable();
            if sortables.peek().is_none() {
                continue;
            }

            let paths = scalar_field_paths(schema, object_type);
            for (_, definitions) in sortables {
                if let Some(definition) = definitions.iter().find(|definition| !paths.contains(&definition.field)) {
                    return Err(ConfigurationError::InvalidSortField {
                        object_type: object_type.name.clone(),
                        field: definition.field.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

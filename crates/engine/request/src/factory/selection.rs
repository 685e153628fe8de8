use schema::{ObjectField, ObjectType, Schema, is_introspection_field};

use crate::{Field, RequestError};

/// The selection set of a field, split by what each selected field needs from the backend.
#[derive(Default)]
pub(super) struct Selection<'s, 'f> {
    pub scalars: Vec<&'s ObjectField>,
    pub objects: Vec<(&'s ObjectField, &'f dyn Field)>,
    pub collections: Vec<(&'s ObjectField, &'f dyn Field)>,
    pub aggregates: Vec<(&'s ObjectField, &'f dyn Field)>,
}

impl<'s, 'f> Selection<'s, 'f> {
    pub fn partition(
        schema: &'s Schema,
        object_type: &'s ObjectType,
        field: &'f dyn Field,
    ) -> Result<Self, RequestError> {
        let mut selection = Selection::default();

        for selected in field.selection_set() {
            if is_introspection_field(selected.name()) {
                continue;
            }

            let object_field = object_type
                .field(selected.name())
                .ok_or_else(|| RequestError::UnknownField {
                    object_type: object_type.name.clone(),
                    field: selected.name().to_string(),
                })?;

            if object_field.is_aggregate() {
                selection.aggregates.push((object_field, selected));
            } else if !schema.is_object_field(object_field) {
                selection.scalars.push(object_field);
            } else if object_field.is_list() {
                selection.collections.push((object_field, selected));
            } else {
                selection.objects.push((object_field, selected));
            }
        }

        Ok(selection)
    }
}

use schema::{ObjectType, SortableBy};

use super::RequestFactory;
use crate::{RequestError, SortCriteria, Value};

impl<'s> RequestFactory<'s> {
    /// Resolves the sortable named by the `sort` argument, or the default sortable of the type when
    /// the argument is absent. Types without any sortable are returned unsorted.
    pub(super) fn sort_criteria(
        &self,
        object_type: &'s ObjectType,
        argument: Option<&Value>,
    ) -> Result<Vec<SortCriteria<'s>>, RequestError> {
        let definitions = match argument {
            None | Some(Value::Null) => match object_type.default_sortable() {
                Some((_, definitions)) => definitions,
                None => return Ok(Vec::new()),
            },
            Some(Value::String(name)) => {
                object_type
                    .sortable_by(name)
                    .ok_or_else(|| RequestError::UnknownSortable {
                        object_type: object_type.name.clone(),
                        name: name.clone(),
                    })?
            }
            Some(_) => {
                return Err(RequestError::invalid_argument(
                    schema::SORT_ARGUMENT_NAME,
                    "expected the name of a sortable",
                ));
            }
        };

        definitions
            .iter()
            .map(|definition| self.sort_criterion(object_type, definition))
            .collect()
    }

    fn sort_criterion(
        &self,
        object_type: &'s ObjectType,
        definition: &SortableBy,
    ) -> Result<SortCriteria<'s>, RequestError> {
        let field_path = self.schema.resolve_field_path(object_type, &definition.field)?;

        if let Some(list) = field_path.iter().find(|field| field.is_list()) {
            return Err(RequestError::ListSortField {
                object_type: object_type.name.clone(),
                field: list.name.clone(),
            });
        }

        Ok(SortCriteria {
            field_path,
            direction: definition.direction,
        })
    }
}

use std::str::FromStr;

use schema::{FILTER_ARGUMENT_NAME, ObjectField, is_introspection_field};

use super::RequestFactory;
use crate::{
    AggregateField, AggregateFieldKind, AggregateObjectField, AggregateScalarType, DEFAULT_SEPARATOR, Field,
    RequestError, Value,
};

const FIELD_ARGUMENT_NAME: &str = "field";
const DISTINCT_ARGUMENT_NAME: &str = "distinct";
const SEPARATOR_ARGUMENT_NAME: &str = "separator";

impl<'s> RequestFactory<'s> {
    pub(super) fn aggregate_object_field(
        &self,
        field: &'s ObjectField,
        selected: &dyn Field,
    ) -> Result<AggregateObjectField<'s>, RequestError> {
        let aggregated = field.aggregation_of.as_deref().unwrap_or(&field.ty);
        let object_type = self
            .schema
            .object_type(aggregated)
            .ok_or_else(|| RequestError::UnknownObjectType {
                name: aggregated.to_string(),
            })?;

        let aggregate_fields = selected
            .selection_set()
            .filter(|selection| !is_introspection_field(selection.name()))
            .map(|selection| {
                let kind = AggregateFieldKind::from_str(selection.name()).map_err(|_| {
                    RequestError::UnknownAggregateFunction {
                        field: field.name.clone(),
                        name: selection.name().to_string(),
                    }
                })?;
                let arguments = selection.arguments();

                let field_name = arguments
                    .get(FIELD_ARGUMENT_NAME)
                    .and_then(Value::as_str)
                    .ok_or_else(|| RequestError::invalid_argument(FIELD_ARGUMENT_NAME, "expected a field name"))?;
                let aggregated_field = object_type
                    .field(field_name)
                    .ok_or_else(|| RequestError::UnknownField {
                        object_type: object_type.name.clone(),
                        field: field_name.to_string(),
                    })?;
                if self.schema.is_object_field(aggregated_field) || aggregated_field.is_aggregate() {
                    return Err(RequestError::NotAggregatable {
                        object_type: object_type.name.clone(),
                        field: aggregated_field.name.clone(),
                    });
                }

                let separator = (kind.scalar_type() == AggregateScalarType::String).then(|| {
                    arguments
                        .get(SEPARATOR_ARGUMENT_NAME)
                        .and_then(Value::as_str)
                        .unwrap_or(DEFAULT_SEPARATOR)
                        .to_string()
                });

                Ok(AggregateField {
                    field: aggregated_field,
                    function: kind.function(),
                    ty: kind.scalar_type(),
                    distinct: arguments
                        .get(DISTINCT_ARGUMENT_NAME)
                        .and_then(Value::as_bool)
                        .unwrap_or_default(),
                    alias: selection.response_key().to_string(),
                    separator,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let filter_criteria = selected
            .arguments()
            .get(FILTER_ARGUMENT_NAME)
            .map(|value| self.filter_criteria(object_type, value))
            .transpose()?
            .flatten();

        Ok(AggregateObjectField {
            key: selected.response_key().to_string(),
            field,
            object_type,
            aggregate_fields,
            filter_criteria,
        })
    }
}

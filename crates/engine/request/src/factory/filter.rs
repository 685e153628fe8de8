use std::str::FromStr;

use schema::{FILTER_ARGUMENT_NAME, Filter, ObjectType};

use super::RequestFactory;
use crate::{FilterCriteria, FilterOperator, FilterPredicate, RequestError, Value};

/// Disjunction of the filter objects listed under this key.
const OR_FIELD: &str = "_or";
/// Negates the operators nested under it.
const NOT_OPERATOR: &str = "not";

impl<'s> RequestFactory<'s> {
    /// Parses a `filter` argument: filter names mapped to their operators, combined with `_or`.
    /// `None` when the filter holds no predicate at all.
    pub(super) fn filter_criteria(
        &self,
        object_type: &'s ObjectType,
        argument: &Value,
    ) -> Result<Option<FilterCriteria<'s>>, RequestError> {
        match argument {
            Value::Null => Ok(None),
            Value::Object(_) => self.filter_object(object_type, argument, 1),
            _ => Err(RequestError::invalid_argument(
                FILTER_ARGUMENT_NAME,
                "expected an object of filters",
            )),
        }
    }

    fn filter_object(
        &self,
        object_type: &'s ObjectType,
        value: &Value,
        depth: usize,
    ) -> Result<Option<FilterCriteria<'s>>, RequestError> {
        let max = self.schema.settings.max_filter_depth;
        if depth > max {
            return Err(RequestError::FilterTooDeep { max });
        }

        let Value::Object(entries) = value else {
            return Err(RequestError::invalid_argument(
                FILTER_ARGUMENT_NAME,
                "expected an object of filters",
            ));
        };

        let mut criteria = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            if value.is_null() {
                continue;
            }

            if name == OR_FIELD {
                let alternatives = match value {
                    Value::Array(alternatives) => alternatives.iter().collect::<Vec<_>>(),
                    alternative => vec![alternative],
                };
                let alternatives = alternatives
                    .into_iter()
                    .filter_map(|alternative| self.filter_object(object_type, alternative, depth + 1).transpose())
                    .collect::<Result<Vec<_>, _>>()?;
                if !alternatives.is_empty() {
                    criteria.push(FilterCriteria::Or(alternatives));
                }
                continue;
            }

            let filter = object_type.filter(name).ok_or_else(|| RequestError::UnknownFilter {
                object_type: object_type.name.clone(),
                name: name.clone(),
            })?;
            criteria.extend(self.filter_operators(object_type, filter, value)?);
        }

        Ok((!criteria.is_empty()).then(|| FilterCriteria::all(criteria)))
    }

    /// A bare value is shorthand for `eq`.
    fn filter_operators(
        &self,
        object_type: &'s ObjectType,
        filter: &Filter,
        value: &Value,
    ) -> Result<Option<FilterCriteria<'s>>, RequestError> {
        let Value::Object(operators) = value else {
            return self
                .filter_predicate(object_type, filter, FilterOperator::Eq, value)
                .map(Some);
        };

        let mut criteria = Vec::with_capacity(operators.len());
        for (operator, value) in operators {
            if value.is_null() {
                continue;
            }

            if operator == NOT_OPERATOR {
                if let Some(negated) = self.filter_operators(object_type, filter, value)? {
                    criteria.push(FilterCriteria::Not(Box::new(negated)));
                }
                continue;
            }

            let operator = FilterOperator::from_str(operator).map_err(|_| RequestError::UnknownFilterOperator {
                filter: filter.name.clone(),
                operator: operator.clone(),
            })?;
            criteria.push(self.filter_predicate(object_type, filter, operator, value)?);
        }

        Ok((!criteria.is_empty()).then(|| FilterCriteria::all(criteria)))
    }

    fn filter_predicate(
        &self,
        object_type: &'s ObjectType,
        filter: &Filter,
        operator: FilterOperator,
        value: &Value,
    ) -> Result<FilterCriteria<'s>, RequestError> {
        if operator == FilterOperator::In && !value.is_array() {
            return Err(RequestError::invalid_argument(
                FILTER_ARGUMENT_NAME,
                format!("operator 'in' of filter '{}' expects a list", filter.name),
            ));
        }

        let field_path = self.schema.resolve_field_path(object_type, &filter.field)?;

        Ok(FilterCriteria::Predicate(FilterPredicate {
            field_path,
            operator,
            value: value.clone(),
            case_sensitive: filter.case_sensitive,
        }))
    }
}

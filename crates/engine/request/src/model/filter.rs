use std::fmt;

use itertools::Itertools;
use schema::{FieldPath, ObjectField};

use crate::Value;

/// A composite filter: conjunctions and disjunctions of leaf predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCriteria<'s> {
    And(Vec<FilterCriteria<'s>>),
    Or(Vec<FilterCriteria<'s>>),
    Not(Box<FilterCriteria<'s>>),
    Predicate(FilterPredicate<'s>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterPredicate<'s> {
    pub field_path: FieldPath<'s>,
    pub operator: FilterOperator,
    pub value: Value,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    In,
    Lt,
    Lte,
    Gt,
    Gte,
    Match,
}

impl<'s> FilterCriteria<'s> {
    /// A conjunction, collapsed into its only member when there is a single one.
    pub fn all(mut criteria: Vec<FilterCriteria<'s>>) -> Self {
        if criteria.len() == 1 {
            criteria.remove(0)
        } else {
            FilterCriteria::And(criteria)
        }
    }

    pub fn predicates(&self) -> Box<dyn Iterator<Item = &FilterPredicate<'s>> + '_> {
        match self {
            FilterCriteria::And(criteria) | FilterCriteria::Or(criteria) => {
                Box::new(criteria.iter().flat_map(|criteria| criteria.predicates()))
            }
            FilterCriteria::Not(inner) => inner.predicates(),
            FilterCriteria::Predicate(predicate) => Box::new(std::iter::once(predicate)),
        }
    }

    /// Object fields through which a predicate reaches into a nested type. Backends may push these down
    /// as joins or sub-selects instead of filtering the root type directly.
    pub fn nested_filtering_origins(&self) -> impl Iterator<Item = &'s ObjectField> + '_ {
        self.predicates()
            .filter(|predicate| predicate.field_path.is_nested())
            .map(|predicate| predicate.field_path.first())
            .unique_by(|field| field.name.clone())
    }

    pub fn has_nested_filtering_origin(&self) -> bool {
        self.nested_filtering_origins().next().is_some()
    }
}

impl fmt::Display for FilterCriteria<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterCriteria::And(criteria) => write!(f, "({})", criteria.iter().join(" and ")),
            FilterCriteria::Or(criteria) => write!(f, "({})", criteria.iter().join(" or ")),
            FilterCriteria::Not(inner) => write!(f, "not {inner}"),
            FilterCriteria::Predicate(predicate) => {
                write!(f, "{} {} {}", predicate.field_path, predicate.operator, predicate.value)
            }
        }
    }
}

use schema::{FieldPath, JoinColumn, SortDirection};

use crate::{Record, Value};

/// An exact match on a key field.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCriteria<'s> {
    pub field_path: FieldPath<'s>,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortCriteria<'s> {
    pub field_path: FieldPath<'s>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingCriteria {
    pub first: u64,
    pub offset: u64,
}

/// Values of a named context, configured defaults merged with the request's `context` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextCriteria {
    pub name: String,
    pub values: Record,
}

/// The join key mapping rule of a nested collection: which child field matches which parent field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinCondition<'s> {
    pub columns: &'s [JoinColumn],
}

/// Child field name to the value it must match.
pub type JoinKey = serde_json::Map<String, Value>;

impl<'s> JoinCondition<'s> {
    pub fn new(columns: &'s [JoinColumn]) -> Self {
        Self { columns }
    }

    /// Extracts the key of a parent record. `None` when the parent lacks one of the referenced fields.
    pub fn key_of(&self, parent: &Record) -> Option<JoinKey> {
        self.columns
            .iter()
            .map(|column| {
                parent
                    .get(&column.referenced_field)
                    .map(|value| (column.name.clone(), value.clone()))
            })
            .collect()
    }
}

/// A batch of parent keys together with the rule to match them.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinCriteria<'s> {
    pub keys: Vec<JoinKey>,
    pub join_condition: JoinCondition<'s>,
}

impl<'s> JoinCriteria<'s> {
    pub fn new(join_condition: JoinCondition<'s>) -> Self {
        Self {
            keys: Vec::new(),
            join_condition,
        }
    }

    /// Adds the key of a parent record, parents sharing a key are only added once.
    pub fn add_parent(&mut self, parent: &Record) -> Option<JoinKey> {
        let key = self.join_condition.key_of(parent)?;
        if !self.keys.contains(&key) {
            self.keys.push(key.clone());
        }
        Some(key)
    }
}

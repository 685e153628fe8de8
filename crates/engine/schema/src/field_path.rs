use std::fmt;

use crate::{ObjectField, ObjectType, Schema};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum FieldPathError {
    #[error("Field path can't be empty.")]
    Empty,
    #[error("Field '{field}' of path '{path}' doesn't exist in object type '{object_type}'.")]
    UnknownField {
        path: String,
        object_type: String,
        field: String,
    },
    #[error("Field '{field}' of path '{path}' in object type '{object_type}' is not an object field.")]
    NotAnObjectField {
        path: String,
        object_type: String,
        field: String,
    },
}

/// A resolved chain of fields, from a root object type down to the terminal field. Every field but the
/// last one is an object field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPath<'s> {
    fields: Vec<&'s ObjectField>,
}

impl<'s> FieldPath<'s> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the path goes through at least one object field.
    pub fn is_nested(&self) -> bool {
        self.fields.len() > 1
    }

    pub fn first(&self) -> &'s ObjectField {
        self.fields[0]
    }

    pub fn leaf(&self) -> &'s ObjectField {
        self.fields[self.fields.len() - 1]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'s ObjectField> + '_ {
        self.fields.iter().copied()
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &'s str> + '_ {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Whether the terminal field is a scalar, i.e. doesn't point to another object type.
    pub fn ends_in_scalar(&self, schema: &Schema) -> bool {
        !schema.is_object_field(self.leaf())
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl Schema {
    /// Resolves a dotted path like `visitAddress.street`, one segment at a time, starting at `root`.
    pub fn resolve_field_path<'s>(
        &'s self,
        root: &'s ObjectType,
        path: &str,
    ) -> Result<FieldPath<'s>, FieldPathError> {
        if path.is_empty() {
            return Err(FieldPathError::Empty);
        }

        let mut current = root;
        let mut fields = Vec::new();
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            let field = current.field(segment).ok_or_else(|| FieldPathError::UnknownField {
                path: path.to_string(),
                object_type: current.name.clone(),
                field: segment.to_string(),
            })?;
            fields.push(field);

            if segments.peek().is_some() {
                current = self
                    .target_type(field)
                    .ok_or_else(|| FieldPathError::NotAnObjectField {
                        path: path.to_string(),
                        object_type: current.name.clone(),
                        field: segment.to_string(),
                    })?;
            }
        }

        Ok(FieldPath { fields })
    }
}

//! What the query language engine hands over for every field it resolves. The engine itself is not
//! part of this crate, adapters implement [ResolutionContext] and [Field] on top of it.

use crate::{Arguments, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

/// The output type of a field, with the wrapping stripped into flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    /// Name of the unwrapped type.
    pub name: String,
    pub list: bool,
    pub nullable: bool,
}

impl FieldType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            list: false,
            nullable: true,
        }
    }

    pub fn list_of(name: impl Into<String>) -> Self {
        Self {
            list: true,
            ..Self::named(name)
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }
}

pub trait Field: Send + Sync {
    fn name(&self) -> &str;

    fn alias(&self) -> Option<&str> {
        None
    }

    fn ty(&self) -> &FieldType;

    fn arguments(&self) -> &Arguments;

    fn selection_set(&self) -> Box<dyn Iterator<Item = &dyn Field> + '_>;

    /// The key under which the engine expects the value of this field.
    fn response_key(&self) -> &str {
        self.alias().unwrap_or_else(|| self.name())
    }
}

pub trait ResolutionContext: Send + Sync {
    fn field(&self) -> &dyn Field;

    /// Name of the object type the field is selected on, `None` for root fields.
    fn parent_type(&self) -> Option<&str>;

    /// The already resolved parent record, `None` for root fields.
    fn source(&self) -> Option<&Record>;

    fn operation_type(&self) -> OperationType;
}

/// An owned [Field], for adapters that can't borrow from their engine and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedField {
    pub name: String,
    pub alias: Option<String>,
    pub ty: FieldType,
    pub arguments: Arguments,
    pub selection_set: Vec<SelectedField>,
}

impl SelectedField {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            alias: None,
            ty,
            arguments: Arguments::new(),
            selection_set: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<crate::Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_selection(mut self, field: SelectedField) -> Self {
        self.selection_set.push(field);
        self
    }
}

impl Field for SelectedField {
    fn name(&self) -> &str {
        &self.name
    }

    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn ty(&self) -> &FieldType {
        &self.ty
    }

    fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    fn selection_set(&self) -> Box<dyn Iterator<Item = &dyn Field> + '_> {
        Box::new(self.selection_set.iter().map(|field| field as &dyn Field))
    }
}

/// An owned [ResolutionContext].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldContext {
    pub field: SelectedField,
    pub parent_type: Option<String>,
    pub source: Option<Record>,
    pub operation_type: OperationType,
}

impl FieldContext {
    pub fn query(field: SelectedField) -> Self {
        Self {
            field,
            parent_type: None,
            source: None,
            operation_type: OperationType::Query,
        }
    }

    pub fn subscription(field: SelectedField) -> Self {
        Self {
            operation_type: OperationType::Subscription,
            ..Self::query(field)
        }
    }

    /// A field selected on an already resolved parent record.
    pub fn nested(field: SelectedField, parent_type: impl Into<String>, source: Record) -> Self {
        Self {
            field,
            parent_type: Some(parent_type.into()),
            source: Some(source),
            operation_type: OperationType::Query,
        }
    }
}

impl ResolutionContext for FieldContext {
    fn field(&self) -> &dyn Field {
        &self.field
    }

    fn parent_type(&self) -> Option<&str> {
        self.parent_type.as_deref()
    }

    fn source(&self) -> Option<&Record> {
        self.source.as_ref()
    }

    fn operation_type(&self) -> OperationType {
        self.operation_type
    }
}

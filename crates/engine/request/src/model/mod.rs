//! The query request tree. Built per field resolution, borrowing the schema, and handed to a backend
//! loader. Nothing here knows about the query language or about a storage technology.

mod aggregate;
mod criteria;
mod filter;

pub use aggregate::*;
pub use criteria::*;
pub use filter::*;

use schema::{ObjectField, ObjectType};

use crate::{Record, RequestError};

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRequest<'s> {
    pub object_type: &'s ObjectType,
    scalar_fields: Vec<&'s ObjectField>,
    object_fields: Vec<ObjectFieldRequest<'s>>,
    collection_fields: Vec<CollectionFieldRequest<'s>>,
    pub aggregate_fields: Vec<AggregateObjectField<'s>>,
    pub key_criteria: Vec<KeyCriteria<'s>>,
    pub context_criteria: Option<ContextCriteria>,
}

/// A nested, non-list object field and what to load for it. Backends store the loaded value under
/// `key` in the parent record.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectFieldRequest<'s> {
    /// Response key of the selection: its alias, or the field name.
    pub key: String,
    pub field: &'s ObjectField,
    pub request: ObjectRequest<'s>,
}

/// A nested list field of objects and what to load for it, stored under `key` like
/// [ObjectFieldRequest].
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionFieldRequest<'s> {
    pub key: String,
    pub field: &'s ObjectField,
    pub request: CollectionRequest<'s>,
}

impl<'s> ObjectRequest<'s> {
    pub fn new(object_type: &'s ObjectType) -> Self {
        Self {
            object_type,
            scalar_fields: Vec::new(),
            object_fields: Vec::new(),
            collection_fields: Vec::new(),
            aggregate_fields: Vec::new(),
            key_criteria: Vec::new(),
            context_criteria: None,
        }
    }

    /// Adds a scalar field unless one with the same name is already requested. Returns whether the
    /// field was added.
    pub fn add_scalar_field(&mut self, field: &'s ObjectField) -> bool {
        if self.scalar_fields.iter().any(|existing| existing.name == field.name) {
            return false;
        }
        self.scalar_fields.push(field);
        true
    }

    pub fn scalar_fields(&self) -> &[&'s ObjectField] {
        &self.scalar_fields
    }

    pub fn object_fields(&self) -> &[ObjectFieldRequest<'s>] {
        &self.object_fields
    }

    pub fn collection_fields(&self) -> &[CollectionFieldRequest<'s>] {
        &self.collection_fields
    }

    pub fn object_field(&self, key: &str) -> Option<&ObjectRequest<'s>> {
        self.object_fields
            .iter()
            .find(|nested| nested.key == key)
            .map(|nested| &nested.request)
    }

    pub fn collection_field(&self, key: &str) -> Option<&CollectionRequest<'s>> {
        self.collection_fields
            .iter()
            .find(|nested| nested.key == key)
            .map(|nested| &nested.request)
    }

    /// Nested requests are keyed by response key. Selections sharing a response key are loaded once with
    /// the union of their selection sets, provided they agree on the field and its criteria.
    pub fn add_object_field(
        &mut self,
        key: impl Into<String>,
        field: &'s ObjectField,
        request: ObjectRequest<'s>,
    ) -> Result<(), RequestError> {
        let key = key.into();
        match self.object_fields.iter_mut().find(|nested| nested.key == key) {
            Some(existing)
                if existing.field.name == field.name && existing.request.key_criteria == request.key_criteria =>
            {
                existing.request.merge(request)
            }
            Some(_) => Err(RequestError::ConflictingSelection { key }),
            None => {
                self.object_fields.push(ObjectFieldRequest { key, field, request });
                Ok(())
            }
        }
    }

    pub fn add_collection_field(
        &mut self,
        key: impl Into<String>,
        field: &'s ObjectField,
        request: CollectionRequest<'s>,
    ) -> Result<(), RequestError> {
        let key = key.into();
        match self.collection_fields.iter_mut().find(|nested| nested.key == key) {
            Some(existing) if existing.field.name == field.name && existing.request.same_criteria(&request) => {
                existing.request.object_request.merge(request.object_request)
            }
            Some(_) => Err(RequestError::ConflictingSelection { key }),
            None => {
                self.collection_fields.push(CollectionFieldRequest { key, field, request });
                Ok(())
            }
        }
    }

    /// Identical aggregate selections under one response key are requested once.
    pub fn add_aggregate_field(&mut self, aggregate: AggregateObjectField<'s>) -> Result<(), RequestError> {
        match self.aggregate_fields.iter().find(|existing| existing.key == aggregate.key) {
            Some(existing) if *existing == aggregate => Ok(()),
            Some(_) => Err(RequestError::ConflictingSelection { key: aggregate.key }),
            None => {
                self.aggregate_fields.push(aggregate);
                Ok(())
            }
        }
    }

    fn merge(&mut self, other: ObjectRequest<'s>) -> Result<(), RequestError> {
        for field in other.scalar_fields {
            self.add_scalar_field(field);
        }
        for nested in other.object_fields {
            self.add_object_field(nested.key, nested.field, nested.request)?;
        }
        for nested in other.collection_fields {
            self.add_collection_field(nested.key, nested.field, nested.request)?;
        }
        for aggregate in other.aggregate_fields {
            self.add_aggregate_field(aggregate)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRequest<'s> {
    pub object_request: ObjectRequest<'s>,
    pub sort_criteria: Vec<SortCriteria<'s>>,
    pub filter_criteria: Option<FilterCriteria<'s>>,
    pub paging_criteria: Option<PagingCriteria>,
}

impl<'s> CollectionRequest<'s> {
    pub fn new(object_request: ObjectRequest<'s>) -> Self {
        Self {
            object_request,
            sort_criteria: Vec::new(),
            filter_criteria: None,
            paging_criteria: None,
        }
    }

    /// Whether both requests select the same records, whatever fields they load.
    fn same_criteria(&self, other: &CollectionRequest<'s>) -> bool {
        self.object_request.key_criteria == other.object_request.key_criteria
            && self.sort_criteria == other.sort_criteria
            && self.filter_criteria == other.filter_criteria
            && self.paging_criteria == other.paging_criteria
    }
}

/// Loads one record per key of a batch query.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest<'s> {
    pub object_request: ObjectRequest<'s>,
    pub keys: Vec<KeyCriteria<'s>>,
}

/// Loads the nested collection of every parent identified in the join criteria, grouped by parent.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionBatchRequest<'s> {
    pub collection_request: CollectionRequest<'s>,
    pub join_criteria: JoinCriteria<'s>,
}

/// What the dispatcher needs to know about the field being resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestContext<'a> {
    /// `None` for root fields, which aren't backed by an object field.
    pub object_field: Option<&'a ObjectField>,
    pub source: Option<&'a Record>,
    /// Where the parent record holds the value of the field: the response key for nested objects,
    /// collections and aggregates, the field name for scalars.
    pub eager_key: &'a str,
}

impl<'a> RequestContext<'a> {
    /// The value a parent resolution already loaded for this field, if any.
    pub fn eager_value(&self) -> Option<&'a crate::Value> {
        self.source.and_then(|source| source.get(self.eager_key))
    }
}

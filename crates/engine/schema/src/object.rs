use indexmap::IndexMap;

use crate::{ObjectField, SortDirection};

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub(crate) fields: IndexMap<String, ObjectField>,
    /// Keys are normalized with [crate::normalize_sortable_name].
    pub(crate) sortable_by: IndexMap<String, Vec<SortableBy>>,
    pub(crate) filters: IndexMap<String, Filter>,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&ObjectField> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &ObjectField> + '_ {
        self.fields.values()
    }

    /// Looks up a sortable definition list. The name goes through the same normalization as the
    /// configured names, callers don't need to care about casing.
    pub fn sortable_by(&self, name: &str) -> Option<&[SortableBy]> {
        self.sortable_by
            .get(&crate::normalize_sortable_name(name))
            .map(Vec::as_slice)
    }

    pub fn sortables(&self) -> impl Iterator<Item = (&str, &[SortableBy])> + '_ {
        self.sortable_by
            .iter()
            .map(|(name, definitions)| (name.as_str(), definitions.as_slice()))
    }

    /// The first configured sortable, used when a collection is requested without a sort argument.
    pub fn default_sortable(&self) -> Option<(&str, &[SortableBy])> {
        self.sortables().next()
    }

    pub fn filter(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    pub fn filters(&self) -> impl ExactSizeIterator<Item = &Filter> + '_ {
        self.filters.values()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortableBy {
    /// Dotted path, relative to the owning object type.
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub name: String,
    /// Dotted path, relative to the owning object type.
    pub field: String,
    pub case_sensitive: bool,
}

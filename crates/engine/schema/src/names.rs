pub const FILTER_ARGUMENT_NAME: &str = "filter";
pub const SORT_ARGUMENT_NAME: &str = "sort";
pub const CONTEXT_ARGUMENT_NAME: &str = "context";
pub const FIRST_ARGUMENT_NAME: &str = "first";
pub const OFFSET_ARGUMENT_NAME: &str = "offset";

/// Arguments which never end up as key criteria.
pub const RESERVED_ARGUMENT_NAMES: [&str; 5] = [
    FILTER_ARGUMENT_NAME,
    SORT_ARGUMENT_NAME,
    CONTEXT_ARGUMENT_NAME,
    FIRST_ARGUMENT_NAME,
    OFFSET_ARGUMENT_NAME,
];

pub const INTROSPECTION_PREFIX: &str = "__";

/// Maximum number of segments of a key path.
pub const MAX_KEY_DEPTH: usize = 3;

pub fn is_reserved_argument(name: &str) -> bool {
    RESERVED_ARGUMENT_NAMES.contains(&name)
}

pub fn is_introspection_field(name: &str) -> bool {
    name.starts_with(INTROSPECTION_PREFIX)
}

/// Sortable names are enum values on the query language side. Both the configured names and the
/// incoming sort argument go through this function, so `name`, `Name` and `NAME` are the same sortable.
pub fn normalize_sortable_name(name: &str) -> String {
    name.to_ascii_uppercase()
}

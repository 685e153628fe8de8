#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error(
        "Sortable '{name}' of object type '{object_type}' collides with another sortable once normalized to '{normalized}'."
    )]
    DuplicateSortable {
        object_type: String,
        name: String,
        normalized: String,
    },
    #[error("Filter '{name}' of object type '{object_type}' has an empty field path.")]
    EmptyFilterField { object_type: String, name: String },
}

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub name: String,
    /// Name of the returned object type.
    pub ty: String,
    /// Dotted key paths, relative to the returned object type.
    pub keys: Vec<String>,
    pub list: bool,
    pub pageable: bool,
    pub batch: bool,
    pub context: Option<String>,
}

impl Query {
    /// Key names with their path. A key is named after its last segment.
    pub fn key_map(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.keys.iter().map(|path| (key_name(path), path.as_str()))
    }

    pub fn key_path(&self, name: &str) -> Option<&str> {
        self.key_map().find(|(key, _)| *key == name).map(|(_, path)| path)
    }
}

pub fn key_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub name: String,
    pub(crate) fields: IndexMap<String, ContextField>,
}

impl Context {
    pub fn field(&self, name: &str) -> Option<&ContextField> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &ContextField> + '_ {
        self.fields.values()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextField {
    pub name: String,
    pub ty: String,
    pub default: Option<serde_json::Value>,
}

mod settings;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
pub use settings::SettingsConfig;

/// The deserialized form of a datagraph schema. It is only a description: building a [crate::Schema]
/// out of it and running the validators is what makes it usable.
#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub object_types: IndexMap<String, ObjectTypeConfig>,
    pub queries: IndexMap<String, QueryConfig>,
    pub subscriptions: IndexMap<String, SubscriptionConfig>,
    pub contexts: IndexMap<String, ContextConfig>,
    pub settings: SettingsConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read the schema configuration at '{}': {err}", .path.display())]
    Io { path: PathBuf, err: std::io::Error },
    #[error("Invalid schema configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid schema configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Loads a configuration file, JSON when the extension says so and TOML otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObjectTypeConfig {
    pub fields: IndexMap<String, ObjectFieldConfig>,
    pub sortable_by: IndexMap<String, Vec<SortableByConfig>>,
    pub filters: IndexMap<String, FilterConfig>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectFieldConfig {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub value_fetcher: Option<String>,
    #[serde(default)]
    pub aggregation_of: Option<String>,
    #[serde(default)]
    pub join_columns: Vec<JoinColumnConfig>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JoinColumnConfig {
    /// Field of the joined (child) type.
    pub name: String,
    /// Field of the owning (parent) type holding the value to match.
    pub referenced_field: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortableByConfig {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Dotted path of the filtered field, the filter name is used when absent.
    pub field: Option<String>,
    pub case_sensitive: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            field: None,
            case_sensitive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub pageable: bool,
    #[serde(default)]
    pub batch: bool,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionConfig {
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextConfig {
    pub fields: IndexMap<String, ContextFieldConfig>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextFieldConfig {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

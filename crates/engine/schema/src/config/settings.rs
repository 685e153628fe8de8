#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsConfig {
    /// Forward every operation to this target instead of resolving it locally.
    pub proxy: Option<String>,
    pub max_filter_depth: usize,
    pub max_batch_key_size: usize,
    pub default_first: u64,
    pub max_first: u64,
    pub max_offset: u64,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            max_filter_depth: 2,
            max_batch_key_size: 100,
            default_first: 10,
            max_first: 100,
            max_offset: 10_000,
        }
    }
}

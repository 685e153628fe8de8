use super::{ConfigurationError, Validator};
use crate::Schema;

/// A proxy forwards everything, so nothing may be resolved locally next to it.
pub struct SettingsValidator;

impl Validator for SettingsValidator {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigurationError> {
        let Some(proxy) = &schema.settings.proxy else {
            return Ok(());
        };

        if schema.queries().len() > 0 || schema.subscriptions().len() > 0 || schema.object_types().len() > 0 {
            return Err(ConfigurationError::ProxyWithLocalConfiguration { proxy: proxy.clone() });
        }

        Ok(())
    }
}

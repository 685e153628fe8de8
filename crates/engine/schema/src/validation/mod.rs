//! Checks run once against the schema model at startup. Every validator fails fast on the first
//! violation, a schema which doesn't pass all of them must not serve any request.

mod error;
mod filter;
mod object_field;
mod paths;
mod query;
mod settings;
mod sort;

pub use error::ConfigurationError;
pub use filter::FilterValidator;
pub use object_field::ObjectFieldValidator;
pub use query::QueryValidator;
pub use settings::SettingsValidator;
pub use sort::SortValidator;

use crate::Schema;

pub trait Validator {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigurationError>;
}

/// Tells whether a value fetcher is registered under a given name.
pub trait ValueFetcherSupport {
    fn supports(&self, value_fetcher: &str) -> bool;
}

impl<F> ValueFetcherSupport for F
where
    F: Fn(&str) -> bool,
{
    fn supports(&self, value_fetcher: &str) -> bool {
        self(value_fetcher)
    }
}

/// Runs every validator, in a fixed order.
pub fn validate(schema: &Schema, value_fetchers: &dyn ValueFetcherSupport) -> Result<(), ConfigurationError> {
    let object_field_validator = ObjectFieldValidator::new(value_fetchers);
    let validators: [&dyn Validator; 5] = [
        &SettingsValidator,
        &QueryValidator,
        &SortValidator,
        &FilterValidator,
        &object_field_validator,
    ];

    for validator in validators {
        validator.validate(schema)?;
    }

    tracing::info!(
        object_types = schema.object_types().len(),
        queries = schema.queries().len(),
        subscriptions = schema.subscriptions().len(),
        "Schema configuration is valid"
    );

    Ok(())
}

use std::collections::HashSet;

use super::{ConfigurationError, Validator};
use crate::{MAX_KEY_DEPTH, Query, Schema, key_name};

/// Checks the return types, contexts and keys of every query, and that subscriptions point to an
/// existing type.
pub struct QueryValidator;

impl Validator for QueryValidator {
    fn validate(&self, schema: &Schema) -> Result<(), ConfigurationError> {
        for query in schema.queries() {
            validate_query(schema, query)?;
        }

        for subscription in schema.subscriptions() {
            if schema.object_type(&subscription.ty).is_none() {
                return Err(ConfigurationError::UnknownSubscriptionType {
                    subscription: subscription.name.clone(),
                    ty: subscription.ty.clone(),
                });
            }
        }

        Ok(())
    }
}

fn validate_query(schema: &Schema, query: &Query) -> Result<(), ConfigurationError> {
    let Some(object_type) = schema.object_type(&query.ty) else {
        return Err(ConfigurationError::UnknownQueryType {
            query: query.name.clone(),
            ty: query.ty.clone(),
        });
    };

    if let Some(context) = &query.context {
        if schema.context(context).is_none() {
            return Err(ConfigurationError::UnknownContext {
                query: query.name.clone(),
                context: context.clone(),
            });
        }
    }

    for key in &query.keys {
        if key.split('.').count() > MAX_KEY_DEPTH {
            return Err(ConfigurationError::KeyTooDeep {
                query: query.name.clone(),
                key: key.clone(),
                max: MAX_KEY_DEPTH,
            });
        }

        let path = schema
            .resolve_field_path(object_type, key)
            .map_err(|source| ConfigurationError::UnresolvableKey {
                query: query.name.clone(),
                key: key.clone(),
                source,
            })?;

        let leaf = path.leaf();
        if !path.ends_in_scalar(schema) {
            return Err(ConfigurationError::KeyNotScalar {
                query: query.name.clone(),
                field: leaf.name.clone(),
            });
        }

        if leaf.is_nullable() || leaf.is_list() {
            return Err(ConfigurationError::KeyNullableOrList {
                query: query.name.clone(),
                field: leaf.name.clone(),
            });
        }
    }

    if query.batch {
        if query.pageable {
            return Err(ConfigurationError::PagingWithBatching {
                query: query.name.clone(),
            });
        }

        match query.keys.as_slice() {
            [] => {
                return Err(ConfigurationError::BatchingWithoutKeys {
                    query: query.name.clone(),
                });
            }
            [key] if !key.contains('.') => {}
            _ => {
                return Err(ConfigurationError::BatchingWithCompositeKey {
                    query: query.name.clone(),
                });
            }
        }
    }

    let mut names = HashSet::with_capacity(query.keys.len());
    for key in &query.keys {
        let name = key_name(key);
        if !names.insert(name) {
            return Err(ConfigurationError::DuplicateKeyName {
                query: query.name.clone(),
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tests::{BREWERY_SCHEMA, schema_from_toml};

    fn validate_with_query(query: &str) -> Result<(), ConfigurationError> {
        let schema = schema_from_toml(&format!("{BREWERY_SCHEMA}\n{query}"));
        QueryValidator.validate(&schema)
    }

    #[test]
    fn brewery_queries_are_valid() {
        validate_with_query("").unwrap();
    }

    #[test]
    fn unknown_query_type() {
        let err = validate_with_query(indoc::indoc! {r#"
            [queries.brewer]
            type = "Brewer"
        "#})
        .unwrap_err();

        insta::assert_snapshot!(err, @"The type 'Brewer', of query: 'brewer', doesn't exist in the configuration.");
    }

    #[test]
    fn unknown_subscription_type() {
        let err = validate_with_query(indoc::indoc! {r#"
            [subscriptions.beerStream]
            type = "Bier"
        "#})
        .unwrap_err();

        insta::assert_snapshot!(err, @"The type 'Bier', of subscription: 'beerStream', doesn't exist in the configuration.");
    }

    #[test]
    fn unknown_context() {
        let err = validate_with_query(indoc::indoc! {r#"
            [queries.breweryAt]
            type = "Brewery"
            context = "timeline"
        "#})
        .unwrap_err();

        insta::assert_snapshot!(err, @"The context 'timeline', of query: 'breweryAt', doesn't exist in the configuration.");
    }

    #[test]
    fn key_with_more_than_three_segments() {
        let err = validate_with_query(indoc::indoc! {r#"
            [queries.beerByCity]
            type = "Beer"
            keys = ["brewery.node.postalAddress.city"]
        "#})
        .unwrap_err()
        .to_string();

        assert!(err.contains("A key can't exist out of more than 3 fields."), "{err}");
        insta::assert_snapshot!(err, @"A key can't exist out of more than 3 fields. Key: 'brewery.node.postalAddress.city' of query 'beerByCity'.");
    }

    #[test]
    fn nested_key_within_depth() {
        validate_with_query(indoc::indoc! {r#"
            [queries.breweryBySrid]
            type = "Brewery"
            keys = ["visitAddress.geometry.srid"]
        "#})
        .unwrap();
    }

    #[test]
    fn nullable_key() {
        let err = validate_with_query(indoc::indoc! {r#"
            [object_types.Tag.fields.label]
            type = "String"
            nullable = true

            [queries.tag]
            type = "Tag"
            keys = ["label"]
        "#})
        .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::KeyNullableOrList {
                query: "tag".into(),
                field: "label".into(),
            }
        );
    }

    #[rstest]
    #[case::unknown_segment(
        "visitAddress.invalid",
        "Key 'visitAddress.invalid' of query 'test' can't be resolved. \
         Field 'invalid' of path 'visitAddress.invalid' doesn't exist in object type 'Address'."
    )]
    #[case::scalar_segment(
        "name.first",
        "Key 'name.first' of query 'test' can't be resolved. \
         Field 'name' of path 'name.first' in object type 'Brewery' is not an object field."
    )]
    #[case::object_leaf("visitAddress", "Key field 'visitAddress' of query 'test' must be a scalar field.")]
    fn invalid_key_paths(#[case] key: &str, #[case] expected: &str) {
        let err = validate_with_query(&format!("[queries.test]\ntype = \"Brewery\"\nkeys = [\"{key}\"]\n"))
            .unwrap_err()
            .to_string();

        assert_eq!(err, expected);
    }

    #[test]
    fn list_key() {
        let err = validate_with_query(indoc::indoc! {r#"
            [object_types.Tag.fields.values]
            type = "String"
            list = true

            [queries.tag]
            type = "Tag"
            keys = ["values"]
        "#})
        .unwrap_err();

        insta::assert_snapshot!(err, @"Key field 'values' of query 'tag' can't be nullable or a list.");
    }

    #[test]
    fn paging_and_batching() {
        let err = validate_with_query(indoc::indoc! {r#"
            [queries.breweryPages]
            type = "Brewery"
            keys = ["identifier"]
            batch = true
            pageable = true
        "#})
        .unwrap_err();

        insta::assert_snapshot!(err, @"Paging and batching is not supported for query 'breweryPages'.");
    }

    #[test]
    fn batching_without_keys() {
        let err = validate_with_query(indoc::indoc! {r#"
            [queries.breweries2]
            type = "Brewery"
            batch = true
        "#})
        .unwrap_err();

        insta::assert_snapshot!(err, @"Batching for query 'breweries2' without keys is not possible.");
    }

    #[rstest]
    #[case::two_keys(r#"["identifier", "name"]"#)]
    #[case::nested_key(r#"["visitAddress.street"]"#)]
    fn batching_with_composite_key(#[case] keys: &str) {
        let err = validate_with_query(&format!(
            "[queries.breweryBatch2]\ntype = \"Brewery\"\nbatch = true\nkeys = {keys}\n"
        ))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::BatchingWithCompositeKey {
                query: "breweryBatch2".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "Batching for query 'breweryBatch2' with a composite key is not supported."
        );
    }

    #[test]
    fn duplicate_key_names() {
        let err = validate_with_query(indoc::indoc! {r#"
            [queries.breweryByStreet]
            type = "Brewery"
            keys = ["postalAddress.street", "visitAddress.street"]
        "#})
        .unwrap_err();

        insta::assert_snapshot!(err, @"Key name 'street' of query 'breweryByStreet' isn't unique.");
    }
}

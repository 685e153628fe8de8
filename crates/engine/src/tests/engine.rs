use schema::SchemaConfig;

use super::{BREWERY_SCHEMA, InMemoryLoader, Shorten, brewery_engine};
use crate::{Engine, EngineBuilder, EngineError};

#[test]
fn builds_a_validated_engine() {
    let engine = brewery_engine(InMemoryLoader::default());

    assert!(engine.schema().query("breweryBatch").is_some_and(|query| query.batch));
    assert!(engine.value_fetchers().get("shorten").is_some());
}

#[test]
fn unregistered_value_fetcher() {
    let err = Engine::builder(SchemaConfig::from_toml_str(BREWERY_SCHEMA).unwrap())
        .with_loader(InMemoryLoader::default())
        .build()
        .unwrap_err();

    assert!(matches!(err, EngineError::Configuration(_)));
    insta::assert_snapshot!(err, @"Value fetcher 'shorten' of field 'shortName' in object type 'Brewery' isn't supported.");
}

#[test]
fn invalid_configuration() {
    let config = SchemaConfig::from_toml_str(indoc::indoc! {r#"
        [queries.brewery]
        type = "Brewery"
        keys = ["identifier"]
        batch = true
        pageable = true

        [object_types.Brewery.fields.identifier]
        type = "ID"
    "#})
    .unwrap();

    let err = Engine::builder(config)
        .with_loader(InMemoryLoader::default())
        .build()
        .unwrap_err();

    insta::assert_snapshot!(err, @"Paging and batching is not supported for query 'brewery'.");
}

#[test]
fn missing_loader() {
    let err = Engine::builder(SchemaConfig::from_toml_str(BREWERY_SCHEMA).unwrap())
        .with_value_fetcher("shorten", Shorten)
        .build()
        .unwrap_err();

    insta::assert_snapshot!(err, @"No backend loader was registered.");
}

#[test]
fn configuration_from_path() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/schema/fixtures/brewery.toml");

    let engine = EngineBuilder::from_path(path)
        .unwrap()
        .with_loader(InMemoryLoader::default())
        .with_value_fetcher("shorten", Shorten)
        .build()
        .unwrap();

    assert_eq!(engine.schema().settings.max_batch_key_size, 3);
    assert!(matches!(
        EngineBuilder::from_path("does/not/exist.toml"),
        Err(EngineError::Config(_))
    ));
}

mod engine;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use futures::{FutureExt, StreamExt, future::BoxFuture, stream::BoxStream};
use request::{
    BatchRequest, CollectionBatchRequest, CollectionRequest, JoinKey, KeyCriteria, ObjectRequest, Record, Value,
    ValueFetcher,
};
use schema::SchemaConfig;
use serde_json::json;

use crate::{BackendLoader, Engine};

const BREWERY_SCHEMA: &str = include_str!("../../schema/fixtures/brewery.toml");

#[ctor::ctor]
fn setup_logging() {
    let filter = tracing_subscriber::filter::EnvFilter::builder()
        .parse(std::env::var("RUST_LOG").unwrap_or("datagraph_engine=debug".to_string()))
        .unwrap();
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .without_time()
        .with_test_writer()
        .init();
}

/// Abbreviates a name to its initials.
struct Shorten;

impl ValueFetcher for Shorten {
    fn source_fields(&self) -> Vec<String> {
        vec!["name".to_string()]
    }

    fn fetch(&self, source: &Record) -> anyhow::Result<Value> {
        let name = source
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("missing name"))?;
        Ok(name.split_whitespace().filter_map(|word| word.chars().next()).collect::<String>().into())
    }
}

/// Names of the loader methods called so far, with the object type they were called for.
#[derive(Clone, Default)]
struct Calls(Arc<Mutex<Vec<String>>>);

impl Calls {
    fn record(&self, method: &str, object_type: &str) {
        self.0.lock().unwrap().push(format!("{method} {object_type}"));
    }

    fn get(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Serves records of every object type out of memory. Key and join criteria are honored, sorting,
/// filtering and paging are not.
#[derive(Default)]
struct InMemoryLoader {
    records: HashMap<String, Vec<Record>>,
    calls: Calls,
    failure: Option<String>,
}

impl InMemoryLoader {
    fn breweries() -> Self {
        let mut loader = Self::default();
        loader.insert("Brewery", json!({"identifier": "b1", "name": "Brouwerij Alfa"}));
        loader.insert("Brewery", json!({"identifier": "b2", "name": "Gulpener Bierbrouwerij"}));
        loader.insert("Beer", json!({"identifier": "p1", "name": "Alfa Edel Pils", "brewery": "b1"}));
        loader.insert("Beer", json!({"identifier": "p2", "name": "Alfa Oud Bruin", "brewery": "b1"}));
        loader.insert("Beer", json!({"identifier": "p3", "name": "Gulpener Pilsener", "brewery": "b2"}));
        loader.insert("Ingredient", json!({"identifier": "i1", "name": "Hop"}));
        loader.insert("Ingredient", json!({"identifier": "i2", "name": "Malt"}));
        loader
    }

    fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn insert(&mut self, object_type: &str, record: Value) {
        let Value::Object(record) = record else {
            unreachable!("records are objects");
        };
        self.records.entry(object_type.to_string()).or_default().push(record);
    }

    fn records_of(&self, object_type: &str) -> impl Iterator<Item = &Record> + '_ {
        self.records.get(object_type).into_iter().flatten()
    }

    fn check(&self) -> anyhow::Result<()> {
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(()),
        }
    }
}

fn matches_key(record: &Record, key: &KeyCriteria<'_>) -> bool {
    let mut current = Some(record);
    let mut value = None;
    for name in key.field_path.names() {
        value = current.and_then(|record| record.get(name));
        current = value.and_then(Value::as_object);
    }
    value == Some(&key.value)
}

impl BackendLoader for InMemoryLoader {
    fn load_single<'a>(&'a self, request: ObjectRequest<'a>) -> BoxFuture<'a, anyhow::Result<Option<Record>>> {
        self.calls.record("load_single", &request.object_type.name);
        let result = self.check().map(|_| {
            self.records_of(&request.object_type.name)
                .find(|record| request.key_criteria.iter().all(|key| matches_key(record, key)))
                .cloned()
        });
        futures::future::ready(result).boxed()
    }

    fn load_many<'a>(&'a self, request: CollectionRequest<'a>) -> BoxStream<'a, anyhow::Result<Record>> {
        let object_request = &request.object_request;
        self.calls.record("load_many", &object_request.object_type.name);
        if let Err(err) = self.check() {
            return futures::stream::once(async move { Err(err) }).boxed();
        }
        let records = self
            .records_of(&object_request.object_type.name)
            .filter(|record| object_request.key_criteria.iter().all(|key| matches_key(record, key)))
            .cloned()
            .map(Ok)
            .collect::<Vec<anyhow::Result<Record>>>();
        futures::stream::iter(records).boxed()
    }

    fn batch_load_single<'a>(
        &'a self,
        request: BatchRequest<'a>,
    ) -> BoxStream<'a, anyhow::Result<(KeyCriteria<'a>, Option<Record>)>> {
        self.calls.record("batch_load_single", &request.object_request.object_type.name);
        let object_type = request.object_request.object_type.name.clone();
        // Reversed, callers must not rely on the order of the backend.
        let results = request
            .keys
            .into_iter()
            .rev()
            .map(|key| {
                let record = self.records_of(&object_type).find(|record| matches_key(record, &key)).cloned();
                anyhow::Ok((key, record))
            })
            .collect::<Vec<_>>();
        futures::stream::iter(results).boxed()
    }

    fn batch_load_many<'a>(
        &'a self,
        request: CollectionBatchRequest<'a>,
    ) -> BoxStream<'a, anyhow::Result<(JoinKey, Vec<Record>)>> {
        let object_type = &request.collection_request.object_request.object_type.name;
        self.calls.record("batch_load_many", object_type);
        let results = request
            .join_criteria
            .keys
            .iter()
            .map(|key| {
                let records = self
                    .records_of(object_type)
                    .filter(|record| key.iter().all(|(name, value)| record.get(name) == Some(value)))
                    .cloned()
                    .collect::<Vec<_>>();
                anyhow::Ok((key.clone(), records))
            })
            .collect::<Vec<_>>();
        futures::stream::iter(results).boxed()
    }
}

fn brewery_engine(loader: InMemoryLoader) -> Engine {
    Engine::builder(SchemaConfig::from_toml_str(BREWERY_SCHEMA).unwrap())
        .with_loader(loader)
        .with_value_fetcher("shorten", Shorten)
        .build()
        .unwrap()
}

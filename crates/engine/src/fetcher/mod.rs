mod output;
mod strategy;

use futures::{FutureExt, TryFutureExt, TryStreamExt};
use request::{
    JoinCondition, JoinCriteria, OperationType, RequestError, RequestFactory, ResolutionContext, Value, ValueFetchers,
};
use schema::Schema;

pub use output::FieldOutput;
pub use strategy::FetchStrategy;

use crate::{BackendLoader, FetchError};

/// Resolves fields against a backend loader. Cheap to create, borrows everything from the
/// [crate::Engine] it comes from.
#[derive(Clone, Copy)]
pub struct DataFetcher<'a> {
    schema: &'a Schema,
    factory: RequestFactory<'a>,
    value_fetchers: &'a ValueFetchers,
    loader: &'a dyn BackendLoader,
}

impl<'a> DataFetcher<'a> {
    pub(crate) fn new(schema: &'a Schema, value_fetchers: &'a ValueFetchers, loader: &'a dyn BackendLoader) -> Self {
        Self {
            schema,
            factory: RequestFactory::new(schema, value_fetchers),
            value_fetchers,
            loader,
        }
    }

    /// A value already in the parent record wins. Otherwise root fields run a query of their own, while
    /// nested fields are either computed from the parent record or joined through their join columns.
    pub fn strategy(&self, ctx: &dyn ResolutionContext) -> FetchStrategy {
        let request_ctx = self.factory.create_request_context(ctx);
        if request_ctx.eager_value().is_some() {
            return FetchStrategy::EagerLoaded;
        }

        let field = ctx.field();
        if ctx.parent_type().is_none() {
            return if ctx.operation_type() == OperationType::Subscription {
                FetchStrategy::Subscription
            } else if self.schema.query(field.name()).is_some_and(|query| query.batch) {
                FetchStrategy::BatchFetch
            } else if field.ty().list {
                FetchStrategy::CollectionFetch
            } else {
                FetchStrategy::SingleFetch
            };
        }

        match request_ctx.object_field {
            Some(object_field)
                if object_field.value_fetcher.is_some()
                    || object_field.is_aggregate()
                    || !self.schema.is_object_field(object_field) =>
            {
                FetchStrategy::Scalar
            }
            Some(object_field)
                if object_field.is_list() && object_field.has_join_columns() && request_ctx.source.is_some() =>
            {
                FetchStrategy::JoinedCollectionFetch
            }
            _ => FetchStrategy::Missing,
        }
    }

    pub fn fetch(&self, ctx: &dyn ResolutionContext) -> Result<FieldOutput<'a>, FetchError> {
        let strategy = self.strategy(ctx);
        tracing::debug!(field = ctx.field().name(), parent = ?ctx.parent_type(), %strategy, "Resolving field");

        match strategy {
            FetchStrategy::EagerLoaded => Ok(self.eager_loaded(ctx)),
            FetchStrategy::Scalar => self.scalar(ctx),
            FetchStrategy::Subscription => self.subscription(ctx),
            FetchStrategy::CollectionFetch => self.collection(ctx),
            FetchStrategy::SingleFetch => self.single(ctx),
            FetchStrategy::BatchFetch => self.batch(ctx),
            FetchStrategy::JoinedCollectionFetch => self.joined_collection(ctx),
            FetchStrategy::Missing => Ok(self.missing(ctx)),
        }
    }

    fn eager_loaded(&self, ctx: &dyn ResolutionContext) -> FieldOutput<'a> {
        let field = ctx.field();
        let value = self
            .factory
            .create_request_context(ctx)
            .eager_value()
            .cloned()
            .unwrap_or(Value::Null);

        if field.ty().list != value.is_array() && !value.is_null() {
            tracing::warn!(
                field = field.name(),
                list = field.ty().list,
                "Eager loaded value doesn't match the shape of the field"
            );
        }

        FieldOutput::Value(value)
    }

    fn scalar(&self, ctx: &dyn ResolutionContext) -> Result<FieldOutput<'a>, FetchError> {
        let field = ctx.field();
        let request_ctx = self.factory.create_request_context(ctx);
        let Some(source) = request_ctx.source else {
            return Ok(FieldOutput::Value(Value::Null));
        };

        let value_fetcher = request_ctx
            .object_field
            .and_then(|object_field| object_field.value_fetcher.as_deref());
        let Some(name) = value_fetcher else {
            return Ok(FieldOutput::Value(request_ctx.eager_value().cloned().unwrap_or(Value::Null)));
        };

        let fetcher = self
            .value_fetchers
            .get(name)
            .ok_or_else(|| RequestError::UnknownValueFetcher {
                field: field.name().to_string(),
                name: name.to_string(),
            })?;
        let value = fetcher.fetch(source).map_err(|err| FetchError::ValueFetcher {
            field: field.name().to_string(),
            name: name.to_string(),
            source: err,
        })?;

        Ok(FieldOutput::Value(value))
    }

    /// A nested object field the parent resolution didn't load and that can't be joined on its own.
    /// Loading it like a root field would hand every parent the same records.
    fn missing(&self, ctx: &dyn ResolutionContext) -> FieldOutput<'a> {
        let field = ctx.field();
        tracing::warn!(
            field = field.name(),
            parent = ?ctx.parent_type(),
            "Nested field is missing from its parent record and has no join columns"
        );

        if field.ty().list {
            FieldOutput::Value(Value::Array(Vec::new()))
        } else {
            FieldOutput::Value(Value::Null)
        }
    }

    fn subscription(&self, ctx: &dyn ResolutionContext) -> Result<FieldOutput<'a>, FetchError> {
        let request = self.factory.create_collection_request(ctx)?;
        let stream = self
            .loader
            .load_many(request)
            .map_ok(Value::Object)
            .map_err(FetchError::backend(ctx.field().name()));

        Ok(FieldOutput::Stream(Box::pin(stream)))
    }

    fn collection(&self, ctx: &dyn ResolutionContext) -> Result<FieldOutput<'a>, FetchError> {
        let request = self.factory.create_collection_request(ctx)?;
        let future = self
            .loader
            .load_many(request)
            .map_ok(Value::Object)
            .try_collect::<Vec<_>>()
            .map_ok(Value::Array)
            .map_err(FetchError::backend(ctx.field().name()));

        Ok(FieldOutput::Future(future.boxed()))
    }

    fn single(&self, ctx: &dyn ResolutionContext) -> Result<FieldOutput<'a>, FetchError> {
        let request = self.factory.create_object_request(ctx)?;
        let future = self
            .loader
            .load_single(request)
            .map_ok(|record| record.map(Value::Object).unwrap_or(Value::Null))
            .map_err(FetchError::backend(ctx.field().name()));

        Ok(FieldOutput::Future(future.boxed()))
    }

    /// Records come back in the order of the key argument, `null` for keys without a record.
    fn batch(&self, ctx: &dyn ResolutionContext) -> Result<FieldOutput<'a>, FetchError> {
        let request = self.factory.create_batch_request(ctx)?;
        let keys = request.keys.iter().map(|key| key.value.clone()).collect::<Vec<_>>();

        let future = self
            .loader
            .batch_load_single(request)
            .map_ok(|(key, record)| (key.value, record))
            .try_collect::<Vec<_>>()
            .map_ok(move |loaded| {
                let records = keys
                    .iter()
                    .map(|key| {
                        loaded
                            .iter()
                            .find(|(loaded_key, _)| loaded_key == key)
                            .and_then(|(_, record)| record.clone())
                            .map(Value::Object)
                            .unwrap_or(Value::Null)
                    })
                    .collect();
                Value::Array(records)
            })
            .map_err(FetchError::backend(ctx.field().name()));

        Ok(FieldOutput::Future(future.boxed()))
    }

    /// Each parent loads its own collection: the join criteria only ever hold the key of the parent
    /// being resolved.
    fn joined_collection(&self, ctx: &dyn ResolutionContext) -> Result<FieldOutput<'a>, FetchError> {
        let (Some(object_field), Some(source)) = (self.factory.object_field_of(ctx), ctx.source()) else {
            return Ok(FieldOutput::Value(Value::Array(Vec::new())));
        };

        let mut join_criteria = JoinCriteria::new(JoinCondition::new(&object_field.join_columns));
        let Some(key) = join_criteria.add_parent(source) else {
            tracing::warn!(
                field = %object_field.name,
                parent = %object_field.parent,
                "Parent record lacks a referenced join field"
            );
            return Ok(FieldOutput::Value(Value::Array(Vec::new())));
        };

        let request = self.factory.create_collection_batch_request(ctx, join_criteria)?;
        let future = self
            .loader
            .batch_load_many(request)
            .try_collect::<Vec<_>>()
            .map_ok(move |loaded| {
                let records = loaded
                    .into_iter()
                    .find(|(loaded_key, _)| *loaded_key == key)
                    .map(|(_, records)| records.into_iter().map(Value::Object).collect())
                    .unwrap_or_default();
                Value::Array(records)
            })
            .map_err(FetchError::backend(ctx.field().name()));

        Ok(FieldOutput::Future(future.boxed()))
    }
}

mod aggregate;
mod arguments;
mod filter;
mod selection;
mod sort;

use schema::{FILTER_ARGUMENT_NAME, ObjectField, ObjectType, Query, SORT_ARGUMENT_NAME, Schema};

use crate::{
    BatchRequest, CollectionBatchRequest, CollectionRequest, Field, JoinCriteria, ObjectRequest, OperationType,
    RequestContext, RequestError, ResolutionContext, ValueFetchers,
};
use selection::Selection;

/// Builds query request trees out of field resolution contexts. Holds nothing but references to
/// read-only state, so a single factory can serve any number of concurrent resolutions.
#[derive(Clone, Copy)]
pub struct RequestFactory<'s> {
    schema: &'s Schema,
    value_fetchers: &'s ValueFetchers,
}

impl<'s> RequestFactory<'s> {
    pub fn new(schema: &'s Schema, value_fetchers: &'s ValueFetchers) -> Self {
        Self { schema, value_fetchers }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn create_object_request(&self, ctx: &dyn ResolutionContext) -> Result<ObjectRequest<'s>, RequestError> {
        let field = ctx.field();
        let object_type = self.object_type_of(field)?;
        let query = self.root_query(ctx);

        let mut request = self.build_object_request(object_type, field)?;
        request.key_criteria = self.key_criteria(object_type, query, field.arguments())?;
        request.context_criteria = query
            .map(|query| self.context_criteria(query, field.arguments()))
            .transpose()?
            .flatten();

        tracing::debug!(
            object_type = %object_type.name,
            scalar_fields = request.scalar_fields().len(),
            keys = request.key_criteria.len(),
            "Created object request for field '{}'",
            field.name()
        );

        Ok(request)
    }

    pub fn create_collection_request(
        &self,
        ctx: &dyn ResolutionContext,
    ) -> Result<CollectionRequest<'s>, RequestError> {
        let field = ctx.field();
        let object_type = self.object_type_of(field)?;
        let query = self.root_query(ctx);

        let mut request = self.build_collection_request(object_type, field, query)?;
        request.object_request.context_criteria = query
            .map(|query| self.context_criteria(query, field.arguments()))
            .transpose()?
            .flatten();

        tracing::debug!(
            object_type = %object_type.name,
            sort_criteria = request.sort_criteria.len(),
            filtered = request.filter_criteria.is_some(),
            paged = request.paging_criteria.is_some(),
            "Created collection request for field '{}'",
            field.name()
        );

        Ok(request)
    }

    /// For batch queries: one key criteria per value of the key argument.
    pub fn create_batch_request(&self, ctx: &dyn ResolutionContext) -> Result<BatchRequest<'s>, RequestError> {
        let field = ctx.field();
        let object_type = self.object_type_of(field)?;
        let query = self
            .root_query(ctx)
            .ok_or_else(|| RequestError::UnknownQuery {
                name: field.name().to_string(),
            })?;

        if !query.batch {
            return Err(RequestError::NotABatchQuery {
                query: query.name.clone(),
            });
        }

        let mut object_request = self.build_object_request(object_type, field)?;
        object_request.context_criteria = self.context_criteria(query, field.arguments())?;
        let keys = self.batch_keys(object_type, query, field.arguments())?;

        Ok(BatchRequest { object_request, keys })
    }

    /// For nested collections resolved separately from their parent records.
    pub fn create_collection_batch_request(
        &self,
        ctx: &dyn ResolutionContext,
        join_criteria: JoinCriteria<'s>,
    ) -> Result<CollectionBatchRequest<'s>, RequestError> {
        let field = ctx.field();
        let object_type = self.object_type_of(field)?;
        let collection_request = self.build_collection_request(object_type, field, None)?;

        Ok(CollectionBatchRequest {
            collection_request,
            join_criteria,
        })
    }

    pub fn create_request_context<'c>(&self, ctx: &'c dyn ResolutionContext) -> RequestContext<'c>
    where
        's: 'c,
    {
        let field = ctx.field();
        let object_field = self.object_field_of(ctx);
        let nested = object_field.is_some_and(|object_field| {
            object_field.is_aggregate() || self.schema.is_object_field(object_field)
        });

        RequestContext {
            object_field,
            source: ctx.source(),
            eager_key: if nested { field.response_key() } else { field.name() },
        }
    }

    /// The object field backing the resolved field, `None` for root fields.
    pub fn object_field_of(&self, ctx: &dyn ResolutionContext) -> Option<&'s ObjectField> {
        let parent = self.schema.object_type(ctx.parent_type()?)?;
        parent.field(ctx.field().name())
    }

    fn root_query(&self, ctx: &dyn ResolutionContext) -> Option<&'s Query> {
        if ctx.parent_type().is_some() || ctx.operation_type() != OperationType::Query {
            return None;
        }
        self.schema.query(ctx.field().name())
    }

    fn object_type_of(&self, field: &dyn Field) -> Result<&'s ObjectType, RequestError> {
        let ty = field.ty();
        self.schema
            .object_type(&ty.name)
            .ok_or_else(|| RequestError::NotAnObjectType {
                field: field.name().to_string(),
                ty: ty.name.clone(),
            })
    }

    fn build_object_request(
        &self,
        object_type: &'s ObjectType,
        field: &dyn Field,
    ) -> Result<ObjectRequest<'s>, RequestError> {
        let selection = Selection::partition(self.schema, object_type, field)?;
        let mut request = ObjectRequest::new(object_type);

        for scalar in selection.scalars {
            self.add_scalar_field(&mut request, scalar)?;
        }

        for (object_field, selected) in selection.objects {
            let target = self.target_type(object_field)?;
            let mut nested = self.build_object_request(target, selected)?;
            nested.key_criteria = self.key_criteria(target, None, selected.arguments())?;
            request.add_object_field(selected.response_key(), object_field, nested)?;
        }

        for (object_field, selected) in selection.collections {
            let target = self.target_type(object_field)?;
            let nested = self.build_collection_request(target, selected, None)?;
            request.add_collection_field(selected.response_key(), object_field, nested)?;
        }

        for (object_field, selected) in selection.aggregates {
            request.add_aggregate_field(self.aggregate_object_field(object_field, selected)?)?;
        }

        Ok(request)
    }

    fn build_collection_request(
        &self,
        object_type: &'s ObjectType,
        field: &dyn Field,
        query: Option<&Query>,
    ) -> Result<CollectionRequest<'s>, RequestError> {
        let arguments = field.arguments();

        let mut object_request = self.build_object_request(object_type, field)?;
        object_request.key_criteria = self.key_criteria(object_type, query, arguments)?;

        let mut request = CollectionRequest::new(object_request);
        request.sort_criteria = self.sort_criteria(object_type, arguments.get(SORT_ARGUMENT_NAME))?;
        request.filter_criteria = arguments
            .get(FILTER_ARGUMENT_NAME)
            .map(|value| self.filter_criteria(object_type, value))
            .transpose()?
            .flatten();
        request.paging_criteria = query
            .filter(|query| query.pageable)
            .map(|_| self.paging_criteria(arguments))
            .transpose()?;

        Ok(request)
    }

    /// Fields computed by a value fetcher are not loaded themselves, their source fields are.
    fn add_scalar_field(&self, request: &mut ObjectRequest<'s>, field: &'s ObjectField) -> Result<(), RequestError> {
        let Some(name) = &field.value_fetcher else {
            request.add_scalar_field(field);
            return Ok(());
        };

        let value_fetcher = self
            .value_fetchers
            .get(name)
            .ok_or_else(|| RequestError::UnknownValueFetcher {
                field: field.name.clone(),
                name: name.clone(),
            })?;

        for source_field in value_fetcher.source_fields() {
            let source = request
                .object_type
                .field(&source_field)
                .ok_or_else(|| RequestError::UnknownField {
                    object_type: request.object_type.name.clone(),
                    field: source_field.clone(),
                })?;
            request.add_scalar_field(source);
        }

        Ok(())
    }

    fn target_type(&self, field: &'s ObjectField) -> Result<&'s ObjectType, RequestError> {
        self.schema
            .target_type(field)
            .ok_or_else(|| RequestError::NotAnObjectType {
                field: field.name.clone(),
                ty: field.ty.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{
        ErrorKind, FieldContext, FieldType, JoinCondition, JoinCriteria, PagingCriteria, RequestError, SelectedField,
        tests::{brewery_schema, factory_for},
    };

    fn scalar(name: &str) -> SelectedField {
        SelectedField::new(name, FieldType::named("String").required())
    }

    fn scalar_names(request: &crate::ObjectRequest<'_>) -> Vec<String> {
        request.scalar_fields().iter().map(|field| field.name.clone()).collect()
    }

    #[test]
    fn object_request_for_root_query() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("brewery", FieldType::named("Brewery"))
                .with_argument("identifier", "b1")
                .with_selection(scalar("name"))
                .with_selection(scalar("__typename"))
                .with_selection(
                    SelectedField::new("visitAddress", FieldType::named("Address"))
                        .with_selection(scalar("street"))
                        .with_selection(
                            SelectedField::new("geometry", FieldType::named("Geometry")).with_selection(scalar("srid")),
                        ),
                )
                .with_selection(SelectedField::new("beers", FieldType::list_of("Beer")).with_selection(scalar("name"))),
        );

        let request = factory.create_object_request(&ctx).unwrap();

        assert_eq!(request.object_type.name, "Brewery");
        assert_eq!(scalar_names(&request), ["name"]);
        assert_eq!(request.key_criteria.len(), 1);
        assert_eq!(request.key_criteria[0].field_path.to_string(), "identifier");
        assert_eq!(request.context_criteria, None);

        let address = request.object_field("visitAddress").unwrap();
        assert_eq!(scalar_names(address), ["street"]);
        assert_eq!(scalar_names(address.object_field("geometry").unwrap()), ["srid"]);

        let beers = request.collection_field("beers").unwrap();
        assert_eq!(scalar_names(&beers.object_request), ["name"]);
        assert_eq!(beers.sort_criteria[0].field_path.to_string(), "name");
        assert_eq!(beers.paging_criteria, None);
    }

    #[test]
    fn value_fetcher_source_fields_are_added_once() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("brewery", FieldType::named("Brewery"))
                .with_selection(scalar("name"))
                .with_selection(scalar("shortName"))
                .with_selection(scalar("name").with_alias("title")),
        );

        let request = factory.create_object_request(&ctx).unwrap();

        assert_eq!(scalar_names(&request), ["name", "identifier"]);
    }

    #[test]
    fn selections_sharing_a_response_key_are_merged() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("brewery", FieldType::named("Brewery"))
                .with_selection(
                    SelectedField::new("visitAddress", FieldType::named("Address")).with_selection(scalar("street")),
                )
                .with_selection(
                    SelectedField::new("visitAddress", FieldType::named("Address"))
                        .with_selection(scalar("city"))
                        .with_selection(scalar("street")),
                ),
        );

        let request = factory.create_object_request(&ctx).unwrap();

        assert_eq!(request.object_fields().len(), 1);
        assert_eq!(scalar_names(request.object_field("visitAddress").unwrap()), ["street", "city"]);
    }

    #[test]
    fn aliased_object_fields_are_kept_apart() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("brewery", FieldType::named("Brewery"))
                .with_selection(
                    SelectedField::new("visitAddress", FieldType::named("Address")).with_selection(scalar("street")),
                )
                .with_selection(
                    SelectedField::new("visitAddress", FieldType::named("Address"))
                        .with_alias("place")
                        .with_selection(scalar("city")),
                ),
        );

        let request = factory.create_object_request(&ctx).unwrap();

        assert_eq!(request.object_fields().len(), 2);
        assert_eq!(scalar_names(request.object_field("visitAddress").unwrap()), ["street"]);
        assert_eq!(scalar_names(request.object_field("place").unwrap()), ["city"]);
    }

    #[test]
    fn aliased_collections_keep_their_own_filters() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("brewery", FieldType::named("Brewery"))
                .with_argument("identifier", "b1")
                .with_selection(
                    SelectedField::new("beers", FieldType::list_of("Beer"))
                        .with_argument("filter", json!({"name": {"eq": "Pils"}}))
                        .with_selection(scalar("name")),
                )
                .with_selection(
                    SelectedField::new("beers", FieldType::list_of("Beer"))
                        .with_alias("bruin")
                        .with_argument("filter", json!({"name": {"eq": "Bruin"}}))
                        .with_selection(scalar("name")),
                ),
        );

        let request = factory.create_object_request(&ctx).unwrap();

        let filters = request
            .collection_fields()
            .iter()
            .map(|nested| {
                let filter = nested.request.filter_criteria.as_ref().unwrap();
                format!("{}: {filter}", nested.key)
            })
            .collect::<Vec<_>>();
        assert_eq!(filters, [r#"beers: name eq "Pils""#, r#"bruin: name eq "Bruin""#]);
    }

    #[test]
    fn conflicting_selections_under_one_response_key() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("brewery", FieldType::named("Brewery"))
                .with_selection(
                    SelectedField::new("beers", FieldType::list_of("Beer"))
                        .with_argument("filter", json!({"name": {"eq": "Pils"}}))
                        .with_selection(scalar("name")),
                )
                .with_selection(
                    SelectedField::new("beers", FieldType::list_of("Beer"))
                        .with_argument("filter", json!({"name": {"eq": "Bruin"}}))
                        .with_selection(scalar("name")),
                ),
        );

        let err = factory.create_object_request(&ctx).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        insta::assert_snapshot!(err, @"Selections under the response key 'beers' differ in their field or arguments.");
    }

    #[test]
    fn collection_request_for_pageable_query() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("breweries", FieldType::list_of("Brewery"))
                .with_argument("sort", "address")
                .with_argument("filter", json!({"name": {"match": "brouwerij"}}))
                .with_argument("first", 5)
                .with_selection(scalar("name")),
        );

        let request = factory.create_collection_request(&ctx).unwrap();

        assert!(request.object_request.key_criteria.is_empty());
        let sort = request
            .sort_criteria
            .iter()
            .map(|criteria| format!("{} {}", criteria.field_path, criteria.direction))
            .collect::<Vec<_>>();
        assert_eq!(sort, ["visitAddress.city DESC", "name ASC"]);
        assert_eq!(request.filter_criteria.unwrap().to_string(), r#"name match "brouwerij""#);
        assert_eq!(request.paging_criteria, Some(PagingCriteria { first: 5, offset: 0 }));
    }

    #[test]
    fn collection_request_with_context() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("beers", FieldType::list_of("Beer"))
                .with_argument("context", json!({"availableOn": "2024-01-01"}))
                .with_selection(scalar("name")),
        );

        let request = factory.create_collection_request(&ctx).unwrap();

        let context = request.object_request.context_criteria.unwrap();
        assert_eq!(context.name, "history");
        assert_eq!(json!(context.values), json!({"validOn": "NOW", "availableOn": "2024-01-01"}));
        assert_eq!(request.paging_criteria, None);
    }

    #[test]
    fn batch_request() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("breweryBatch", FieldType::list_of("Brewery"))
                .with_argument("identifier", json!(["b1", "b2"]))
                .with_selection(scalar("name")),
        );

        let request = factory.create_batch_request(&ctx).unwrap();

        let values = request.keys.iter().map(|key| key.value.clone()).collect::<Vec<_>>();
        assert_eq!(values, [json!("b1"), json!("b2")]);
        assert!(request.object_request.key_criteria.is_empty());
        assert_eq!(scalar_names(&request.object_request), ["name"]);
    }

    #[test]
    fn batch_size_is_limited() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(
            SelectedField::new("breweryBatch", FieldType::list_of("Brewery"))
                .with_argument("identifier", json!(["b1", "b2", "b3", "b4"]))
                .with_selection(scalar("name")),
        );

        let err = factory.create_batch_request(&ctx).unwrap_err();

        assert_eq!(err, RequestError::TooManyBatchKeys { count: 4, max: 3 });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn batch_request_for_regular_query() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx =
            FieldContext::query(SelectedField::new("brewery", FieldType::named("Brewery")).with_selection(scalar("name")));

        let err = factory.create_batch_request(&ctx).unwrap_err();

        insta::assert_snapshot!(err, @"Query 'brewery' isn't a batch query.");
    }

    #[test]
    fn collection_batch_request() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let beers = schema.object_type("Brewery").unwrap().field("beers").unwrap();
        let parent = json!({"identifier": "b1", "name": "Alfa"}).as_object().unwrap().clone();
        let ctx = FieldContext::nested(
            SelectedField::new("beers", FieldType::list_of("Beer")).with_selection(scalar("name")),
            "Brewery",
            parent.clone(),
        );
        let mut join_criteria = JoinCriteria::new(JoinCondition::new(&beers.join_columns));
        join_criteria.add_parent(&parent);

        let request = factory.create_collection_batch_request(&ctx, join_criteria).unwrap();

        assert_eq!(request.join_criteria.keys, [json!({"brewery": "b1"}).as_object().unwrap().clone()]);
        assert_eq!(scalar_names(&request.collection_request.object_request), ["name"]);
        assert_eq!(request.collection_request.paging_criteria, None);
    }

    #[test]
    fn request_context() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let source = json!({"identifier": "b1", "visitAddress": {"street": "Markt"}})
            .as_object()
            .unwrap()
            .clone();
        let nested = FieldContext::nested(
            SelectedField::new("visitAddress", FieldType::named("Address")).with_selection(scalar("street")),
            "Brewery",
            source,
        );
        let root = FieldContext::query(SelectedField::new("brewery", FieldType::named("Brewery")));

        let nested = factory.create_request_context(&nested);
        assert_eq!(nested.object_field.map(|field| field.name.as_str()), Some("visitAddress"));
        assert_eq!(nested.eager_key, "visitAddress");
        assert_eq!(nested.eager_value(), Some(&json!({"street": "Markt"})));

        let root = factory.create_request_context(&root);
        assert_eq!(root.object_field, None);
        assert_eq!(root.source, None);
    }

    #[test]
    fn request_context_of_aliased_fields() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let source = json!({"name": "Alfa", "place": {"city": "Schinnen"}}).as_object().unwrap().clone();
        let object = FieldContext::nested(
            SelectedField::new("visitAddress", FieldType::named("Address"))
                .with_alias("place")
                .with_selection(scalar("city")),
            "Brewery",
            source.clone(),
        );
        let scalar_field = FieldContext::nested(scalar("name").with_alias("title"), "Brewery", source);

        let object = factory.create_request_context(&object);
        assert_eq!(object.eager_key, "place");
        assert_eq!(object.eager_value(), Some(&json!({"city": "Schinnen"})));

        let scalar_field = factory.create_request_context(&scalar_field);
        assert_eq!(scalar_field.eager_key, "name");
        assert_eq!(scalar_field.eager_value(), Some(&json!("Alfa")));
    }

    #[test]
    fn scalar_result_type() {
        let schema = brewery_schema();
        let factory = factory_for(&schema);
        let ctx = FieldContext::query(SelectedField::new("brewery", FieldType::named("String")));

        let err = factory.create_object_request(&ctx).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IllegalState);
        insta::assert_snapshot!(err, @"Field 'brewery' doesn't resolve to an object type but to 'String'.");
    }
}

mod error;

use indexmap::IndexMap;

use crate::{
    Context, ContextField, Filter, JoinColumn, ObjectField, ObjectType, Query, Schema, Settings, SortableBy,
    Subscription,
    config::{ContextConfig, ObjectTypeConfig, SchemaConfig, SettingsConfig},
    normalize_sortable_name,
};
pub use error::BuildError;

impl TryFrom<SchemaConfig> for Schema {
    type Error = BuildError;

    fn try_from(config: SchemaConfig) -> Result<Self, Self::Error> {
        SchemaBuilder::build_schema(config)
    }
}

/// Turns a configuration into the schema model. Only what prevents building is rejected here, checking
/// that the configuration is meaningful is the job of the validators.
struct SchemaBuilder;

impl SchemaBuilder {
    fn build_schema(config: SchemaConfig) -> Result<Schema, BuildError> {
        let SchemaConfig {
            object_types,
            queries,
            subscriptions,
            contexts,
            settings,
        } = config;

        let object_types = object_types
            .into_iter()
            .map(|(name, object_type)| {
                let object_type = Self::build_object_type(name.clone(), object_type)?;
                Ok((name, object_type))
            })
            .collect::<Result<IndexMap<_, _>, BuildError>>()?;

        let queries = queries
            .into_iter()
            .map(|(name, query)| {
                let query = Query {
                    name: name.clone(),
                    ty: query.ty,
                    keys: query.keys,
                    list: query.list,
                    pageable: query.pageable,
                    batch: query.batch,
                    context: query.context,
                };
                (name, query)
            })
            .collect();

        let subscriptions = subscriptions
            .into_iter()
            .map(|(name, subscription)| {
                let subscription = Subscription {
                    name: name.clone(),
                    ty: subscription.ty,
                };
                (name, subscription)
            })
            .collect();

        let contexts = contexts
            .into_iter()
            .map(|(name, context)| {
                let context = Self::build_context(name.clone(), context);
                (name, context)
            })
            .collect();

        Ok(Schema {
            object_types,
            queries,
            subscriptions,
            contexts,
            settings: settings.into(),
        })
    }

    fn build_object_type(name: String, config: ObjectTypeConfig) -> Result<ObjectType, BuildError> {
        let fields = config
            .fields
            .into_iter()
            .map(|(field_name, field)| {
                let field = ObjectField {
                    name: field_name.clone(),
                    parent: name.clone(),
                    ty: field.ty,
                    list: field.list,
                    nullable: field.nullable,
                    value_fetcher: field.value_fetcher,
                    aggregation_of: field.aggregation_of,
                    join_columns: field
                        .join_columns
                        .into_iter()
                        .map(|column| JoinColumn {
                            name: column.name,
                            referenced_field: column.referenced_field,
                        })
                        .collect(),
                };
                (field_name, field)
            })
            .collect();

        let mut sortable_by = IndexMap::with_capacity(config.sortable_by.len());
        for (sortable_name, definitions) in config.sortable_by {
            let normalized = normalize_sortable_name(&sortable_name);
            let definitions = definitions
                .into_iter()
                .map(|definition| SortableBy {
                    field: definition.field,
                    direction: definition.direction,
                })
                .collect();

            if sortable_by.insert(normalized.clone(), definitions).is_some() {
                return Err(BuildError::DuplicateSortable {
                    object_type: name,
                    name: sortable_name,
                    normalized,
                });
            }
        }

        let filters = config
            .filters
            .into_iter()
            .map(|(filter_name, filter)| {
                let field = filter.field.unwrap_or_else(|| filter_name.clone());
                if field.is_empty() {
                    return Err(BuildError::EmptyFilterField {
                        object_type: name.clone(),
                        name: filter_name,
                    });
                }
                let filter = Filter {
                    name: filter_name.clone(),
                    field,
                    case_sensitive: filter.case_sensitive,
                };
                Ok((filter_name, filter))
            })
            .collect::<Result<_, _>>()?;

        Ok(ObjectType {
            name,
            fields,
            sortable_by,
            filters,
        })
    }

    fn build_context(name: String, config: ContextConfig) -> Context {
        Context {
            name,
            fields: config
                .fields
                .into_iter()
                .map(|(field_name, field)| {
                    let field = ContextField {
                        name: field_name.clone(),
                        ty: field.ty,
                        default: field.default,
                    };
                    (field_name, field)
                })
                .collect(),
        }
    }
}

impl From<SettingsConfig> for Settings {
    fn from(config: SettingsConfig) -> Self {
        Settings {
            proxy: config.proxy,
            max_filter_depth: config.max_filter_depth,
            max_batch_key_size: config.max_batch_key_size,
            default_first: config.default_first,
            max_first: config.max_first,
            max_offset: config.max_offset,
        }
    }
}

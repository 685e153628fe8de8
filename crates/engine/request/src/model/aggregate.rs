use schema::{ObjectField, ObjectType};

use super::FilterCriteria;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum AggregateFunction {
    Count,
    Sum,
    Min,
    Max,
    Avg,
    Join,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum AggregateScalarType {
    Int,
    Float,
    String,
}

/// The aggregate selections available on an aggregate field, named as they are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum AggregateFieldKind {
    Count,
    IntSum,
    IntMin,
    IntMax,
    IntAvg,
    FloatSum,
    FloatMin,
    FloatMax,
    FloatAvg,
    StringJoin,
}

impl AggregateFieldKind {
    pub fn function(self) -> AggregateFunction {
        match self {
            AggregateFieldKind::Count => AggregateFunction::Count,
            AggregateFieldKind::IntSum | AggregateFieldKind::FloatSum => AggregateFunction::Sum,
            AggregateFieldKind::IntMin | AggregateFieldKind::FloatMin => AggregateFunction::Min,
            AggregateFieldKind::IntMax | AggregateFieldKind::FloatMax => AggregateFunction::Max,
            AggregateFieldKind::IntAvg | AggregateFieldKind::FloatAvg => AggregateFunction::Avg,
            AggregateFieldKind::StringJoin => AggregateFunction::Join,
        }
    }

    pub fn scalar_type(self) -> AggregateScalarType {
        match self {
            AggregateFieldKind::Count
            | AggregateFieldKind::IntSum
            | AggregateFieldKind::IntMin
            | AggregateFieldKind::IntMax
            | AggregateFieldKind::IntAvg => AggregateScalarType::Int,
            AggregateFieldKind::FloatSum
            | AggregateFieldKind::FloatMin
            | AggregateFieldKind::FloatMax
            | AggregateFieldKind::FloatAvg => AggregateScalarType::Float,
            AggregateFieldKind::StringJoin => AggregateScalarType::String,
        }
    }
}

pub const DEFAULT_SEPARATOR: &str = ",";

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateField<'s> {
    /// The aggregated field, on the aggregated object type.
    pub field: &'s ObjectField,
    pub function: AggregateFunction,
    pub ty: AggregateScalarType,
    pub distinct: bool,
    /// Key of the result, the alias of the selection or its name.
    pub alias: String,
    /// Only set for string joins.
    pub separator: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateObjectField<'s> {
    /// Response key the backend stores the aggregate result under.
    pub key: String,
    pub field: &'s ObjectField,
    pub object_type: &'s ObjectType,
    pub aggregate_fields: Vec<AggregateField<'s>>,
    pub filter_criteria: Option<FilterCriteria<'s>>,
}

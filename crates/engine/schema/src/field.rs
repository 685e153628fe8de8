#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub name: String,
    /// Name of the object type owning this field.
    pub parent: String,
    /// Target type name, either a scalar or an object type.
    pub ty: String,
    pub list: bool,
    pub nullable: bool,
    pub value_fetcher: Option<String>,
    /// Set on aggregate fields, names the aggregated object type.
    pub aggregation_of: Option<String>,
    pub join_columns: Vec<JoinColumn>,
}

impl ObjectField {
    pub fn is_list(&self) -> bool {
        self.list
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_aggregate(&self) -> bool {
        self.aggregation_of.is_some()
    }

    pub fn has_join_columns(&self) -> bool {
        !self.join_columns.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinColumn {
    pub name: String,
    pub referenced_field: String,
}

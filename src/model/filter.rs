use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    In,
    Gte,
    Lte,
}

/// One predicate of a backend query. The backend ANDs every clause of a
/// payload, in the order given.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "field": "deployment.location.locationCode",
    "operator": "eq",
    "value": "Midhani-Loc1"
}))]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }
}

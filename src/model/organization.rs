use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "locationCode": "Midhani-Loc1",
    "locationName": "Hyderabad Plant"
}))]
pub struct LocationSummary {
    pub location_code: String,
    #[serde(default)]
    pub location_name: Option<String>,
}

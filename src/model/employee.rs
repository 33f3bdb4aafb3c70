use serde::Serialize;
use utoipa::ToSchema;

/// Normalized employee row used by the dashboard tables and exports.
/// Every field is a string; absent values are `""`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "employeeId": "E9",
    "firstName": "Jo",
    "middleName": "",
    "lastName": "Doe",
    "shiftCode": "A1"
}))]
pub struct EmployeeRow {
    pub employee_id: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub shift_code: String,
}

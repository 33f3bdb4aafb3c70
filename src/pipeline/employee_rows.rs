use serde_json::Value;

use crate::model::employee::EmployeeRow;

/// Backend spellings of each row field, tried in order.
pub const EMPLOYEE_ID_ALIASES: &[&str] =
    &["employeeId", "employee_id", "id", "empId", "emp_id", "employeeID"];
pub const FIRST_NAME_ALIASES: &[&str] = &["firstName", "first_name", "fname", "firstname"];
pub const MIDDLE_NAME_ALIASES: &[&str] = &["middleName", "middle_name", "mname", "middlename"];
pub const LAST_NAME_ALIASES: &[&str] = &["lastName", "last_name", "lname", "lastname"];
pub const SHIFT_CODE_ALIASES: &[&str] = &["shiftCode", "shift_code", "shift", "shiftcode"];

/// Maps one raw backend employee onto a table row. Total: unknown shapes
/// and missing fields become empty strings.
pub fn project(raw: &Value) -> EmployeeRow {
    EmployeeRow {
        employee_id: first_present(raw, EMPLOYEE_ID_ALIASES),
        first_name: first_present(raw, FIRST_NAME_ALIASES),
        middle_name: first_present(raw, MIDDLE_NAME_ALIASES),
        last_name: first_present(raw, LAST_NAME_ALIASES),
        shift_code: first_present(raw, SHIFT_CODE_ALIASES),
    }
}

/// Projects every element of a search body; a non-array body has no rows.
pub fn project_all(body: &Value) -> Vec<EmployeeRow> {
    body.as_array()
        .map(|items| items.iter().map(project).collect())
        .unwrap_or_default()
}

fn first_present(raw: &Value, aliases: &[&str]) -> String {
    let Some(obj) = raw.as_object() else {
        return String::new();
    };
    aliases
        .iter()
        .filter_map(|alias| obj.get(*alias))
        .find_map(as_text)
        .unwrap_or_default()
}

// Only non-empty strings and non-zero numbers count as a value.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

// src/pipeline/projection_tests.rs

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::model::aggregation::ChartPoint;
    use crate::model::attendance::AttendancePredicate;
    use crate::model::employee::EmployeeRow;
    use crate::pipeline::aggregator::{aggregate, RecordSet};
    use crate::pipeline::{chart_series, employee_rows};

    fn row(id: &str, first: &str, middle: &str, last: &str, shift: &str) -> EmployeeRow {
        EmployeeRow {
            employee_id: id.to_string(),
            first_name: first.to_string(),
            middle_name: middle.to_string(),
            last_name: last.to_string(),
            shift_code: shift.to_string(),
        }
    }

    #[test]
    fn test_chart_has_one_point_per_shift_in_order() {
        let set = RecordSet::from_json(&json!([
            {"present": true, "shiftCode": "B2", "gender": "Female"},
            {"present": true, "shiftCode": "A1", "gender": "Male"},
            {"present": true, "shiftCode": "B2", "gender": "Male"},
            {"present": true, "shiftCode": "C3", "gender": "Unknown"}
        ]));
        let bucket = aggregate(&set.records, AttendancePredicate::Present);

        let series = chart_series::project(&bucket);

        assert_eq!(series.len(), bucket.by_shift_gender.len());
        assert_eq!(
            series,
            vec![
                ChartPoint { label: "B2".into(), m: 1, f: 1 },
                ChartPoint { label: "A1".into(), m: 1, f: 0 },
                ChartPoint { label: "C3".into(), m: 0, f: 0 },
            ]
        );
    }

    #[test]
    fn test_chart_of_empty_bucket_is_empty() {
        let bucket = aggregate(&[], AttendancePredicate::Absent);
        assert!(chart_series::project(&bucket).is_empty());
    }

    #[test]
    fn test_empty_object_projects_to_empty_row() {
        assert_eq!(employee_rows::project(&json!({})), EmployeeRow::default());
        assert_eq!(
            serde_json::to_value(employee_rows::project(&json!({}))).unwrap(),
            json!({
                "employeeId": "",
                "firstName": "",
                "middleName": "",
                "lastName": "",
                "shiftCode": ""
            })
        );
    }

    #[test]
    fn test_snake_case_and_short_aliases() {
        let projected =
            employee_rows::project(&json!({"employee_id": "E9", "fname": "Jo", "lname": "Doe"}));
        assert_eq!(projected, row("E9", "Jo", "", "Doe", ""));
    }

    #[test]
    fn test_first_truthy_alias_wins() {
        let projected = employee_rows::project(&json!({
            "employeeId": "",
            "employee_id": null,
            "id": 0,
            "empId": "X-7",
            "emp_id": "ignored",
            "firstName": "Ana",
            "firstname": "ignored",
            "middle_name": "Maria",
            "lastname": "Silva",
            "shift": "N1"
        }));

        assert_eq!(projected, row("X-7", "Ana", "Maria", "Silva", "N1"));
    }

    #[test]
    fn test_numeric_ids_become_text() {
        let projected = employee_rows::project(&json!({"id": 1042, "shiftcode": 7}));
        assert_eq!(projected.employee_id, "1042");
        assert_eq!(projected.shift_code, "7");
    }

    #[test]
    fn test_non_object_and_odd_values_never_panic() {
        assert_eq!(employee_rows::project(&json!(null)), EmployeeRow::default());
        assert_eq!(employee_rows::project(&json!("E1")), EmployeeRow::default());

        let projected = employee_rows::project(&json!({
            "employeeId": {"nested": true},
            "firstName": ["Jo"],
            "lastName": false
        }));
        assert_eq!(projected, EmployeeRow::default());
    }

    #[test]
    fn test_project_all_handles_non_array() {
        assert!(employee_rows::project_all(&json!({"data": []})).is_empty());

        let rows = employee_rows::project_all(&json!([
            {"employeeId": "E1", "firstName": "A"},
            {"emp_id": "E2", "first_name": "B"}
        ]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].employee_id, "E2");
    }
}

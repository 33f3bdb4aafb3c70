// src/pipeline/filter_payload_tests.rs

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::model::attendance::AttendancePredicate;
    use crate::model::filter::{FilterClause, FilterOperator};
    use crate::model::hierarchy::{HierarchyLevel, HierarchySelector, SelectorError};
    use crate::pipeline::filter_payload::FilterPayloadBuilder;
    use crate::upstream::context::{QueryContext, StaticTokenProvider};

    fn test_context() -> QueryContext {
        QueryContext::new(
            "MIDHANI",
            Arc::new(StaticTokenProvider::new("upstream-token")),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        )
    }

    fn department_selector() -> HierarchySelector {
        HierarchySelector::new("Dept3", HierarchyLevel::Department).with_parents(
            Some("Loc1"),
            Some("Sub1"),
            Some("Div2"),
        )
    }

    #[test]
    fn test_location_selector_without_parent_uses_membership() {
        let context = test_context();
        let builder = FilterPayloadBuilder::new(&context);
        let selector = HierarchySelector::new("Midhani-Loc1", HierarchyLevel::Location);

        let clauses = builder.build(&selector, &[]);

        assert_eq!(
            clauses,
            vec![
                FilterClause::eq("organizationCode", "MIDHANI"),
                FilterClause::new(
                    "deployment.location.locationCode",
                    FilterOperator::In,
                    "Midhani-Loc1"
                ),
            ]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let context = test_context();
        let builder = FilterPayloadBuilder::new(&context);
        let selector = department_selector();

        let first = serde_json::to_vec(&builder.attendance_search(&selector)).unwrap();
        let second = serde_json::to_vec(&builder.attendance_search(&selector)).unwrap();

        assert_eq!(first, second, "Same selector must give identical payload bytes");
    }

    #[test]
    fn test_department_with_all_parents_has_five_hierarchy_clauses() {
        let context = test_context();
        let builder = FilterPayloadBuilder::new(&context);
        let extra = AttendancePredicate::LateIn.clause();

        let clauses = builder.build(&department_selector(), std::slice::from_ref(&extra));

        assert_eq!(clauses.len(), 6);
        let fields: Vec<&str> = clauses.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "organizationCode",
                "deployment.location.locationCode",
                "deployment.subsidiary.subsidiaryCode",
                "deployment.division.divisionCode",
                "deployment.department.departmentCode",
                "lateIn",
            ]
        );
        assert_eq!(clauses[1].operator, FilterOperator::Eq);
        assert_eq!(clauses[1].value, "Loc1");
        assert_eq!(clauses[4].value, "Dept3");
        assert_eq!(clauses[5], extra);
    }

    #[test]
    fn test_missing_parents_are_omitted() {
        let context = test_context();
        let builder = FilterPayloadBuilder::new(&context);
        let selector = HierarchySelector::new("Div2", HierarchyLevel::Division).with_parents(
            Some("Loc1"),
            Some(""),
            None,
        );

        let clauses = builder.build(&selector, &[]);

        assert_eq!(
            clauses,
            vec![
                FilterClause::eq("organizationCode", "MIDHANI"),
                FilterClause::eq("deployment.location.locationCode", "Loc1"),
                FilterClause::eq("deployment.division.divisionCode", "Div2"),
            ]
        );
    }

    #[test]
    fn test_subsidiary_parent_ignored_for_subsidiary_level() {
        let context = test_context();
        let builder = FilterPayloadBuilder::new(&context);
        let selector = HierarchySelector::new("Sub1", HierarchyLevel::Subsidiary).with_parents(
            Some("Loc1"),
            Some("SubX"),
            Some("DivX"),
        );

        let clauses = builder.build(&selector, &[]);

        assert_eq!(clauses.len(), 3);
        assert_eq!(
            clauses[2],
            FilterClause::eq("deployment.subsidiary.subsidiaryCode", "Sub1")
        );
    }

    #[test]
    fn test_attendance_search_appends_reference_date() {
        let context = test_context();
        let builder = FilterPayloadBuilder::new(&context);
        let selector = HierarchySelector::new("Loc1", HierarchyLevel::Location);

        let clauses = builder.attendance_search(&selector);

        assert_eq!(
            clauses.last(),
            Some(&FilterClause::eq("attendanceDate", "2025-03-14"))
        );
    }

    #[test]
    fn test_clause_wire_shape() {
        let clause = FilterClause::new("deployment.location.locationCode", FilterOperator::In, "L1");
        let json = serde_json::to_value(&clause).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "field": "deployment.location.locationCode",
                "operator": "in",
                "value": "L1"
            })
        );
    }

    #[test]
    fn test_selector_validation() {
        let ok = department_selector();
        assert_eq!(ok.validate(), Ok(()));

        let orphan = HierarchySelector::new("Dept3", HierarchyLevel::Department);
        assert_eq!(orphan.validate(), Err(SelectorError::MissingParentLocation));

        let blank = HierarchySelector::new("  ", HierarchyLevel::Location);
        assert_eq!(blank.validate(), Err(SelectorError::EmptyName));

        // Division without a subsidiary parent is tolerated.
        let division = HierarchySelector::new("Div2", HierarchyLevel::Division);
        assert_eq!(division.validate(), Ok(()));
    }

    #[test]
    fn test_selector_deserializes_from_camel_case() {
        let selector: HierarchySelector = serde_json::from_value(serde_json::json!({
            "name": "Dept3",
            "level": "department",
            "parentLocation": "Loc1",
            "parentSubsidiary": "Sub1",
            "parentDivision": "Div2"
        }))
        .unwrap();

        assert_eq!(selector, department_selector());
        assert_eq!(selector.identity(), "department:Loc1/Sub1/Div2/Dept3");
    }
}

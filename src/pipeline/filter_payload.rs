use crate::model::filter::{FilterClause, FilterOperator};
use crate::model::hierarchy::{HierarchyLevel, HierarchySelector};
use crate::upstream::context::QueryContext;

/// Builds backend query bodies for an organizational scope.
///
/// Clause order is fixed: tenant, location, [subsidiary], [division],
/// [current level], extras. The same selector always yields the same
/// payload bytes, which the response cache relies on.
pub struct FilterPayloadBuilder<'a> {
    context: &'a QueryContext,
}

impl<'a> FilterPayloadBuilder<'a> {
    pub fn new(context: &'a QueryContext) -> Self {
        Self { context }
    }

    pub fn build(
        &self,
        selector: &HierarchySelector,
        extra_clauses: &[FilterClause],
    ) -> Vec<FilterClause> {
        let mut clauses = Vec::with_capacity(5 + extra_clauses.len());

        clauses.push(FilterClause::eq(
            "organizationCode",
            self.context.tenant_code.as_str(),
        ));

        // Without a known parent the current name is taken as the location.
        let location_field = HierarchyLevel::Location.code_field();
        match selector.parent_location() {
            Some(location) => clauses.push(FilterClause::eq(location_field, location)),
            None => clauses.push(FilterClause::new(
                location_field,
                FilterOperator::In,
                selector.name.as_str(),
            )),
        }

        if matches!(
            selector.level,
            HierarchyLevel::Division | HierarchyLevel::Department
        ) {
            if let Some(subsidiary) = selector.parent_subsidiary() {
                clauses.push(FilterClause::eq(
                    HierarchyLevel::Subsidiary.code_field(),
                    subsidiary,
                ));
            }
        }

        if selector.level == HierarchyLevel::Department {
            if let Some(division) = selector.parent_division() {
                clauses.push(FilterClause::eq(
                    HierarchyLevel::Division.code_field(),
                    division,
                ));
            }
        }

        if selector.level != HierarchyLevel::Location {
            clauses.push(FilterClause::eq(
                selector.level.code_field(),
                selector.name.as_str(),
            ));
        }

        clauses.extend_from_slice(extra_clauses);
        clauses
    }

    /// Attendance search for the reference day.
    pub fn attendance_search(&self, selector: &HierarchySelector) -> Vec<FilterClause> {
        self.build(selector, &[self.context.attendance_date_clause()])
    }

    /// Headcount of the scope, independent of the attendance date.
    pub fn headcount(&self, selector: &HierarchySelector) -> Vec<FilterClause> {
        self.build(selector, &[])
    }
}

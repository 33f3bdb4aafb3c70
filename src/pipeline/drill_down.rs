use crate::model::aggregation::DrillDownRow;
use crate::model::attendance::{AttendancePredicate, AttendanceRecord};
use crate::model::hierarchy::HierarchyLevel;

/// Counters per child unit of a scope at `level`, in first-seen order.
/// A department has no children and yields nothing.
pub fn drill_down(records: &[AttendanceRecord], level: HierarchyLevel) -> Vec<DrillDownRow> {
    let Some(child) = level.child() else {
        return Vec::new();
    };

    let mut rows: Vec<DrillDownRow> = Vec::new();
    for record in records {
        let unit = record.deployment.unit(child);
        let row = match rows.iter().position(|r| r.code == unit.code) {
            Some(idx) => &mut rows[idx],
            None => {
                rows.push(DrillDownRow {
                    code: unit.code.clone(),
                    ..Default::default()
                });
                let last = rows.len() - 1;
                &mut rows[last]
            }
        };

        if row.name.is_empty() && !unit.name.is_empty() {
            row.name = unit.name.clone();
        }

        row.total += 1;
        for predicate in AttendancePredicate::ALL {
            if predicate.matches(record) {
                *counter(row, predicate) += 1;
            }
        }
    }
    rows
}

fn counter(row: &mut DrillDownRow, predicate: AttendancePredicate) -> &mut u64 {
    match predicate {
        AttendancePredicate::Present => &mut row.present,
        AttendancePredicate::Absent => &mut row.absent,
        AttendancePredicate::LateIn => &mut row.late_in,
        AttendancePredicate::EarlyOut => &mut row.early_out,
    }
}

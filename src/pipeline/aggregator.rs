use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::model::aggregation::{AggregationBucket, AggregationWarning};
use crate::model::attendance::{AttendancePredicate, AttendanceRecord, Gender};

/// Attendance records read from one upstream body, plus whatever had to be
/// skipped to read them.
#[derive(Debug, Default)]
pub struct RecordSet {
    pub records: Vec<AttendanceRecord>,
    pub warnings: Vec<AggregationWarning>,
}

impl RecordSet {
    /// Never fails: a non-array body reads as an empty set and elements that
    /// are not record objects are skipped, each case leaving a warning.
    pub fn from_json(body: &Value) -> Self {
        let Some(items) = body.as_array() else {
            warn!(kind = json_kind(body), "Attendance body is not an array, treating as empty");
            return Self {
                records: Vec::new(),
                warnings: vec![AggregationWarning::NotAnArray],
            };
        };

        let mut records = Vec::with_capacity(items.len());
        let mut skipped = 0usize;
        for item in items {
            if !item.is_object() {
                skipped += 1;
                continue;
            }
            match AttendanceRecord::deserialize(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable attendance record");
                    skipped += 1;
                }
            }
        }

        let mut warnings = Vec::new();
        if skipped > 0 {
            warn!(skipped, total = items.len(), "Attendance body contained unreadable elements");
            warnings.push(AggregationWarning::SkippedElements(skipped));
        }
        Self { records, warnings }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Applies one predicate to a record snapshot.
///
/// Flags are independent: a record can land in several buckets. Shift codes
/// appear in first-seen order among the matching records; genders other
/// than "Male"/"Female" are counted in `total` and `other` only.
pub fn aggregate(records: &[AttendanceRecord], predicate: AttendancePredicate) -> AggregationBucket {
    let mut bucket = AggregationBucket::default();

    for record in records.iter().filter(|r| predicate.matches(r)) {
        bucket.total += 1;
        let counts = bucket.by_shift_gender.entry_mut(&record.shift_code);
        match Gender::parse(&record.gender) {
            Gender::Male => counts.male += 1,
            Gender::Female => counts.female += 1,
            Gender::Other => counts.other += 1,
        }
    }

    bucket
}

/// Aggregates a raw upstream body.
pub fn aggregate_value(
    body: &Value,
    predicate: AttendancePredicate,
) -> (AggregationBucket, Vec<AggregationWarning>) {
    let set = RecordSet::from_json(body);
    (aggregate(&set.records, predicate), set.warnings)
}

/// All four buckets over one snapshot, as shown on the metric cards.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: AggregationBucket,
    pub absent: AggregationBucket,
    pub late_in: AggregationBucket,
    pub early_out: AggregationBucket,
}

pub fn summarize(records: &[AttendanceRecord]) -> AttendanceSummary {
    AttendanceSummary {
        present: aggregate(records, AttendancePredicate::Present),
        absent: aggregate(records, AttendancePredicate::Absent),
        late_in: aggregate(records, AttendancePredicate::LateIn),
        early_out: aggregate(records, AttendancePredicate::EarlyOut),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

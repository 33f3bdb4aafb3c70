use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, ToSchema)]
pub struct GenderCounts {
    pub male: u64,
    pub female: u64,
    /// Members whose gender is neither "Male" nor "Female". They are part of
    /// the bucket total but of neither gender series.
    pub other: u64,
}

/// Shift code → gender counts, kept in first-seen order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ShiftGenderMap {
    entries: Vec<(String, GenderCounts)>,
}

impl ShiftGenderMap {
    pub fn entry_mut(&mut self, shift_code: &str) -> &mut GenderCounts {
        let idx = match self.entries.iter().position(|(code, _)| code == shift_code) {
            Some(idx) => idx,
            None => {
                self.entries
                    .push((shift_code.to_string(), GenderCounts::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    #[cfg(test)]
    pub fn get(&self, shift_code: &str) -> Option<&GenderCounts> {
        self.entries
            .iter()
            .find(|(code, _)| code == shift_code)
            .map(|(_, counts)| counts)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GenderCounts)> {
        self.entries.iter().map(|(code, counts)| (code.as_str(), counts))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ShiftGenderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, counts) in &self.entries {
            map.serialize_entry(code, counts)?;
        }
        map.end()
    }
}

/// Result of applying one attendance predicate to a record set.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "total": 2,
    "byShiftGender": { "A1": { "male": 1, "female": 1, "other": 0 } }
}))]
pub struct AggregationBucket {
    pub total: u64,
    #[schema(value_type = Object)]
    pub by_shift_gender: ShiftGenderMap,
}

/// One bar of a stacked shift chart.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, ToSchema)]
pub struct ChartPoint {
    pub label: String,
    pub m: u64,
    pub f: u64,
}

/// Counters for one child unit of the selected scope.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownRow {
    pub code: String,
    pub name: String,
    pub total: u64,
    pub present: u64,
    pub absent: u64,
    pub late_in: u64,
    pub early_out: u64,
}

/// Problems found in an upstream body that were recovered from locally.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum AggregationWarning {
    /// The body was not a JSON array; it was treated as empty.
    NotAnArray,
    /// Array elements that could not be read as records.
    SkippedElements(usize),
}

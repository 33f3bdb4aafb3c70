use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};
use utoipa::ToSchema;

use crate::model::filter::FilterClause;
use crate::model::hierarchy::HierarchyLevel;

/// One boolean attendance flag of a record.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AttendancePredicate {
    Present,
    Absent,
    LateIn,
    EarlyOut,
}

impl AttendancePredicate {
    pub const ALL: [AttendancePredicate; 4] = [
        AttendancePredicate::Present,
        AttendancePredicate::Absent,
        AttendancePredicate::LateIn,
        AttendancePredicate::EarlyOut,
    ];

    pub fn matches(self, record: &AttendanceRecord) -> bool {
        match self {
            AttendancePredicate::Present => record.present,
            AttendancePredicate::Absent => record.absent,
            AttendancePredicate::LateIn => record.late_in,
            AttendancePredicate::EarlyOut => record.early_out,
        }
    }

    /// Backend clause selecting only records with this flag set.
    pub fn clause(self) -> FilterClause {
        let field: &'static str = self.into();
        FilterClause::eq(field, "true")
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Exact, case-sensitive match on the backend's spelling.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// `{code, name}` of one deployment level; the backend prefixes both keys
/// with the level name (`locationCode`, `divisionName`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrgUnit {
    #[serde(
        alias = "locationCode",
        alias = "subsidiaryCode",
        alias = "divisionCode",
        alias = "departmentCode",
        deserialize_with = "lenient_string"
    )]
    pub code: String,
    #[serde(
        alias = "locationName",
        alias = "subsidiaryName",
        alias = "divisionName",
        alias = "departmentName",
        deserialize_with = "lenient_string"
    )]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Deployment {
    #[serde(deserialize_with = "lenient_nested")]
    pub location: OrgUnit,
    #[serde(deserialize_with = "lenient_nested")]
    pub subsidiary: OrgUnit,
    #[serde(deserialize_with = "lenient_nested")]
    pub division: OrgUnit,
    #[serde(deserialize_with = "lenient_nested")]
    pub department: OrgUnit,
}

impl Deployment {
    pub fn unit(&self, level: HierarchyLevel) -> &OrgUnit {
        match level {
            HierarchyLevel::Location => &self.location,
            HierarchyLevel::Subsidiary => &self.subsidiary,
            HierarchyLevel::Division => &self.division,
            HierarchyLevel::Department => &self.department,
        }
    }
}

/// One employee-day row as returned by the attendance search endpoint.
///
/// Flags count only when the backend sent a literal `true`; a missing or
/// null shift code reads as `""`. Any JSON object decodes: a deployment of
/// the wrong shape reads as empty units rather than failing the record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceRecord {
    #[serde(deserialize_with = "strictly_true")]
    pub present: bool,
    #[serde(deserialize_with = "strictly_true")]
    pub absent: bool,
    #[serde(deserialize_with = "strictly_true")]
    pub late_in: bool,
    #[serde(deserialize_with = "strictly_true")]
    pub early_out: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub shift_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_nested")]
    pub deployment: Deployment,
}

fn strictly_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)? == Value::Bool(true))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_nested<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;
use utoipa::ToSchema;

/// Nested organizational scopes, outermost first.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HierarchyLevel {
    Location,
    Subsidiary,
    Division,
    Department,
}

impl HierarchyLevel {
    /// Next level down, `None` for a department.
    pub fn child(self) -> Option<Self> {
        match self {
            HierarchyLevel::Location => Some(HierarchyLevel::Subsidiary),
            HierarchyLevel::Subsidiary => Some(HierarchyLevel::Division),
            HierarchyLevel::Division => Some(HierarchyLevel::Department),
            HierarchyLevel::Department => None,
        }
    }

    /// Dotted path of this level's code inside an attendance record.
    pub fn code_field(self) -> &'static str {
        match self {
            HierarchyLevel::Location => "deployment.location.locationCode",
            HierarchyLevel::Subsidiary => "deployment.subsidiary.subsidiaryCode",
            HierarchyLevel::Division => "deployment.division.divisionCode",
            HierarchyLevel::Department => "deployment.department.departmentCode",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("selector name must not be empty")]
    EmptyName,
    #[error("a department selector requires parentLocation")]
    MissingParentLocation,
}

/// One organizational scope picked in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Midhani-Dept3",
    "level": "department",
    "parentLocation": "Midhani-Loc1",
    "parentSubsidiary": "Midhani-Sub1",
    "parentDivision": "Midhani-Div2"
}))]
pub struct HierarchySelector {
    /// Code at the current level
    pub name: String,
    pub level: HierarchyLevel,
    #[serde(default)]
    pub parent_location: Option<String>,
    #[serde(default)]
    pub parent_subsidiary: Option<String>,
    #[serde(default)]
    pub parent_division: Option<String>,
}

impl HierarchySelector {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, level: HierarchyLevel) -> Self {
        Self {
            name: name.into(),
            level,
            parent_location: None,
            parent_subsidiary: None,
            parent_division: None,
        }
    }

    #[cfg(test)]
    pub fn with_parents(
        mut self,
        location: Option<&str>,
        subsidiary: Option<&str>,
        division: Option<&str>,
    ) -> Self {
        self.parent_location = location.map(str::to_string);
        self.parent_subsidiary = subsidiary.map(str::to_string);
        self.parent_division = division.map(str::to_string);
        self
    }

    pub fn parent_location(&self) -> Option<&str> {
        non_empty(&self.parent_location)
    }

    pub fn parent_subsidiary(&self) -> Option<&str> {
        non_empty(&self.parent_subsidiary)
    }

    pub fn parent_division(&self) -> Option<&str> {
        non_empty(&self.parent_division)
    }

    /// Checks the invariants a request has to satisfy before it is turned
    /// into a query. Missing subsidiary/division parents are tolerated.
    pub fn validate(&self) -> Result<(), SelectorError> {
        if self.name.trim().is_empty() {
            return Err(SelectorError::EmptyName);
        }
        if self.level == HierarchyLevel::Department && self.parent_location().is_none() {
            return Err(SelectorError::MissingParentLocation);
        }
        Ok(())
    }

    /// Stable identity used to key caches and in-flight requests.
    pub fn identity(&self) -> String {
        format!(
            "{}:{}/{}/{}/{}",
            self.level,
            self.parent_location().unwrap_or_default(),
            self.parent_subsidiary().unwrap_or_default(),
            self.parent_division().unwrap_or_default(),
            self.name
        )
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

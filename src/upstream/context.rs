use std::sync::Arc;

use chrono::NaiveDate;

use crate::model::filter::FilterClause;

/// Supplies the bearer token sent to the attendance backend.
pub trait AuthProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// A token fixed at startup.
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }
}

impl AuthProvider for StaticTokenProvider {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Deployment-wide inputs of every attendance query.
#[derive(Clone)]
pub struct QueryContext {
    pub tenant_code: String,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub reference_date: NaiveDate,
}

impl QueryContext {
    pub fn new(
        tenant_code: impl Into<String>,
        auth_provider: Arc<dyn AuthProvider>,
        reference_date: NaiveDate,
    ) -> Self {
        Self {
            tenant_code: tenant_code.into(),
            auth_provider,
            reference_date,
        }
    }

    /// Restricts a search to the reference day.
    pub fn attendance_date_clause(&self) -> FilterClause {
        FilterClause::eq(
            "attendanceDate",
            self.reference_date.format("%Y-%m-%d").to_string(),
        )
    }
}

impl std::fmt::Debug for QueryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryContext")
            .field("tenant_code", &self.tenant_code)
            .field("reference_date", &self.reference_date)
            .finish_non_exhaustive()
    }
}

// src/upstream/client.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, instrument};

use crate::model::filter::FilterClause;
use crate::model::organization::LocationSummary;
use crate::upstream::context::AuthProvider;
use crate::upstream::error::UpstreamError;

pub const ATTENDANCE_SEARCH_PATH: &str = "attendance/search";
pub const EMPLOYEE_COUNT_PATH: &str = "employee/count";
pub const GRAPHQL_PATH: &str = "graphql";

const ORGANIZATION_QUERY: &str = r#"
query GetOrganizationByCode($organizationCode: String!) {
  getOrganizationByCode(organizationCode: $organizationCode) {
    organizationCode
    locations {
      locationCode
      locationName
    }
  }
}
"#;

/// The slice of the attendance/organization backend the dashboard reads.
#[async_trait]
pub trait AttendanceBackend: Send + Sync {
    /// Attendance rows matching every clause; the body is returned as is.
    async fn search(&self, payload: &[FilterClause]) -> Result<Value, UpstreamError>;

    /// Number of employees matching every clause.
    async fn count(&self, payload: &[FilterClause]) -> Result<u64, UpstreamError>;

    async fn locations(&self, organization_code: &str)
    -> Result<Vec<LocationSummary>, UpstreamError>;
}

// --- GraphQL envelope ---

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorItem {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationData {
    get_organization_by_code: Option<Organization>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    #[serde(default)]
    locations: Vec<LocationSummary>,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// HTTP client for the external attendance backend.
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    auth: Arc<dyn AuthProvider>,
}

impl UpstreamClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        auth: Arc<dyn AuthProvider>,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, UpstreamError> {
        let url = self.url(path);
        let mut request = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(token) = self.auth.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, url = %url, "Upstream request failed");
            UpstreamError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), url = %url, "Upstream returned an error status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<Value>().await?;
        debug!(url = %url, "Upstream response received");
        Ok(body)
    }
}

#[async_trait]
impl AttendanceBackend for UpstreamClient {
    #[instrument(name = "upstream_search", skip(self, payload), fields(clauses = payload.len()))]
    async fn search(&self, payload: &[FilterClause]) -> Result<Value, UpstreamError> {
        self.post_json(ATTENDANCE_SEARCH_PATH, payload).await
    }

    #[instrument(name = "upstream_count", skip(self, payload), fields(clauses = payload.len()))]
    async fn count(&self, payload: &[FilterClause]) -> Result<u64, UpstreamError> {
        let body = self.post_json(EMPLOYEE_COUNT_PATH, payload).await?;
        parse_count(&body)
    }

    #[instrument(name = "upstream_locations", skip(self))]
    async fn locations(
        &self,
        organization_code: &str,
    ) -> Result<Vec<LocationSummary>, UpstreamError> {
        let request = GraphQlRequest {
            query: ORGANIZATION_QUERY,
            variables: json!({ "organizationCode": organization_code }),
        };
        let body = self.post_json(GRAPHQL_PATH, &request).await?;
        parse_locations(body)
    }
}

/// The count endpoint answers with a bare number, sometimes quoted.
pub fn parse_count(body: &Value) -> Result<u64, UpstreamError> {
    match body {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .ok_or_else(|| UpstreamError::UnexpectedShape(format!("count {n} is not a whole number"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| UpstreamError::UnexpectedShape(format!("count {s:?} is not a number"))),
        other => Err(UpstreamError::UnexpectedShape(format!(
            "expected a count, got {other}"
        ))),
    }
}

pub fn parse_locations(body: Value) -> Result<Vec<LocationSummary>, UpstreamError> {
    let response: GraphQlResponse<OrganizationData> = serde_json::from_value(body)
        .map_err(|e| UpstreamError::UnexpectedShape(e.to_string()))?;

    if !response.errors.is_empty() {
        let message = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(UpstreamError::GraphQl(message));
    }

    Ok(response
        .data
        .and_then(|d| d.get_organization_by_code)
        .map(|org| org.locations)
        .unwrap_or_default())
}

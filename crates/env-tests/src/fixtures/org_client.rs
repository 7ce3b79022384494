//! Organization API client fixture.
//!
//! Covers the bulk-create endpoint and the per-organization fetch used to
//! verify parent/child relationships. These requests are not retried; only
//! the health probes carry a retry schedule.

use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{time, truncate_error_body};

/// Organization client errors.
#[derive(Debug, Error)]
pub enum OrgClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One element of the `POST /organizations/bulk` request body.
///
/// `id` is always serialized (the service honors requested ids); `parentId`
/// is omitted for root organizations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl CreateOrganizationRequest {
    /// An organization with no parent.
    pub fn root(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            parent_id: None,
        }
    }

    /// An organization nested under `parent_id`.
    pub fn child(id: i64, name: impl Into<String>, parent_id: i64) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            parent_id: Some(parent_id),
        }
    }
}

/// Response from `POST /organizations/bulk`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub org_ids: Vec<i64>,
}

/// An organization as returned by `GET /organizations/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default, deserialize_with = "time::deserialize_opt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "time::deserialize_opt")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Client for the organization endpoints.
pub struct OrgClient {
    base_url: String,
    http_client: Client,
}

impl OrgClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create several organizations in one call.
    ///
    /// # Endpoint
    ///
    /// `POST /organizations/bulk` - both 200 and 201 count as success.
    pub async fn bulk_create(
        &self,
        organizations: &[CreateOrganizationRequest],
    ) -> Result<BulkCreateResponse, OrgClientError> {
        let url = format!("{}/organizations/bulk", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(organizations)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(OrgClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch a single organization.
    ///
    /// # Endpoint
    ///
    /// `GET /organizations/{id}` - only 200 counts as success.
    pub async fn get_organization(&self, org_id: i64) -> Result<Organization, OrgClientError> {
        let url = format!("{}/organizations/{}", self.base_url, org_id);

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(OrgClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

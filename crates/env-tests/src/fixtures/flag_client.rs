//! Feature-flag API client fixture.
//!
//! Covers flag reads, flag writes, and the background-job tracking endpoints.
//! A write against an organization with children returns HTTP 202 and a job
//! id; the job is polled via [`FlagClient::job_status`] together with the
//! helpers in [`crate::eventual`].

use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::{time, truncate_error_body};

/// Feature-flag client errors.
#[derive(Debug, Error)]
pub enum FlagClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A flag value for one organization, from `GET /{orgId}/{flagName}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub enabled: bool,
    pub organization_id: i64,
}

/// Response from `POST /{orgId}/{flagName}/{enabled}`.
///
/// `processed_immediately` is true for leaf organizations; organizations with
/// children get a background job instead, identified by `job_id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFlagResponse {
    pub message: String,
    pub processed_immediately: bool,
    #[serde(default)]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub feature_flag: Option<FeatureFlag>,
}

/// Background job states as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Retrying,
}

/// A background flag-propagation job, from `GET /job-status/{jobId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlagJob {
    pub id: i64,
    pub organization_id: i64,
    pub feature_flag_name: String,
    pub enabled: bool,
    pub status: JobStatus,
    #[serde(default)]
    pub total_organizations: Option<i32>,
    #[serde(default)]
    pub processed_organizations: Option<i32>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub retry_count: Option<i32>,
    #[serde(default)]
    pub max_retries: Option<i32>,
    #[serde(default)]
    pub parent_job_id: Option<i64>,
    #[serde(default, deserialize_with = "time::deserialize_opt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "time::deserialize_opt")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "time::deserialize_opt")]
    pub completed_at: Option<NaiveDateTime>,
}

impl FeatureFlagJob {
    /// Whether the job has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Client for the feature-flag endpoints.
pub struct FlagClient {
    base_url: String,
    http_client: Client,
}

impl FlagClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read a flag value for an organization.
    ///
    /// # Endpoint
    ///
    /// `GET /{orgId}/{flagName}`
    pub async fn get_flag(
        &self,
        org_id: i64,
        flag_name: &str,
    ) -> Result<FeatureFlag, FlagClientError> {
        let response = self.raw_get_flag(org_id, flag_name).await?;
        self.handle_response(response, &[StatusCode::OK]).await
    }

    /// Read a flag and return the raw response, for asserting on error
    /// statuses such as the 404 for an unregistered flag name.
    pub async fn raw_get_flag(
        &self,
        org_id: i64,
        flag_name: &str,
    ) -> Result<reqwest::Response, FlagClientError> {
        let url = format!("{}/{}/{}", self.base_url, org_id, flag_name);
        Ok(self.http_client.get(&url).send().await?)
    }

    /// Set a flag for an organization.
    ///
    /// The service decides the processing strategy: 200 with an immediate
    /// result for leaf organizations, 202 with a job id when the hierarchy
    /// below the organization must be updated in the background.
    ///
    /// # Endpoint
    ///
    /// `POST /{orgId}/{flagName}/{enabled}?description=`
    pub async fn set_flag(
        &self,
        org_id: i64,
        flag_name: &str,
        enabled: bool,
        description: Option<&str>,
    ) -> Result<SetFlagResponse, FlagClientError> {
        let url = format!("{}/{}/{}/{}", self.base_url, org_id, flag_name, enabled);

        let mut request = self.http_client.post(&url);
        if let Some(description) = description {
            request = request.query(&[("description", description)]);
        }
        let response = request.send().await?;

        self.handle_response(response, &[StatusCode::OK, StatusCode::ACCEPTED])
            .await
    }

    /// Fetch the state of a background job.
    ///
    /// # Endpoint
    ///
    /// `GET /job-status/{jobId}`
    pub async fn job_status(&self, job_id: i64) -> Result<FeatureFlagJob, FlagClientError> {
        let url = format!("{}/job-status/{}", self.base_url, job_id);

        let response = self.http_client.get(&url).send().await?;
        self.handle_response(response, &[StatusCode::OK]).await
    }

    /// List the background jobs recorded for an organization.
    ///
    /// # Endpoint
    ///
    /// `GET /jobs/{orgId}`
    pub async fn jobs_for_organization(
        &self,
        org_id: i64,
    ) -> Result<Vec<FeatureFlagJob>, FlagClientError> {
        let url = format!("{}/jobs/{}", self.base_url, org_id);

        let response = self.http_client.get(&url).send().await?;
        self.handle_response(response, &[StatusCode::OK]).await
    }

    /// Check the status against the accepted set, then parse the body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        accepted: &[StatusCode],
    ) -> Result<T, FlagClientError> {
        let status = response.status();

        if !accepted.contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(FlagClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

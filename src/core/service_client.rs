// src/core/service_client.rs
//! HTTP client for the job portal's admin endpoints

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::app_log;
use crate::core::error::{ApiError, ApiResult};
use crate::types::{
    company::{Company, CompanyId},
    job::{Job, JobId},
    response::{ActionResponse, JobSearchResponse, ModerationRequest, PendingCompaniesResponse},
};

const JOBS_SEARCH_ENDPOINT: &str = "/jobs/search";
const PENDING_COMPANIES_ENDPOINT: &str = "/companies/pending";

/// Backend operations the moderation workflow depends on
#[async_trait]
pub trait ModerationApi: Send + Sync {
    async fn fetch_jobs(&self, limit: usize) -> ApiResult<Vec<Job>>;

    async fn approve_job(&self, id: JobId, admin_notes: Option<&str>) -> ApiResult<()>;

    async fn reject_job(&self, id: JobId, admin_notes: Option<&str>) -> ApiResult<()>;

    async fn fetch_pending_companies(&self) -> ApiResult<Vec<Company>>;

    async fn approve_company(&self, id: CompanyId) -> ApiResult<()>;

    async fn reject_company(&self, id: CompanyId) -> ApiResult<()>;
}

pub struct AdminApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl AdminApiClient {
    /// Create a client that sends `token` as a bearer credential on every request
    pub fn new(base_url: &str, token: &str, timeout_seconds: u64) -> ApiResult<Self> {
        if token.trim().is_empty() {
            return Err(ApiError::MissingToken);
        }

        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Generic GET request
    async fn get<R>(&self, endpoint: &str, query: &[(&str, String)]) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        app_log!(trace, "GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        Self::read_json(response).await
    }

    /// Generic POST request with JSON
    async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> ApiResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        app_log!(trace, "POST {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<R>(response: reqwest::Response) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            app_log!(error, "Admin API error {}: {}", status, error_text);
            Err(ApiError::from_status(status, error_text))
        }
    }

    async fn post_action(&self, endpoint: &str, body: &ModerationRequest) -> ApiResult<()> {
        let ack: ActionResponse = self.post_json(endpoint, body).await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::NotAcknowledged(
                ack.message.unwrap_or_else(|| endpoint.to_string()),
            ))
        }
    }
}

#[async_trait]
impl ModerationApi for AdminApiClient {
    async fn fetch_jobs(&self, limit: usize) -> ApiResult<Vec<Job>> {
        let query = [
            ("show_unapproved", "true".to_string()),
            ("limit", limit.to_string()),
        ];
        let response: JobSearchResponse = self.get(JOBS_SEARCH_ENDPOINT, &query).await?;
        app_log!(info, "Fetched {} jobs for moderation", response.jobs.len());
        Ok(response.jobs)
    }

    async fn approve_job(&self, id: JobId, admin_notes: Option<&str>) -> ApiResult<()> {
        let body = ModerationRequest {
            admin_notes: admin_notes.map(str::to_string),
        };
        self.post_action(&format!("/jobs/{}/approve", id), &body).await
    }

    async fn reject_job(&self, id: JobId, admin_notes: Option<&str>) -> ApiResult<()> {
        let body = ModerationRequest {
            admin_notes: admin_notes.map(str::to_string),
        };
        self.post_action(&format!("/jobs/{}/reject", id), &body).await
    }

    async fn fetch_pending_companies(&self) -> ApiResult<Vec<Company>> {
        let response: PendingCompaniesResponse =
            self.get(PENDING_COMPANIES_ENDPOINT, &[]).await?;
        app_log!(info, "Fetched {} pending companies", response.companies.len());
        Ok(response.companies)
    }

    async fn approve_company(&self, id: CompanyId) -> ApiResult<()> {
        self.post_action(
            &format!("/companies/{}/approve", id),
            &ModerationRequest::default(),
        )
        .await
    }

    async fn reject_company(&self, id: CompanyId) -> ApiResult<()> {
        self.post_action(
            &format!("/companies/{}/reject", id),
            &ModerationRequest::default(),
        )
        .await
    }
}

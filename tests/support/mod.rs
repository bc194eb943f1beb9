#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use job_moderation::core::{ApiError, ApiResult, ModerationApi};
use job_moderation::types::company::{Company, CompanyId};
use job_moderation::types::job::{Job, JobId};

/// In-memory backend recording every call it receives
#[derive(Default)]
pub struct FakeApi {
    jobs: Mutex<Vec<Job>>,
    companies: Mutex<Vec<Company>>,
    failing: Mutex<HashSet<i64>>,
    unauthorized: Mutex<bool>,
    calls: Mutex<Vec<(String, i64)>>,
    delay: Duration,
    fetches: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl FakeApi {
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            ..Default::default()
        }
    }

    pub fn with_companies(companies: Vec<Company>) -> Self {
        Self {
            companies: Mutex::new(companies),
            ..Default::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fail_for(self, ids: &[i64]) -> Self {
        self.failing.lock().unwrap().extend(ids.iter().copied());
        self
    }

    pub fn reject_token(self) -> Self {
        *self.unauthorized.lock().unwrap() = true;
        self
    }

    pub fn set_jobs(&self, jobs: Vec<Job>) {
        *self.jobs.lock().unwrap() = jobs;
    }

    pub fn calls(&self) -> Vec<(String, i64)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Highest number of actions that were in progress at the same time
    pub fn max_concurrent_actions(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    async fn action(&self, name: &str, id: i64) -> ApiResult<()> {
        self.calls.lock().unwrap().push((name.to_string(), id));
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        if *self.unauthorized.lock().unwrap() {
            return Err(ApiError::Unauthorized(StatusCode::UNAUTHORIZED));
        }
        if self.failing.lock().unwrap().contains(&id) {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: format!("cannot {} {}", name, id),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ModerationApi for FakeApi {
    async fn fetch_jobs(&self, limit: usize) -> ApiResult<Vec<Job>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if *self.unauthorized.lock().unwrap() {
            return Err(ApiError::Unauthorized(StatusCode::FORBIDDEN));
        }
        Ok(self.jobs.lock().unwrap().iter().take(limit).cloned().collect())
    }

    async fn approve_job(&self, id: JobId, _admin_notes: Option<&str>) -> ApiResult<()> {
        self.action("approve_job", id).await
    }

    async fn reject_job(&self, id: JobId, _admin_notes: Option<&str>) -> ApiResult<()> {
        self.action("reject_job", id).await
    }

    async fn fetch_pending_companies(&self) -> ApiResult<Vec<Company>> {
        Ok(self.companies.lock().unwrap().clone())
    }

    async fn approve_company(&self, id: CompanyId) -> ApiResult<()> {
        self.action("approve_company", id).await
    }

    async fn reject_company(&self, id: CompanyId) -> ApiResult<()> {
        self.action("reject_company", id).await
    }
}

pub fn job(id: JobId, title: &str, status: &str, approved: bool) -> Job {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "company": "Acme",
        "description": "",
        "status": status,
        "approved_by_admin": approved,
        "created_by_type": "company",
        "created_at": format!("2024-03-01T00:00:{:02}Z", id % 60),
    }))
    .unwrap()
}

pub fn pending_job(id: JobId) -> Job {
    job(id, &format!("Pending job {}", id), "pending_approval", false)
}

pub fn approved_job(id: JobId) -> Job {
    job(id, &format!("Approved job {}", id), "active", true)
}

pub fn company(id: CompanyId, name: &str) -> Company {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "email": format!("hr@{}.example", name.to_lowercase()),
    }))
    .unwrap()
}

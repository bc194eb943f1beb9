// src/moderation/dispatcher.rs
//! Approve/reject dispatch with in-flight tracking and optimistic patches.
//!
//! Every action is a two-phase commit: the id is marked in flight, the request
//! is sent, and only a confirmed response patches the local job array and the
//! statistics. A failed request leaves local state exactly as it was.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::app_log;
use crate::core::error::{ApiError, ApiResult};
use crate::core::service_client::ModerationApi;
use crate::moderation::queue::{ActionQueue, BulkReport};
use crate::moderation::stats::Statistics;
use crate::types::job::{DerivedStatus, Job, JobId, STATUS_ACTIVE, STATUS_INACTIVE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
}

impl ModerationAction {
    /// Bucket the job lands in once the server confirms
    pub fn target_status(&self) -> DerivedStatus {
        match self {
            ModerationAction::Approve => DerivedStatus::Approved,
            ModerationAction::Reject => DerivedStatus::Rejected,
        }
    }

    /// Local patch mirroring what the server does on success
    pub fn apply_to(&self, job: &mut Job, admin_notes: Option<&str>) {
        match self {
            ModerationAction::Approve => {
                job.approved_by_admin = true;
                job.status = STATUS_ACTIVE.to_string();
            }
            ModerationAction::Reject => {
                job.approved_by_admin = false;
                job.status = STATUS_INACTIVE.to_string();
            }
        }
        if let Some(notes) = admin_notes {
            job.admin_notes = Some(notes.to_string());
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ids with a request submitted but not yet answered
#[derive(Debug, Default)]
pub struct InFlight {
    ids: Mutex<HashSet<i64>>,
}

impl InFlight {
    pub fn begin(&self, id: i64) -> ApiResult<InFlightGuard<'_>> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if !ids.insert(id) {
            return Err(ApiError::AlreadyProcessing(id));
        }
        Ok(InFlightGuard { owner: self, id })
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clears the in-flight mark when dropped, whatever the outcome
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    id: i64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

#[derive(Debug, Clone, Default)]
struct Snapshot {
    jobs: Arc<Vec<Job>>,
    stats: Statistics,
    revision: u64,
}

/// Fetched jobs plus their statistics. Writers swap in a fresh vector, so a
/// reader holding an older `Arc` never sees a half-applied patch.
#[derive(Debug, Default)]
pub struct JobStore {
    current: RwLock<Snapshot>,
}

impl JobStore {
    pub fn new(jobs: Vec<Job>) -> Self {
        let store = Self::default();
        store.replace(jobs);
        store
    }

    pub fn jobs(&self) -> Arc<Vec<Job>> {
        self.read().jobs.clone()
    }

    pub fn statistics(&self) -> Statistics {
        self.read().stats
    }

    /// Bumped every time the job array is replaced or patched
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    pub fn get(&self, id: JobId) -> Option<Job> {
        self.read().jobs.iter().find(|job| job.id == id).cloned()
    }

    /// Install a freshly fetched collection and recompute statistics
    pub fn replace(&self, jobs: Vec<Job>) {
        let stats = Statistics::from_jobs(&jobs);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Snapshot {
            jobs: Arc::new(jobs),
            stats,
            revision: current.revision + 1,
        };
    }

    /// Apply a confirmed action to one job and move it between statistics
    /// buckets. Returns the job's new derived status.
    pub fn apply_confirmed(
        &self,
        id: JobId,
        action: ModerationAction,
        admin_notes: Option<&str>,
    ) -> ApiResult<DerivedStatus> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);

        let index = current
            .jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or(ApiError::UnknownJob(id))?;

        let mut jobs = current.jobs.as_ref().clone();
        let previous = jobs[index].derived_status();
        action.apply_to(&mut jobs[index], admin_notes);
        let new_status = jobs[index].derived_status();

        *current = Snapshot {
            stats: current.stats.apply_moderation_result(&previous, &new_status),
            jobs: Arc::new(jobs),
            revision: current.revision + 1,
        };

        Ok(new_status)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Snapshot> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct ActionDispatcher<A: ModerationApi> {
    api: Arc<A>,
    store: JobStore,
    in_flight: InFlight,
    closed: AtomicBool,
}

impl<A: ModerationApi> ActionDispatcher<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            store: JobStore::default(),
            in_flight: InFlight::default(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    pub fn is_processing(&self, id: JobId) -> bool {
        self.in_flight.contains(id)
    }

    pub fn processing_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Stop applying responses that arrive from now on
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Fetch the moderation collection, replacing whatever was loaded
    pub async fn load(&self, limit: usize) -> ApiResult<()> {
        let jobs = self.api.fetch_jobs(limit).await?;
        if self.is_closed() {
            app_log!(warn, "Board closed before job list arrived, dropping it");
            return Ok(());
        }
        self.store.replace(jobs);
        Ok(())
    }

    /// Approve or reject one job.
    ///
    /// No client-side legality check: re-approving an approved job, or acting
    /// on an id that is not in the loaded collection, is sent to the server,
    /// which decides.
    pub async fn moderate(
        &self,
        id: JobId,
        action: ModerationAction,
        admin_notes: Option<&str>,
    ) -> ApiResult<DerivedStatus> {
        let _guard = self.in_flight.begin(id)?;
        app_log!(info, "Sending {} for job {}", action, id);

        let result = match action {
            ModerationAction::Approve => self.api.approve_job(id, admin_notes).await,
            ModerationAction::Reject => self.api.reject_job(id, admin_notes).await,
        };

        if let Err(e) = result {
            app_log!(error, "Failed to {} job {}: {}", action, id, e);
            return Err(e);
        }

        if self.is_closed() {
            app_log!(
                warn,
                "Board closed while {} for job {} was in flight, not patching",
                action,
                id
            );
            return Ok(action.target_status());
        }

        match self.store.apply_confirmed(id, action, admin_notes) {
            Ok(new_status) => {
                app_log!(info, "Job {} is now {}", id, new_status);
                Ok(new_status)
            }
            Err(ApiError::UnknownJob(_)) => {
                app_log!(
                    info,
                    "Job {} confirmed {} but is not loaded, nothing to patch",
                    id,
                    action
                );
                Ok(action.target_status())
            }
            Err(e) => Err(e),
        }
    }

    /// Run `action` over `ids` one at a time
    pub async fn moderate_bulk(
        &self,
        ids: Vec<JobId>,
        action: ModerationAction,
        admin_notes: Option<&str>,
    ) -> BulkReport {
        ActionQueue::with_ids(action, ids)
            .drain(move |item| async move {
                self.moderate(item.id, item.action, admin_notes)
                    .await
                    .map(|_| ())
            })
            .await
    }
}

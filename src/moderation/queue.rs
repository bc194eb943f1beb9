// src/moderation/queue.rs
//! Ordered queue for bulk actions. Items run strictly one after another so
//! statistics patches land in a fixed order, and one failure never stops the
//! remaining items.

use serde::Serialize;
use std::collections::VecDeque;
use std::future::Future;

use crate::app_log;
use crate::core::error::ApiResult;
use crate::moderation::dispatcher::ModerationAction;
use crate::types::job::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedAction {
    pub id: JobId,
    pub action: ModerationAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkFailure {
    pub id: JobId,
    pub error: String,
}

/// Outcome of one bulk run, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub action: ModerationAction,
    pub attempted: Vec<JobId>,
    pub succeeded: Vec<JobId>,
    pub failed: Vec<BulkFailure>,
}

impl BulkReport {
    fn new(action: ModerationAction) -> Self {
        Self {
            action,
            attempted: Vec::new(),
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub struct ActionQueue {
    action: ModerationAction,
    pending: VecDeque<QueuedAction>,
}

impl ActionQueue {
    pub fn new(action: ModerationAction) -> Self {
        Self {
            action,
            pending: VecDeque::new(),
        }
    }

    pub fn with_ids<I>(action: ModerationAction, ids: I) -> Self
    where
        I: IntoIterator<Item = JobId>,
    {
        let mut queue = Self::new(action);
        for id in ids {
            queue.push(id);
        }
        queue
    }

    pub fn push(&mut self, id: JobId) {
        self.pending.push_back(QueuedAction {
            id,
            action: self.action,
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Run every queued item, awaiting each before starting the next
    pub async fn drain<F, Fut>(mut self, mut run: F) -> BulkReport
    where
        F: FnMut(QueuedAction) -> Fut,
        Fut: Future<Output = ApiResult<()>>,
    {
        let mut report = BulkReport::new(self.action);
        app_log!(info, "Running bulk {} over {} jobs", self.action, self.pending.len());

        while let Some(item) = self.pending.pop_front() {
            report.attempted.push(item.id);
            match run(item).await {
                Ok(()) => report.succeeded.push(item.id),
                Err(e) => {
                    app_log!(error, "Bulk {} failed for job {}: {}", item.action, item.id, e);
                    report.failed.push(BulkFailure {
                        id: item.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        app_log!(
            info,
            "Bulk {} finished: {} succeeded, {} failed",
            report.action,
            report.succeeded.len(),
            report.failed.len()
        );
        report
    }
}

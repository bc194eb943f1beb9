// src/moderation/stats.rs
use serde::Serialize;

use crate::types::job::{DerivedStatus, Job};

/// Moderation counters shown above the job table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl Statistics {
    /// Compute counters from a freshly fetched collection
    pub fn from_jobs(jobs: &[Job]) -> Self {
        jobs.iter().fold(
            Self {
                total: jobs.len(),
                ..Self::default()
            },
            |stats, job| stats.increment(&job.derived_status()),
        )
    }

    /// Move one job from `previous` to `new` after a confirmed action.
    /// `total` never changes; buckets without a counter are ignored.
    pub fn apply_moderation_result(self, previous: &DerivedStatus, new: &DerivedStatus) -> Self {
        if previous == new {
            return self;
        }
        self.decrement(previous).increment(new)
    }

    fn increment(mut self, bucket: &DerivedStatus) -> Self {
        match bucket {
            DerivedStatus::Pending => self.pending += 1,
            DerivedStatus::Approved => self.approved += 1,
            DerivedStatus::Rejected => self.rejected += 1,
            DerivedStatus::Other(_) => {}
        }
        self
    }

    fn decrement(mut self, bucket: &DerivedStatus) -> Self {
        match bucket {
            DerivedStatus::Pending => self.pending = self.pending.saturating_sub(1),
            DerivedStatus::Approved => self.approved = self.approved.saturating_sub(1),
            DerivedStatus::Rejected => self.rejected = self.rejected.saturating_sub(1),
            DerivedStatus::Other(_) => {}
        }
        self
    }
}

// src/moderation/selection.rs
use std::collections::BTreeSet;

use crate::types::job::JobId;

/// Ids checked for a bulk action. Scoped to the whole collection, so an id
/// stays selected when a filter hides its row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<JobId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: JobId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Select every id on the page, or deselect them all if every one is
    /// already selected. Ids outside the page are never touched.
    pub fn toggle_all_on_page(&mut self, page_ids: &[JobId]) {
        if page_ids.is_empty() {
            return;
        }

        let all_selected = page_ids.iter().all(|id| self.selected.contains(id));
        if all_selected {
            for id in page_ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(page_ids.iter().copied());
        }
    }

    pub fn all_selected(&self, page_ids: &[JobId]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.selected.contains(id))
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<JobId> {
        self.selected.iter().copied().collect()
    }

    pub fn remove_many(&mut self, ids: &[JobId]) {
        for id in ids {
            self.selected.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

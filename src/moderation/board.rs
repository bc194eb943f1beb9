// src/moderation/board.rs
//! The admin jobs view: filters, page, selection and actions over one
//! fetched collection.

use std::sync::Arc;

use crate::app_log;
use crate::core::error::ApiResult;
use crate::core::service_client::ModerationApi;
use crate::moderation::dispatcher::{ActionDispatcher, ModerationAction};
use crate::moderation::filter::FilterState;
use crate::moderation::pagination::{PageInfo, PaginationState};
use crate::moderation::queue::BulkReport;
use crate::moderation::selection::SelectionState;
use crate::moderation::stats::Statistics;
use crate::types::job::{DerivedStatus, Job, JobId};

#[derive(Debug, Clone, Copy)]
pub struct BoardOptions {
    pub fetch_limit: usize,
    pub page_size: usize,
}

pub struct ModerationBoard<A: ModerationApi> {
    dispatcher: ActionDispatcher<A>,
    options: BoardOptions,
    filter: FilterState,
    pagination: PaginationState,
    // Store revision the page was chosen against
    page_revision: u64,
    selection: SelectionState,
}

impl<A: ModerationApi> ModerationBoard<A> {
    pub fn new(api: Arc<A>, options: BoardOptions) -> anyhow::Result<Self> {
        Ok(Self {
            dispatcher: ActionDispatcher::new(api),
            options,
            filter: FilterState::default(),
            pagination: PaginationState::new(options.page_size)?,
            page_revision: 0,
            selection: SelectionState::new(),
        })
    }

    /// Fetch the collection once and compute statistics
    pub async fn load(&mut self) -> ApiResult<()> {
        self.dispatcher.load(self.options.fetch_limit).await?;
        self.reset_page();
        Ok(())
    }

    /// Refetch, keeping filters and selection; back to page 1
    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.dispatcher.load(self.options.fetch_limit).await?;
        self.reset_page();
        Ok(())
    }

    /// The page cursor as seen now. Any change to the job array since the
    /// page was chosen (fetch or confirmed action) puts it back on page 1.
    fn current_pagination(&self) -> PaginationState {
        if self.dispatcher.store().revision() == self.page_revision {
            self.pagination
        } else {
            self.pagination.reset()
        }
    }

    fn set_pagination(&mut self, pagination: PaginationState) {
        self.pagination = pagination;
        self.page_revision = self.dispatcher.store().revision();
    }

    fn reset_page(&mut self) {
        let pagination = self.pagination.reset();
        self.set_pagination(pagination);
    }

    pub fn dispatcher(&self) -> &ActionDispatcher<A> {
        &self.dispatcher
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Change any facet; always returns to page 1
    pub fn update_filter<F>(&mut self, update: F)
    where
        F: FnOnce(&mut FilterState),
    {
        update(&mut self.filter);
        self.reset_page();
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.update_filter(|current| *current = filter);
    }

    pub fn statistics(&self) -> Statistics {
        self.dispatcher.store().statistics()
    }

    pub fn job(&self, id: JobId) -> Option<Job> {
        self.dispatcher.store().get(id)
    }

    pub fn all_jobs(&self) -> Arc<Vec<Job>> {
        self.dispatcher.store().jobs()
    }

    /// Every job passing the current filter, in sort order
    pub fn filtered_jobs(&self) -> Vec<Job> {
        self.filter.apply(&self.dispatcher.store().jobs())
    }

    /// The current page of the filtered jobs
    pub fn visible_jobs(&self) -> Vec<Job> {
        self.current_pagination()
            .slice(&self.filtered_jobs())
            .to_vec()
    }

    pub fn visible_ids(&self) -> Vec<JobId> {
        self.visible_jobs().iter().map(|job| job.id).collect()
    }

    pub fn page_info(&self) -> PageInfo {
        self.current_pagination().info(self.filtered_jobs().len())
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.filtered_jobs().len();
        let pagination = self.current_pagination().go_to(page, total);
        self.set_pagination(pagination);
    }

    pub fn next_page(&mut self) {
        let total = self.filtered_jobs().len();
        let pagination = self.current_pagination().next(total);
        self.set_pagination(pagination);
    }

    pub fn previous_page(&mut self) {
        let total = self.filtered_jobs().len();
        let pagination = self.current_pagination().previous(total);
        self.set_pagination(pagination);
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn toggle_selection(&mut self, id: JobId) {
        self.selection.toggle(id);
    }

    /// Toggle-all for the rows on the current page only
    pub fn toggle_all_on_page(&mut self) {
        let page_ids = self.visible_ids();
        self.selection.toggle_all_on_page(&page_ids);
    }

    pub fn is_processing(&self, id: JobId) -> bool {
        self.dispatcher.is_processing(id)
    }

    /// A confirmed action changes the job array, so the view goes back to
    /// page 1; a failed one leaves the page where it was
    pub async fn moderate(
        &self,
        id: JobId,
        action: ModerationAction,
        admin_notes: Option<&str>,
    ) -> ApiResult<DerivedStatus> {
        self.dispatcher.moderate(id, action, admin_notes).await
    }

    /// Apply `action` to every selected job, then drop exactly those ids
    /// from the selection, failures included
    pub async fn moderate_selected(
        &mut self,
        action: ModerationAction,
        admin_notes: Option<&str>,
    ) -> BulkReport {
        let ids = self.selection.ids();
        let report = self
            .dispatcher
            .moderate_bulk(ids, action, admin_notes)
            .await;
        self.selection.remove_many(&report.attempted);
        report
    }

    /// Detach from the backend; responses still in flight are not applied
    pub fn close(&self) {
        app_log!(debug, "Closing moderation board");
        self.dispatcher.close();
    }
}

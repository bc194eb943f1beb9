// src/moderation/companies.rs
use std::sync::{Arc, PoisonError, RwLock};

use crate::app_log;
use crate::core::error::{ApiError, ApiResult};
use crate::core::service_client::ModerationApi;
use crate::moderation::dispatcher::{InFlight, ModerationAction};
use crate::types::company::{Company, CompanyId};

/// Company registrations waiting for review
pub struct CompanyQueue<A: ModerationApi> {
    api: Arc<A>,
    pending: RwLock<Arc<Vec<Company>>>,
    in_flight: InFlight,
}

impl<A: ModerationApi> CompanyQueue<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            pending: RwLock::new(Arc::new(Vec::new())),
            in_flight: InFlight::default(),
        }
    }

    pub async fn load(&self) -> ApiResult<()> {
        let companies = self.api.fetch_pending_companies().await?;
        *self.pending.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(companies);
        Ok(())
    }

    pub fn companies(&self) -> Arc<Vec<Company>> {
        self.pending
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_processing(&self, id: CompanyId) -> bool {
        self.in_flight.contains(id)
    }

    pub async fn approve(&self, id: CompanyId) -> ApiResult<()> {
        self.moderate(id, ModerationAction::Approve).await
    }

    pub async fn reject(&self, id: CompanyId) -> ApiResult<()> {
        self.moderate(id, ModerationAction::Reject).await
    }

    /// A reviewed company leaves the pending list once the server confirms
    async fn moderate(&self, id: CompanyId, action: ModerationAction) -> ApiResult<()> {
        if !self.companies().iter().any(|c| c.id == id) {
            return Err(ApiError::UnknownCompany(id));
        }

        let _guard = self.in_flight.begin(id)?;
        app_log!(info, "Sending {} for company {}", action, id);

        let result = match action {
            ModerationAction::Approve => self.api.approve_company(id).await,
            ModerationAction::Reject => self.api.reject_company(id).await,
        };

        if let Err(e) = result {
            app_log!(error, "Failed to {} company {}: {}", action, id, e);
            return Err(e);
        }

        let mut pending = self.pending.write().unwrap_or_else(PoisonError::into_inner);
        let remaining: Vec<Company> = pending.iter().filter(|c| c.id != id).cloned().collect();
        *pending = Arc::new(remaining);
        Ok(())
    }
}

//! Recount Use Case
//!
//! Rebuilds the derived values: engagement counters from the relation sets,
//! then language popularity from the fresh counters.

use std::sync::Arc;

use auth::{Identity, UserRole, require_role};

use crate::domain::entities::RecountReport;
use crate::domain::repository::MaintenanceRepository;
use crate::error::PromptResult;

pub struct RecountUseCase<M>
where
    M: MaintenanceRepository,
{
    maintenance_repo: Arc<M>,
}

impl<M> RecountUseCase<M>
where
    M: MaintenanceRepository,
{
    pub fn new(maintenance_repo: Arc<M>) -> Self {
        Self { maintenance_repo }
    }

    pub async fn execute(&self, caller: Option<&Identity>) -> PromptResult<RecountReport> {
        let admin = require_role(caller, UserRole::Admin)?;

        let prompts_updated = self.maintenance_repo.recount_engagement_counters().await?;
        let languages_updated = self
            .maintenance_repo
            .recompute_language_popularity()
            .await?;

        tracing::info!(
            admin_id = %admin.user_id,
            prompts_updated,
            languages_updated,
            "Recount finished"
        );

        Ok(RecountReport {
            prompts_updated,
            languages_updated,
        })
    }
}

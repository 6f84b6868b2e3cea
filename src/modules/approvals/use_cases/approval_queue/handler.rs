// Approval queue: what a reviewer has waiting, read from projections only.

use crate::modules::approvals::adapters::outbound::daily_rejection_log::{
    self, DailyRejection,
};
use crate::modules::approvals::adapters::outbound::projections::{
    MonthlyApprovalView, find_approval, list_for_member, list_for_members,
};
use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::members::core::ports::MemberDirectory;
use crate::modules::members::permissions::ensure_may_act_for;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::FiscalMonth;
use crate::shared::infrastructure::database::Database;
use std::sync::Arc;

pub struct ApprovalQueries {
    db: Database,
    directory: Arc<dyn MemberDirectory>,
}

impl ApprovalQueries {
    pub fn new(db: Database, directory: Arc<dyn MemberDirectory>) -> Self {
        Self { db, directory }
    }

    /// SUBMITTED approvals of everyone below `reviewer_id` in the manager chain.
    #[tracing::instrument(skip(self))]
    pub async fn pending_for_reviewer(
        &self,
        reviewer_id: &str,
    ) -> Result<Vec<MonthlyApprovalView>, ApplicationError> {
        let subordinates = self.directory.subordinate_ids(reviewer_id).await?;
        let mut conn = self.db.acquire().await?;
        let pending =
            list_for_members(&mut conn, &subordinates, ApprovalStatus::Submitted).await?;
        tracing::debug!(subordinates = subordinates.len(), pending = pending.len(), "queue read");
        Ok(pending)
    }

    pub async fn approval(
        &self,
        viewer_id: &str,
        approval_id: &str,
    ) -> Result<MonthlyApprovalView, ApplicationError> {
        let mut conn = self.db.acquire().await?;
        let approval = find_approval(&mut conn, approval_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("monthly approval", approval_id))?;
        drop(conn);
        ensure_may_act_for(&*self.directory, viewer_id, &approval.member_id).await?;
        Ok(approval)
    }

    pub async fn approvals_of_member(
        &self,
        viewer_id: &str,
        member_id: &str,
    ) -> Result<Vec<MonthlyApprovalView>, ApplicationError> {
        ensure_may_act_for(&*self.directory, viewer_id, member_id).await?;
        let mut conn = self.db.acquire().await?;
        Ok(list_for_member(&mut conn, member_id).await?)
    }

    pub async fn daily_rejections(
        &self,
        viewer_id: &str,
        member_id: &str,
        fiscal_month: FiscalMonth,
    ) -> Result<Vec<DailyRejection>, ApplicationError> {
        ensure_may_act_for(&*self.directory, viewer_id, member_id).await?;
        let mut conn = self.db.acquire().await?;
        Ok(daily_rejection_log::list_in_range(
            &mut conn,
            member_id,
            fiscal_month.start(),
            fiscal_month.end(),
        )
        .await?)
    }
}

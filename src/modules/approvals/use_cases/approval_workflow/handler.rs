// Approval Workflow Service: monthly submit, approve, reject.
//
// Purpose
// - Keep the monthly approval and every work-log entry and absence it covers consistent under
//   self edits, proxy edits and repeated reject and resubmit cycles.
//
// Responsibilities
// - Check permissions through the member directory before any transaction is opened.
// - Open exactly one transaction per operation. Load by replay, decide, append plus project for
//   every touched stream, then commit. Any failure drops the transaction and nothing is kept.
// - Publish notifications only after commit; a failing outbox is logged, never surfaced.
//
// Boundaries
// - The service never retries. A `ConcurrencyConflict` goes back to the caller.

use crate::modules::approvals::adapters::outbound::intent_outbox::publish_committed;
use crate::modules::approvals::adapters::outbound::projections::{
    MonthlyApprovalProjection, find_approval, find_id_for_month, find_overlapping,
};
use crate::modules::approvals::core::decide::{
    Decision, decide_approve, decide_create, decide_reject, decide_submit,
};
use crate::modules::approvals::core::events::MonthlyApprovalEvent;
use crate::modules::approvals::core::intents::ApprovalIntent;
use crate::modules::approvals::core::state::MonthlyApproval;
use crate::modules::approvals::use_cases::approval_workflow::transitions::{
    OnMismatch, StatusChange, transition_records,
};
use crate::modules::members::core::ports::MemberDirectory;
use crate::modules::members::permissions::{ensure_manages, ensure_may_act_for};
use crate::modules::work_log::adapters::outbound::projections::{
    ABSENCES, AbsenceProjection, ENTRIES, WorkLogEntryProjection, ids_in_range,
};
use crate::modules::work_log::core::absence::state::Absence;
use crate::modules::work_log::core::entry::state::WorkLogEntry;
use crate::modules::work_log::core::status::RecordStatus;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::aggregate::Tracked;
use crate::shared::core::primitives::{FiscalMonth, Reason, new_id, now_millis};
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::repository::AggregateRepository;
use sqlx::SqliteConnection;
use std::sync::Arc;

pub struct ApprovalWorkflowService {
    pub(super) db: Database,
    pub(super) directory: Arc<dyn MemberDirectory>,
    pub(super) outbox: Arc<dyn DomainOutbox>,
    pub(super) topic: String,
    pub(super) approvals: AggregateRepository<MonthlyApproval, MonthlyApprovalProjection>,
    pub(super) entries: AggregateRepository<WorkLogEntry, WorkLogEntryProjection>,
    pub(super) absences: AggregateRepository<Absence, AbsenceProjection>,
}

fn accepted(
    decision: Decision,
) -> Result<(Vec<MonthlyApprovalEvent>, Vec<ApprovalIntent>), ApplicationError> {
    match decision {
        Decision::Accepted { events, intents } => Ok((events, intents)),
        Decision::Rejected { reason } => Err(ApplicationError::Domain(reason.to_string())),
    }
}

impl ApprovalWorkflowService {
    pub fn new(
        db: Database,
        directory: Arc<dyn MemberDirectory>,
        outbox: Arc<dyn DomainOutbox>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            db,
            directory,
            outbox,
            topic: topic.into(),
            approvals: AggregateRepository::new(MonthlyApprovalProjection),
            entries: AggregateRepository::new(WorkLogEntryProjection),
            absences: AggregateRepository::new(AbsenceProjection),
        }
    }

    /// Submits every live record of the month and returns the approval id.
    #[tracing::instrument(skip(self, fiscal_month), fields(fiscal_month = %fiscal_month))]
    pub async fn submit_month(
        &self,
        member_id: &str,
        fiscal_month: FiscalMonth,
        submitted_by: &str,
    ) -> Result<String, ApplicationError> {
        ensure_may_act_for(&*self.directory, submitted_by, member_id).await?;
        let now = now_millis();

        let mut tx = self.db.begin().await?;
        let mut approval = self
            .find_or_create(&mut *tx, member_id, fiscal_month, submitted_by, now)
            .await?;
        let state = approval
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::Unexpected("approval without state".into()))?;

        let (start, end) = (fiscal_month.start(), fiscal_month.end());
        let entry_ids = ids_in_range(&mut *tx, ENTRIES, member_id, start, end).await?;
        let absence_ids = ids_in_range(&mut *tx, ABSENCES, member_id, start, end).await?;

        let (events, intents) = accepted(decide_submit(
            &state,
            submitted_by,
            now,
            entry_ids.clone(),
            absence_ids.clone(),
        ))?;
        approval.record(events);
        let version = self.approvals.save(&mut *tx, &mut approval).await?;

        let change = StatusChange {
            from: RecordStatus::Draft,
            to: RecordStatus::Submitted,
            on_mismatch: OnMismatch::Skip,
            changed_by: submitted_by,
            changed_at: now,
        };
        let entries = transition_records(&mut *tx, &self.entries, &entry_ids, change).await?;
        let absences = transition_records(&mut *tx, &self.absences, &absence_ids, change).await?;
        tx.commit().await?;

        tracing::info!(
            approval_id = %state.id,
            version,
            entries = entries.len(),
            absences = absences.len(),
            "month submitted"
        );
        self.publish(&state.id, version, intents).await;
        Ok(state.id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn approve_month(
        &self,
        approval_id: &str,
        reviewed_by: &str,
    ) -> Result<(), ApplicationError> {
        let member_id = self.member_of(approval_id).await?;
        ensure_manages(&*self.directory, reviewed_by, &member_id).await?;
        let now = now_millis();

        let mut tx = self.db.begin().await?;
        let mut approval = self.load_approval(&mut *tx, approval_id).await?;
        let state = approval
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("monthly approval", approval_id))?;
        let (events, intents) = accepted(decide_approve(&state, reviewed_by, now))?;
        approval.record(events);
        let version = self.approvals.save(&mut *tx, &mut approval).await?;

        let change = StatusChange {
            from: RecordStatus::Submitted,
            to: RecordStatus::Approved,
            on_mismatch: OnMismatch::Fail,
            changed_by: reviewed_by,
            changed_at: now,
        };
        transition_records(&mut *tx, &self.entries, &state.work_log_entry_ids, change).await?;
        transition_records(&mut *tx, &self.absences, &state.absence_ids, change).await?;
        tx.commit().await?;

        tracing::info!(approval_id, version, "month approved");
        self.publish(approval_id, version, intents).await;
        Ok(())
    }

    #[tracing::instrument(skip(self, reason))]
    pub async fn reject_month(
        &self,
        approval_id: &str,
        reviewed_by: &str,
        reason: &str,
    ) -> Result<(), ApplicationError> {
        let reason = Reason::parse(reason)?;
        let member_id = self.member_of(approval_id).await?;
        ensure_manages(&*self.directory, reviewed_by, &member_id).await?;
        let now = now_millis();

        let mut tx = self.db.begin().await?;
        let mut approval = self.load_approval(&mut *tx, approval_id).await?;
        let state = approval
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("monthly approval", approval_id))?;
        let (events, intents) = accepted(decide_reject(&state, reviewed_by, now, &reason))?;
        approval.record(events);
        let version = self.approvals.save(&mut *tx, &mut approval).await?;

        let change = StatusChange {
            from: RecordStatus::Submitted,
            to: RecordStatus::Draft,
            on_mismatch: OnMismatch::Skip,
            changed_by: reviewed_by,
            changed_at: now,
        };
        transition_records(&mut *tx, &self.entries, &state.work_log_entry_ids, change).await?;
        transition_records(&mut *tx, &self.absences, &state.absence_ids, change).await?;
        tx.commit().await?;

        tracing::info!(approval_id, version, "month rejected");
        self.publish(approval_id, version, intents).await;
        Ok(())
    }

    async fn find_or_create(
        &self,
        conn: &mut SqliteConnection,
        member_id: &str,
        fiscal_month: FiscalMonth,
        created_by: &str,
        now: i64,
    ) -> Result<Tracked<MonthlyApproval>, ApplicationError> {
        if let Some(id) = find_id_for_month(conn, member_id, &fiscal_month).await? {
            return self
                .approvals
                .load(conn, &id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("monthly approval", id));
        }
        if let Some(other) = find_overlapping(conn, member_id, &fiscal_month).await? {
            return Err(ApplicationError::Validation(format!(
                "fiscal month {fiscal_month} overlaps approval {} for {}..{}",
                other.id, other.fiscal_month_start, other.fiscal_month_end
            )));
        }
        let id = new_id();
        let events = decide_create(None, &id, member_id, fiscal_month, created_by, now)
            .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        let mut approval = Tracked::<MonthlyApproval>::new(&id);
        approval.record(events);
        tracing::debug!(approval_id = %id, "monthly approval opened");
        Ok(approval)
    }

    async fn load_approval(
        &self,
        conn: &mut SqliteConnection,
        approval_id: &str,
    ) -> Result<Tracked<MonthlyApproval>, ApplicationError> {
        self.approvals
            .load(conn, approval_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("monthly approval", approval_id))
    }

    async fn member_of(&self, approval_id: &str) -> Result<String, ApplicationError> {
        let mut conn = self.db.acquire().await?;
        find_approval(&mut conn, approval_id)
            .await?
            .map(|view| view.member_id)
            .ok_or_else(|| ApplicationError::not_found("monthly approval", approval_id))
    }

    /// `version` is the stream version after the commit; intents map onto the last versions.
    pub(super) async fn publish(&self, stream_id: &str, version: i64, intents: Vec<ApprovalIntent>) {
        let starting_version = version - intents.len() as i64;
        publish_committed(
            &*self.outbox,
            stream_id,
            starting_version,
            &self.topic,
            intents,
        )
        .await;
    }
}

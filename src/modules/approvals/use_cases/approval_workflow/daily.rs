// Day-level workflow: a manager rejects one day, a member (or proxy) submits or recalls one day.
//
// Responsibilities
// - Touch only the records dated on that day; the monthly approval is read, never written.
// - The covering month gates each operation: an APPROVED month freezes its days, and recall
//   is also refused while the month is SUBMITTED.
// - Day notices are versioned by a per member-day counter advanced in the same transaction.

use crate::modules::approvals::adapters::outbound::daily_rejection_log::{self, DailyRejection};
use crate::modules::approvals::adapters::outbound::day_notice_sequence;
use crate::modules::approvals::adapters::outbound::projections::find_covering;
use crate::modules::approvals::core::intents::{ApprovalIntent, DayNotice};
use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::approvals::use_cases::approval_workflow::handler::ApprovalWorkflowService;
use crate::modules::approvals::use_cases::approval_workflow::transitions::{
    OnMismatch, StatusChange, transition_records,
};
use crate::modules::members::permissions::{ensure_manages, ensure_may_act_for};
use crate::modules::work_log::adapters::outbound::projections::{ABSENCES, ENTRIES, ids_on_date};
use crate::modules::work_log::core::status::RecordStatus;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::{Reason, now_millis};
use chrono::NaiveDate;
use sqlx::SqliteConnection;

struct DayChange<'a> {
    member_id: &'a str,
    date: NaiveDate,
    change: StatusChange<'a>,
}

impl ApprovalWorkflowService {
    /// Sends the member's SUBMITTED records on `date` back to DRAFT and logs the rejection.
    /// Returns the ids of the records that were sent back.
    #[tracing::instrument(skip(self, reason))]
    pub async fn reject_daily(
        &self,
        member_id: &str,
        date: NaiveDate,
        rejected_by: &str,
        reason: &str,
    ) -> Result<Vec<String>, ApplicationError> {
        let reason = Reason::parse(reason)?;
        ensure_manages(&*self.directory, rejected_by, member_id).await?;
        let now = now_millis();

        let mut tx = self.db.begin().await?;
        if let Some(approval) = find_covering(&mut *tx, member_id, date).await? {
            if approval.status == ApprovalStatus::Approved {
                return Err(ApplicationError::RejectBlockedByApproval {
                    member_id: member_id.to_string(),
                    date,
                    approval_id: approval.id,
                });
            }
        }
        let changed = self
            .change_day(
                &mut *tx,
                DayChange {
                    member_id,
                    date,
                    change: StatusChange {
                        from: RecordStatus::Submitted,
                        to: RecordStatus::Draft,
                        on_mismatch: OnMismatch::Skip,
                        changed_by: rejected_by,
                        changed_at: now,
                    },
                },
            )
            .await?;
        if changed.is_empty() {
            return Err(ApplicationError::Domain(format!(
                "nothing submitted on {date} to reject"
            )));
        }
        daily_rejection_log::upsert(
            &mut *tx,
            &DailyRejection {
                member_id: member_id.to_string(),
                work_date: date,
                rejected_by: rejected_by.to_string(),
                rejection_reason: reason.as_str().to_string(),
                affected_entry_ids: changed.clone(),
                created_at: now,
            },
        )
        .await?;
        let version = day_notice_sequence::next(&mut *tx, member_id, date).await?;
        tx.commit().await?;

        tracing::info!(records = changed.len(), "day rejected");
        let notice = day_notice(member_id, date, rejected_by, Some(reason.to_string()), &changed, now);
        self.publish_day(member_id, date, version, ApprovalIntent::PublishDayRejected(notice))
            .await;
        Ok(changed)
    }

    /// Moves the member's DRAFT records on `date` to SUBMITTED.
    #[tracing::instrument(skip(self))]
    pub async fn submit_daily(
        &self,
        member_id: &str,
        date: NaiveDate,
        submitted_by: &str,
    ) -> Result<Vec<String>, ApplicationError> {
        ensure_may_act_for(&*self.directory, submitted_by, member_id).await?;
        let now = now_millis();

        let mut tx = self.db.begin().await?;
        if let Some(approval) = find_covering(&mut *tx, member_id, date).await? {
            if approval.status == ApprovalStatus::Approved {
                return Err(ApplicationError::Domain(format!(
                    "{date} belongs to approved monthly approval {}",
                    approval.id
                )));
            }
        }
        let changed = self
            .change_day(
                &mut *tx,
                DayChange {
                    member_id,
                    date,
                    change: StatusChange {
                        from: RecordStatus::Draft,
                        to: RecordStatus::Submitted,
                        on_mismatch: OnMismatch::Skip,
                        changed_by: submitted_by,
                        changed_at: now,
                    },
                },
            )
            .await?;
        if changed.is_empty() {
            return Err(ApplicationError::Domain(format!(
                "nothing in draft on {date} to submit"
            )));
        }
        let version = day_notice_sequence::next(&mut *tx, member_id, date).await?;
        tx.commit().await?;

        tracing::info!(records = changed.len(), "day submitted");
        let notice = day_notice(member_id, date, submitted_by, None, &changed, now);
        self.publish_day(member_id, date, version, ApprovalIntent::PublishDaySubmitted(notice))
            .await;
        Ok(changed)
    }

    /// Pulls the member's SUBMITTED records on `date` back to DRAFT before any review.
    #[tracing::instrument(skip(self))]
    pub async fn recall_daily(
        &self,
        member_id: &str,
        date: NaiveDate,
        recalled_by: &str,
    ) -> Result<Vec<String>, ApplicationError> {
        ensure_may_act_for(&*self.directory, recalled_by, member_id).await?;
        let now = now_millis();

        let mut tx = self.db.begin().await?;
        if let Some(approval) = find_covering(&mut *tx, member_id, date).await? {
            if approval.status.locks_records() {
                return Err(ApplicationError::Domain(format!(
                    "{date} belongs to monthly approval {} which is {}",
                    approval.id, approval.status
                )));
            }
        }
        let changed = self
            .change_day(
                &mut *tx,
                DayChange {
                    member_id,
                    date,
                    change: StatusChange {
                        from: RecordStatus::Submitted,
                        to: RecordStatus::Draft,
                        on_mismatch: OnMismatch::Skip,
                        changed_by: recalled_by,
                        changed_at: now,
                    },
                },
            )
            .await?;
        if changed.is_empty() {
            return Err(ApplicationError::Domain(format!(
                "nothing submitted on {date} to recall"
            )));
        }
        let version = day_notice_sequence::next(&mut *tx, member_id, date).await?;
        tx.commit().await?;

        tracing::info!(records = changed.len(), "day recalled");
        let notice = day_notice(member_id, date, recalled_by, None, &changed, now);
        self.publish_day(member_id, date, version, ApprovalIntent::PublishDayRecalled(notice))
            .await;
        Ok(changed)
    }

    async fn change_day(
        &self,
        conn: &mut SqliteConnection,
        day: DayChange<'_>,
    ) -> Result<Vec<String>, ApplicationError> {
        let from = day.change.from;
        let entry_ids = ids_on_date(conn, ENTRIES, day.member_id, day.date, from).await?;
        let absence_ids = ids_on_date(conn, ABSENCES, day.member_id, day.date, from).await?;
        let mut changed = transition_records(conn, &self.entries, &entry_ids, day.change).await?;
        changed.extend(transition_records(conn, &self.absences, &absence_ids, day.change).await?);
        Ok(changed)
    }

    async fn publish_day(&self, member_id: &str, date: NaiveDate, version: i64, intent: ApprovalIntent) {
        self.publish(&format!("{member_id}:{date}"), version, vec![intent])
            .await;
    }
}

fn day_notice(
    member_id: &str,
    date: NaiveDate,
    actor_id: &str,
    reason: Option<String>,
    record_ids: &[String],
    occurred_at: i64,
) -> DayNotice {
    DayNotice {
        member_id: member_id.to_string(),
        date,
        actor_id: actor_id.to_string(),
        reason,
        record_ids: record_ids.to_vec(),
        occurred_at,
    }
}

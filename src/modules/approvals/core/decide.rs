// Pure decisions for the monthly approval.
//
// Responsibilities
// - PENDING -> SUBMITTED -> APPROVED, SUBMITTED -> REJECTED, REJECTED -> SUBMITTED.
// - Each accepted transition also yields the notification to publish once it is committed.

use crate::modules::approvals::core::events::MonthlyApprovalEvent;
use crate::modules::approvals::core::events::v1::{
    MonthApprovedV1, MonthRejectedV1, MonthSubmittedV1, MonthlyApprovalCreatedV1,
};
use crate::modules::approvals::core::intents::{ApprovalIntent, MonthNotice};
use crate::modules::approvals::core::state::{ApprovalStatus, MonthlyApproval};
use crate::shared::core::primitives::{FiscalMonth, Reason};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("monthly approval already exists")]
    AlreadyExists,

    #[error("monthly approval cannot move from {from} to {to}")]
    InvalidTransition {
        from: ApprovalStatus,
        to: ApprovalStatus,
    },
}

#[derive(Debug)]
pub enum Decision {
    Accepted {
        events: Vec<MonthlyApprovalEvent>,
        intents: Vec<ApprovalIntent>,
    },
    Rejected {
        reason: DecideError,
    },
}

fn notice(
    approval: &MonthlyApproval,
    actor_id: &str,
    reason: Option<String>,
    occurred_at: i64,
) -> MonthNotice {
    MonthNotice {
        approval_id: approval.id.clone(),
        member_id: approval.member_id.clone(),
        fiscal_month_start: approval.fiscal_month.start(),
        fiscal_month_end: approval.fiscal_month.end(),
        actor_id: actor_id.to_string(),
        reason,
        occurred_at,
    }
}

fn ensure_transition(approval: &MonthlyApproval, to: ApprovalStatus) -> Result<(), DecideError> {
    if approval.status.can_transition_to(to) {
        Ok(())
    } else {
        Err(DecideError::InvalidTransition {
            from: approval.status,
            to,
        })
    }
}

pub fn decide_create(
    state: Option<&MonthlyApproval>,
    approval_id: &str,
    member_id: &str,
    fiscal_month: FiscalMonth,
    created_by: &str,
    created_at: i64,
) -> Result<Vec<MonthlyApprovalEvent>, DecideError> {
    if state.is_some() {
        return Err(DecideError::AlreadyExists);
    }
    Ok(vec![MonthlyApprovalEvent::MonthlyApprovalCreatedV1(
        MonthlyApprovalCreatedV1 {
            approval_id: approval_id.to_string(),
            member_id: member_id.to_string(),
            fiscal_month,
            created_by: created_by.to_string(),
            created_at,
        },
    )])
}

pub fn decide_submit(
    state: &MonthlyApproval,
    submitted_by: &str,
    submitted_at: i64,
    work_log_entry_ids: Vec<String>,
    absence_ids: Vec<String>,
) -> Decision {
    if let Err(reason) = ensure_transition(state, ApprovalStatus::Submitted) {
        return Decision::Rejected { reason };
    }
    Decision::Accepted {
        events: vec![MonthlyApprovalEvent::MonthSubmittedV1(MonthSubmittedV1 {
            submitted_by: submitted_by.to_string(),
            submitted_at,
            work_log_entry_ids,
            absence_ids,
        })],
        intents: vec![ApprovalIntent::PublishMonthSubmitted(notice(
            state,
            submitted_by,
            None,
            submitted_at,
        ))],
    }
}

pub fn decide_approve(state: &MonthlyApproval, reviewed_by: &str, reviewed_at: i64) -> Decision {
    if let Err(reason) = ensure_transition(state, ApprovalStatus::Approved) {
        return Decision::Rejected { reason };
    }
    Decision::Accepted {
        events: vec![MonthlyApprovalEvent::MonthApprovedV1(MonthApprovedV1 {
            reviewed_by: reviewed_by.to_string(),
            reviewed_at,
        })],
        intents: vec![ApprovalIntent::PublishMonthApproved(notice(
            state,
            reviewed_by,
            None,
            reviewed_at,
        ))],
    }
}

pub fn decide_reject(
    state: &MonthlyApproval,
    reviewed_by: &str,
    reviewed_at: i64,
    reason: &Reason,
) -> Decision {
    if let Err(reason) = ensure_transition(state, ApprovalStatus::Rejected) {
        return Decision::Rejected { reason };
    }
    Decision::Accepted {
        events: vec![MonthlyApprovalEvent::MonthRejectedV1(MonthRejectedV1 {
            reviewed_by: reviewed_by.to_string(),
            reviewed_at,
            reason: reason.as_str().to_string(),
        })],
        intents: vec![ApprovalIntent::PublishMonthRejected(notice(
            state,
            reviewed_by,
            Some(reason.as_str().to_string()),
            reviewed_at,
        ))],
    }
}

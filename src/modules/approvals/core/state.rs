use crate::modules::approvals::core::events::MonthlyApprovalEvent;
use crate::shared::core::aggregate::Aggregate;
use crate::shared::core::primitives::FiscalMonth;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Submitted,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "PENDING",
            ApprovalStatus::Submitted => "SUBMITTED",
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::Rejected => "REJECTED",
        }
    }

    pub fn can_transition_to(self, to: ApprovalStatus) -> bool {
        matches!(
            (self, to),
            (ApprovalStatus::Pending, ApprovalStatus::Submitted)
                | (ApprovalStatus::Rejected, ApprovalStatus::Submitted)
                | (ApprovalStatus::Submitted, ApprovalStatus::Approved)
                | (ApprovalStatus::Submitted, ApprovalStatus::Rejected)
        )
    }

    /// Records of a locked month cannot be created, edited or recalled.
    pub fn locks_records(self) -> bool {
        matches!(self, ApprovalStatus::Submitted | ApprovalStatus::Approved)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown approval status {0}")]
pub struct UnknownApprovalStatus(pub String);

impl FromStr for ApprovalStatus {
    type Err = UnknownApprovalStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApprovalStatus::Pending),
            "SUBMITTED" => Ok(ApprovalStatus::Submitted),
            "APPROVED" => Ok(ApprovalStatus::Approved),
            "REJECTED" => Ok(ApprovalStatus::Rejected),
            other => Err(UnknownApprovalStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyApproval {
    pub id: String,
    pub member_id: String,
    pub fiscal_month: FiscalMonth,
    pub status: ApprovalStatus,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<i64>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub rejection_reason: Option<String>,
    pub work_log_entry_ids: Vec<String>,
    pub absence_ids: Vec<String>,
}

pub fn evolve(
    state: Option<MonthlyApproval>,
    event: &MonthlyApprovalEvent,
) -> Option<MonthlyApproval> {
    match (state, event) {
        (None, MonthlyApprovalEvent::MonthlyApprovalCreatedV1(e)) => Some(MonthlyApproval {
            id: e.approval_id.clone(),
            member_id: e.member_id.clone(),
            fiscal_month: e.fiscal_month,
            status: ApprovalStatus::Pending,
            submitted_by: None,
            submitted_at: None,
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
            work_log_entry_ids: Vec::new(),
            absence_ids: Vec::new(),
        }),
        (Some(approval), MonthlyApprovalEvent::MonthSubmittedV1(e)) => Some(MonthlyApproval {
            status: ApprovalStatus::Submitted,
            submitted_by: Some(e.submitted_by.clone()),
            submitted_at: Some(e.submitted_at),
            rejection_reason: None,
            work_log_entry_ids: e.work_log_entry_ids.clone(),
            absence_ids: e.absence_ids.clone(),
            ..approval
        }),
        (Some(approval), MonthlyApprovalEvent::MonthApprovedV1(e)) => Some(MonthlyApproval {
            status: ApprovalStatus::Approved,
            reviewed_by: Some(e.reviewed_by.clone()),
            reviewed_at: Some(e.reviewed_at),
            ..approval
        }),
        (Some(approval), MonthlyApprovalEvent::MonthRejectedV1(e)) => Some(MonthlyApproval {
            status: ApprovalStatus::Rejected,
            reviewed_by: Some(e.reviewed_by.clone()),
            reviewed_at: Some(e.reviewed_at),
            rejection_reason: Some(e.reason.clone()),
            ..approval
        }),
        (state, _) => state,
    }
}

impl Aggregate for MonthlyApproval {
    type Event = MonthlyApprovalEvent;
    const AGGREGATE_TYPE: &'static str = "monthly_approval";

    fn evolve(state: Option<Self>, event: &MonthlyApprovalEvent) -> Option<Self> {
        evolve(state, event)
    }
}

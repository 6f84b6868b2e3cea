use crate::shared::core::aggregate::DomainEvent;

pub mod v1 {
    use crate::shared::core::primitives::FiscalMonth;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct MonthlyApprovalCreatedV1 {
        pub approval_id: String,
        pub member_id: String,
        pub fiscal_month: FiscalMonth,
        pub created_by: String,
        pub created_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct MonthSubmittedV1 {
        pub submitted_by: String,
        pub submitted_at: i64,
        pub work_log_entry_ids: Vec<String>,
        pub absence_ids: Vec<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct MonthApprovedV1 {
        pub reviewed_by: String,
        pub reviewed_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct MonthRejectedV1 {
        pub reviewed_by: String,
        pub reviewed_at: i64,
        pub reason: String,
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum MonthlyApprovalEvent {
    MonthlyApprovalCreatedV1(v1::MonthlyApprovalCreatedV1),
    MonthSubmittedV1(v1::MonthSubmittedV1),
    MonthApprovedV1(v1::MonthApprovedV1),
    MonthRejectedV1(v1::MonthRejectedV1),
}

impl DomainEvent for MonthlyApprovalEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MonthlyApprovalEvent::MonthlyApprovalCreatedV1(_) => "MonthlyApprovalCreated",
            MonthlyApprovalEvent::MonthSubmittedV1(_) => "MonthSubmitted",
            MonthlyApprovalEvent::MonthApprovedV1(_) => "MonthApproved",
            MonthlyApprovalEvent::MonthRejectedV1(_) => "MonthRejected",
        }
    }
}

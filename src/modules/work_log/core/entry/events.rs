use crate::shared::core::aggregate::DomainEvent;

pub mod v1 {
    use crate::modules::work_log::core::status::RecordStatus;
    use crate::shared::core::primitives::Hours;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct WorkLogEntryCreatedV1 {
        pub entry_id: String,
        pub member_id: String,
        pub project_id: String,
        pub work_date: NaiveDate,
        pub hours: Hours,
        pub comment: Option<String>,
        pub entered_by: String,
        pub created_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct WorkLogEntryUpdatedV1 {
        pub project_id: String,
        pub work_date: NaiveDate,
        pub hours: Hours,
        pub comment: Option<String>,
        pub updated_by: String,
        pub updated_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct WorkLogEntryDeletedV1 {
        pub deleted_by: String,
        pub deleted_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct WorkLogEntryStatusChangedV1 {
        pub from: RecordStatus,
        pub to: RecordStatus,
        pub changed_by: String,
        pub changed_at: i64,
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum WorkLogEntryEvent {
    WorkLogEntryCreatedV1(v1::WorkLogEntryCreatedV1),
    WorkLogEntryUpdatedV1(v1::WorkLogEntryUpdatedV1),
    WorkLogEntryDeletedV1(v1::WorkLogEntryDeletedV1),
    WorkLogEntryStatusChangedV1(v1::WorkLogEntryStatusChangedV1),
}

impl DomainEvent for WorkLogEntryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WorkLogEntryEvent::WorkLogEntryCreatedV1(_) => "WorkLogEntryCreated",
            WorkLogEntryEvent::WorkLogEntryUpdatedV1(_) => "WorkLogEntryUpdated",
            WorkLogEntryEvent::WorkLogEntryDeletedV1(_) => "WorkLogEntryDeleted",
            WorkLogEntryEvent::WorkLogEntryStatusChangedV1(_) => "WorkLogEntryStatusChanged",
        }
    }
}

use crate::shared::core::aggregate::DomainEvent;

pub mod v1 {
    use crate::modules::work_log::core::absence::state::AbsenceType;
    use crate::modules::work_log::core::status::RecordStatus;
    use crate::shared::core::primitives::Hours;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AbsenceRecordedV1 {
        pub absence_id: String,
        pub member_id: String,
        pub absence_date: NaiveDate,
        pub hours: Hours,
        pub absence_type: AbsenceType,
        pub reason: Option<String>,
        pub recorded_by: String,
        pub recorded_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AbsenceUpdatedV1 {
        pub absence_date: NaiveDate,
        pub hours: Hours,
        pub absence_type: AbsenceType,
        pub reason: Option<String>,
        pub updated_by: String,
        pub updated_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AbsenceDeletedV1 {
        pub deleted_by: String,
        pub deleted_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AbsenceStatusChangedV1 {
        pub from: RecordStatus,
        pub to: RecordStatus,
        pub changed_by: String,
        pub changed_at: i64,
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum AbsenceEvent {
    AbsenceRecordedV1(v1::AbsenceRecordedV1),
    AbsenceUpdatedV1(v1::AbsenceUpdatedV1),
    AbsenceDeletedV1(v1::AbsenceDeletedV1),
    AbsenceStatusChangedV1(v1::AbsenceStatusChangedV1),
}

impl DomainEvent for AbsenceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AbsenceEvent::AbsenceRecordedV1(_) => "AbsenceRecorded",
            AbsenceEvent::AbsenceUpdatedV1(_) => "AbsenceUpdated",
            AbsenceEvent::AbsenceDeletedV1(_) => "AbsenceDeleted",
            AbsenceEvent::AbsenceStatusChangedV1(_) => "AbsenceStatusChanged",
        }
    }
}

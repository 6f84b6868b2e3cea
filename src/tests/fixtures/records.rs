use crate::modules::work_log::core::absence::events::AbsenceEvent;
use crate::modules::work_log::core::absence::events::v1::AbsenceRecordedV1;
use crate::modules::work_log::core::absence::state::AbsenceType;
use crate::modules::work_log::core::entry::events::WorkLogEntryEvent;
use crate::modules::work_log::core::entry::events::v1::WorkLogEntryCreatedV1;
use crate::shared::core::primitives::Hours;
use chrono::NaiveDate;

pub fn entry_created(id: &str, member_id: &str, date: NaiveDate, hours: f64) -> WorkLogEntryEvent {
    WorkLogEntryEvent::WorkLogEntryCreatedV1(WorkLogEntryCreatedV1 {
        entry_id: id.to_string(),
        member_id: member_id.to_string(),
        project_id: "project-0001".to_string(),
        work_date: date,
        hours: Hours::from_hours(hours).unwrap(),
        comment: None,
        entered_by: member_id.to_string(),
        created_at: 1_700_000_000_000,
    })
}

pub fn absence_recorded(id: &str, member_id: &str, date: NaiveDate, hours: f64) -> AbsenceEvent {
    AbsenceEvent::AbsenceRecordedV1(AbsenceRecordedV1 {
        absence_id: id.to_string(),
        member_id: member_id.to_string(),
        absence_date: date,
        hours: Hours::from_hours(hours).unwrap(),
        absence_type: AbsenceType::PaidLeave,
        reason: None,
        recorded_by: member_id.to_string(),
        recorded_at: 1_700_000_000_000,
    })
}

use crate::modules::work_log::core::absence::events::AbsenceEvent;
use crate::modules::work_log::core::absence::events::v1::{
    AbsenceDeletedV1, AbsenceRecordedV1, AbsenceUpdatedV1,
};
use crate::modules::work_log::core::absence::state::{Absence, AbsenceType};
use crate::modules::work_log::core::record::{RecordDecideError, ensure_editable, normalize_note};
use crate::shared::core::primitives::Hours;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceDetails {
    pub absence_date: NaiveDate,
    pub hours: Hours,
    pub absence_type: AbsenceType,
    pub reason: Option<String>,
}

pub fn decide_record(
    state: Option<&Absence>,
    absence_id: &str,
    member_id: &str,
    details: AbsenceDetails,
    recorded_by: &str,
    recorded_at: i64,
) -> Result<Vec<AbsenceEvent>, RecordDecideError> {
    if state.is_some() {
        return Err(RecordDecideError::AlreadyExists);
    }
    Ok(vec![AbsenceEvent::AbsenceRecordedV1(AbsenceRecordedV1 {
        absence_id: absence_id.to_string(),
        member_id: member_id.to_string(),
        absence_date: details.absence_date,
        hours: details.hours,
        absence_type: details.absence_type,
        reason: normalize_note(details.reason)?,
        recorded_by: recorded_by.to_string(),
        recorded_at,
    })])
}

pub fn decide_update(
    state: &Absence,
    details: AbsenceDetails,
    updated_by: &str,
    updated_at: i64,
) -> Result<Vec<AbsenceEvent>, RecordDecideError> {
    ensure_editable(state)?;
    Ok(vec![AbsenceEvent::AbsenceUpdatedV1(AbsenceUpdatedV1 {
        absence_date: details.absence_date,
        hours: details.hours,
        absence_type: details.absence_type,
        reason: normalize_note(details.reason)?,
        updated_by: updated_by.to_string(),
        updated_at,
    })])
}

pub fn decide_delete(
    state: &Absence,
    deleted_by: &str,
    deleted_at: i64,
) -> Result<Vec<AbsenceEvent>, RecordDecideError> {
    ensure_editable(state)?;
    Ok(vec![AbsenceEvent::AbsenceDeletedV1(AbsenceDeletedV1 {
        deleted_by: deleted_by.to_string(),
        deleted_at,
    })])
}

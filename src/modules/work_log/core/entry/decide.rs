use crate::modules::work_log::core::entry::events::WorkLogEntryEvent;
use crate::modules::work_log::core::entry::events::v1::{
    WorkLogEntryCreatedV1, WorkLogEntryDeletedV1, WorkLogEntryUpdatedV1,
};
use crate::modules::work_log::core::entry::state::WorkLogEntry;
use crate::modules::work_log::core::record::{RecordDecideError, ensure_editable, normalize_note};
use crate::shared::core::primitives::Hours;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    pub project_id: String,
    pub work_date: NaiveDate,
    pub hours: Hours,
    pub comment: Option<String>,
}

fn normalized(details: EntryDetails) -> Result<EntryDetails, RecordDecideError> {
    let project_id = details.project_id.trim().to_string();
    if project_id.is_empty() {
        return Err(RecordDecideError::Blank("project id"));
    }
    Ok(EntryDetails {
        project_id,
        comment: normalize_note(details.comment)?,
        ..details
    })
}

pub fn decide_create(
    state: Option<&WorkLogEntry>,
    entry_id: &str,
    member_id: &str,
    details: EntryDetails,
    entered_by: &str,
    created_at: i64,
) -> Result<Vec<WorkLogEntryEvent>, RecordDecideError> {
    if state.is_some() {
        return Err(RecordDecideError::AlreadyExists);
    }
    let details = normalized(details)?;
    Ok(vec![WorkLogEntryEvent::WorkLogEntryCreatedV1(
        WorkLogEntryCreatedV1 {
            entry_id: entry_id.to_string(),
            member_id: member_id.to_string(),
            project_id: details.project_id,
            work_date: details.work_date,
            hours: details.hours,
            comment: details.comment,
            entered_by: entered_by.to_string(),
            created_at,
        },
    )])
}

pub fn decide_update(
    state: &WorkLogEntry,
    details: EntryDetails,
    updated_by: &str,
    updated_at: i64,
) -> Result<Vec<WorkLogEntryEvent>, RecordDecideError> {
    ensure_editable(state)?;
    let details = normalized(details)?;
    Ok(vec![WorkLogEntryEvent::WorkLogEntryUpdatedV1(
        WorkLogEntryUpdatedV1 {
            project_id: details.project_id,
            work_date: details.work_date,
            hours: details.hours,
            comment: details.comment,
            updated_by: updated_by.to_string(),
            updated_at,
        },
    )])
}

pub fn decide_delete(
    state: &WorkLogEntry,
    deleted_by: &str,
    deleted_at: i64,
) -> Result<Vec<WorkLogEntryEvent>, RecordDecideError> {
    ensure_editable(state)?;
    Ok(vec![WorkLogEntryEvent::WorkLogEntryDeletedV1(
        WorkLogEntryDeletedV1 {
            deleted_by: deleted_by.to_string(),
            deleted_at,
        },
    )])
}

// What work-log entries and absences have in common.
//
// Purpose
// - The approval workflow moves both kinds of record through the same lifecycle, so it talks to
//   them through `DailyRecord` and one transition decision.
//
// Responsibilities
// - A deleted record accepts nothing.
// - Only DRAFT records are edited or deleted.
// - Status changes follow `RecordStatus::can_transition_to`.

use crate::modules::work_log::core::status::RecordStatus;
use crate::shared::core::aggregate::Aggregate;
use crate::shared::core::primitives::Hours;
use chrono::NaiveDate;

pub const MAX_NOTE_LENGTH: usize = 500;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordDecideError {
    #[error("record already exists")]
    AlreadyExists,

    #[error("record has been deleted")]
    Deleted,

    #[error("record is {0} and can no longer be changed")]
    NotEditable(RecordStatus),

    #[error("record cannot move from {from} to {to}")]
    InvalidTransition { from: RecordStatus, to: RecordStatus },

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("note must be at most {MAX_NOTE_LENGTH} characters, got {0}")]
    NoteTooLong(usize),
}

pub trait DailyRecord: Aggregate {
    /// Human readable kind, used in not-found errors.
    const KIND: &'static str;

    fn member_id(&self) -> &str;
    fn date(&self) -> NaiveDate;
    fn hours(&self) -> Hours;
    fn status(&self) -> RecordStatus;
    fn is_deleted(&self) -> bool;

    fn status_changed(&self, to: RecordStatus, changed_by: &str, changed_at: i64) -> Self::Event;
}

pub fn decide_transition<R: DailyRecord>(
    record: &R,
    to: RecordStatus,
    changed_by: &str,
    changed_at: i64,
) -> Result<Vec<R::Event>, RecordDecideError> {
    if record.is_deleted() {
        return Err(RecordDecideError::Deleted);
    }
    let from = record.status();
    if !from.can_transition_to(to) {
        return Err(RecordDecideError::InvalidTransition { from, to });
    }
    Ok(vec![record.status_changed(to, changed_by, changed_at)])
}

pub fn ensure_editable<R: DailyRecord>(record: &R) -> Result<(), RecordDecideError> {
    if record.is_deleted() {
        return Err(RecordDecideError::Deleted);
    }
    if !record.status().is_editable() {
        return Err(RecordDecideError::NotEditable(record.status()));
    }
    Ok(())
}

/// Trims a free-text note; blank becomes `None`.
pub fn normalize_note(note: Option<String>) -> Result<Option<String>, RecordDecideError> {
    let Some(note) = note else {
        return Ok(None);
    };
    let trimmed = note.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let length = trimmed.chars().count();
    if length > MAX_NOTE_LENGTH {
        return Err(RecordDecideError::NoteTooLong(length));
    }
    Ok(Some(trimmed.to_string()))
}

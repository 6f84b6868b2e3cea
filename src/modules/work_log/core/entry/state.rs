use crate::modules::work_log::core::entry::events::WorkLogEntryEvent;
use crate::modules::work_log::core::entry::events::v1::WorkLogEntryStatusChangedV1;
use crate::modules::work_log::core::record::DailyRecord;
use crate::modules::work_log::core::status::RecordStatus;
use crate::shared::core::aggregate::Aggregate;
use crate::shared::core::primitives::Hours;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLogEntry {
    pub id: String,
    pub member_id: String,
    pub project_id: String,
    pub work_date: NaiveDate,
    pub hours: Hours,
    pub comment: Option<String>,
    pub status: RecordStatus,
    pub entered_by: String,
    pub updated_by: String,
    pub updated_at: i64,
    pub deleted: bool,
}

pub fn evolve(state: Option<WorkLogEntry>, event: &WorkLogEntryEvent) -> Option<WorkLogEntry> {
    match (state, event) {
        (None, WorkLogEntryEvent::WorkLogEntryCreatedV1(e)) => Some(WorkLogEntry {
            id: e.entry_id.clone(),
            member_id: e.member_id.clone(),
            project_id: e.project_id.clone(),
            work_date: e.work_date,
            hours: e.hours,
            comment: e.comment.clone(),
            status: RecordStatus::Draft,
            entered_by: e.entered_by.clone(),
            updated_by: e.entered_by.clone(),
            updated_at: e.created_at,
            deleted: false,
        }),
        (Some(entry), WorkLogEntryEvent::WorkLogEntryUpdatedV1(e)) => Some(WorkLogEntry {
            project_id: e.project_id.clone(),
            work_date: e.work_date,
            hours: e.hours,
            comment: e.comment.clone(),
            updated_by: e.updated_by.clone(),
            updated_at: e.updated_at,
            ..entry
        }),
        (Some(entry), WorkLogEntryEvent::WorkLogEntryDeletedV1(e)) => Some(WorkLogEntry {
            deleted: true,
            updated_by: e.deleted_by.clone(),
            updated_at: e.deleted_at,
            ..entry
        }),
        (Some(entry), WorkLogEntryEvent::WorkLogEntryStatusChangedV1(e)) => Some(WorkLogEntry {
            status: e.to,
            updated_by: e.changed_by.clone(),
            updated_at: e.changed_at,
            ..entry
        }),
        (state, _) => state,
    }
}

impl Aggregate for WorkLogEntry {
    type Event = WorkLogEntryEvent;
    const AGGREGATE_TYPE: &'static str = "work_log_entry";

    fn evolve(state: Option<Self>, event: &WorkLogEntryEvent) -> Option<Self> {
        evolve(state, event)
    }
}

impl DailyRecord for WorkLogEntry {
    const KIND: &'static str = "work log entry";

    fn member_id(&self) -> &str {
        &self.member_id
    }

    fn date(&self) -> NaiveDate {
        self.work_date
    }

    fn hours(&self) -> Hours {
        self.hours
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn status_changed(&self, to: RecordStatus, changed_by: &str, changed_at: i64) -> WorkLogEntryEvent {
        WorkLogEntryEvent::WorkLogEntryStatusChangedV1(WorkLogEntryStatusChangedV1 {
            from: self.status,
            to,
            changed_by: changed_by.to_string(),
            changed_at,
        })
    }
}

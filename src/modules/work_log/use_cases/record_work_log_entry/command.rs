use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateWorkLogEntry {
    pub member_id: String,
    pub project_id: String,
    pub work_date: NaiveDate,
    pub hours: f64,
    pub comment: Option<String>,
    pub entered_by: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateWorkLogEntry {
    pub entry_id: String,
    /// Version the caller last read; a newer stream fails with a concurrency conflict.
    pub expected_version: i64,
    pub project_id: String,
    pub work_date: NaiveDate,
    pub hours: f64,
    pub comment: Option<String>,
    pub updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteWorkLogEntry {
    pub entry_id: String,
    pub expected_version: i64,
    pub deleted_by: String,
}

use crate::modules::work_log::core::absence::state::AbsenceType;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordAbsence {
    pub member_id: String,
    pub absence_date: NaiveDate,
    pub hours: f64,
    pub absence_type: AbsenceType,
    pub reason: Option<String>,
    pub recorded_by: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAbsence {
    pub absence_id: String,
    pub expected_version: i64,
    pub absence_date: NaiveDate,
    pub hours: f64,
    pub absence_type: AbsenceType,
    pub reason: Option<String>,
    pub updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAbsence {
    pub absence_id: String,
    pub expected_version: i64,
    pub deleted_by: String,
}

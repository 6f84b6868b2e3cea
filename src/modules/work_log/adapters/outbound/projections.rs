// Read models for work-log entries and absences.
//
// Responsibilities
// - Projections upsert the row for a live record and remove it once the record is deleted, so
//   every query here only ever sees live records.
// - Dates are stored as ISO-8601 text; range filters compare them lexically.
// - Hours are stored as quarter-hour counts.

use crate::modules::work_log::core::absence::state::{Absence, AbsenceType};
use crate::modules::work_log::core::entry::state::WorkLogEntry;
use crate::modules::work_log::core::status::RecordStatus;
use crate::shared::core::primitives::Hours;
use crate::shared::infrastructure::repository::Projection;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

/// Where one kind of daily record is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTable {
    pub table: &'static str,
    pub date_column: &'static str,
}

pub const ENTRIES: RecordTable = RecordTable {
    table: "work_log_entries",
    date_column: "work_date",
};

pub const ABSENCES: RecordTable = RecordTable {
    table: "absences",
    date_column: "absence_date",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLogEntryView {
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
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceView {
    pub id: String,
    pub member_id: String,
    pub absence_date: NaiveDate,
    pub hours: Hours,
    pub absence_type: AbsenceType,
    pub reason: Option<String>,
    pub status: RecordStatus,
    pub recorded_by: String,
    pub updated_by: String,
    pub updated_at: i64,
    pub version: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkLogEntryProjection;

#[async_trait]
impl Projection<WorkLogEntry> for WorkLogEntryProjection {
    async fn project(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        version: i64,
        state: &WorkLogEntry,
    ) -> Result<(), sqlx::Error> {
        if state.deleted {
            sqlx::query("DELETE FROM work_log_entries WHERE id = ?1")
                .bind(id)
                .execute(&mut *conn)
                .await?;
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO work_log_entries
                (id, member_id, project_id, work_date, quarter_hours, comment, status,
                 entered_by, updated_by, updated_at, version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(id) DO UPDATE SET
                project_id = excluded.project_id,
                work_date = excluded.work_date,
                quarter_hours = excluded.quarter_hours,
                comment = excluded.comment,
                status = excluded.status,
                updated_by = excluded.updated_by,
                updated_at = excluded.updated_at,
                version = excluded.version",
        )
        .bind(id)
        .bind(&state.member_id)
        .bind(&state.project_id)
        .bind(state.work_date)
        .bind(i64::from(state.hours.quarters()))
        .bind(&state.comment)
        .bind(state.status.as_str())
        .bind(&state.entered_by)
        .bind(&state.updated_by)
        .bind(state.updated_at)
        .bind(version)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AbsenceProjection;

#[async_trait]
impl Projection<Absence> for AbsenceProjection {
    async fn project(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        version: i64,
        state: &Absence,
    ) -> Result<(), sqlx::Error> {
        if state.deleted {
            sqlx::query("DELETE FROM absences WHERE id = ?1")
                .bind(id)
                .execute(&mut *conn)
                .await?;
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO absences
                (id, member_id, absence_date, quarter_hours, absence_type, reason, status,
                 recorded_by, updated_by, updated_at, version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(id) DO UPDATE SET
                absence_date = excluded.absence_date,
                quarter_hours = excluded.quarter_hours,
                absence_type = excluded.absence_type,
                reason = excluded.reason,
                status = excluded.status,
                updated_by = excluded.updated_by,
                updated_at = excluded.updated_at,
                version = excluded.version",
        )
        .bind(id)
        .bind(&state.member_id)
        .bind(state.absence_date)
        .bind(i64::from(state.hours.quarters()))
        .bind(state.absence_type.as_str())
        .bind(&state.reason)
        .bind(state.status.as_str())
        .bind(&state.recorded_by)
        .bind(&state.updated_by)
        .bind(state.updated_at)
        .bind(version)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

fn decode_error(e: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(e))
}

fn hours_from_row(row: &SqliteRow) -> Result<Hours, sqlx::Error> {
    let quarters: i64 = row.try_get("quarter_hours")?;
    Ok(Hours::from_quarters(
        u32::try_from(quarters).map_err(decode_error)?,
    ))
}

fn status_from_row(row: &SqliteRow) -> Result<RecordStatus, sqlx::Error> {
    let raw: String = row.try_get("status")?;
    raw.parse().map_err(decode_error)
}

fn entry_from_row(row: &SqliteRow) -> Result<WorkLogEntryView, sqlx::Error> {
    Ok(WorkLogEntryView {
        id: row.try_get("id")?,
        member_id: row.try_get("member_id")?,
        project_id: row.try_get("project_id")?,
        work_date: row.try_get("work_date")?,
        hours: hours_from_row(row)?,
        comment: row.try_get("comment")?,
        status: status_from_row(row)?,
        entered_by: row.try_get("entered_by")?,
        updated_by: row.try_get("updated_by")?,
        updated_at: row.try_get("updated_at")?,
        version: row.try_get("version")?,
    })
}

fn absence_from_row(row: &SqliteRow) -> Result<AbsenceView, sqlx::Error> {
    let absence_type: String = row.try_get("absence_type")?;
    Ok(AbsenceView {
        id: row.try_get("id")?,
        member_id: row.try_get("member_id")?,
        absence_date: row.try_get("absence_date")?,
        hours: hours_from_row(row)?,
        absence_type: absence_type.parse().map_err(decode_error)?,
        reason: row.try_get("reason")?,
        status: status_from_row(row)?,
        recorded_by: row.try_get("recorded_by")?,
        updated_by: row.try_get("updated_by")?,
        updated_at: row.try_get("updated_at")?,
        version: row.try_get("version")?,
    })
}

const ENTRY_COLUMNS: &str = "id, member_id, project_id, work_date, quarter_hours, comment, status, \
     entered_by, updated_by, updated_at, version";

const ABSENCE_COLUMNS: &str = "id, member_id, absence_date, quarter_hours, absence_type, reason, \
     status, recorded_by, updated_by, updated_at, version";

pub async fn find_entry(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<WorkLogEntryView>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {ENTRY_COLUMNS} FROM work_log_entries WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(entry_from_row).transpose()
}

pub async fn find_absence(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<AbsenceView>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {ABSENCE_COLUMNS} FROM absences WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(absence_from_row).transpose()
}

pub async fn entries_in_range(
    conn: &mut SqliteConnection,
    member_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<WorkLogEntryView>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {ENTRY_COLUMNS} FROM work_log_entries
         WHERE member_id = ?1 AND work_date BETWEEN ?2 AND ?3
         ORDER BY work_date, id"
    ))
    .bind(member_id)
    .bind(start)
    .bind(end)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(entry_from_row).collect()
}

pub async fn absences_in_range(
    conn: &mut SqliteConnection,
    member_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<AbsenceView>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {ABSENCE_COLUMNS} FROM absences
         WHERE member_id = ?1 AND absence_date BETWEEN ?2 AND ?3
         ORDER BY absence_date, id"
    ))
    .bind(member_id)
    .bind(start)
    .bind(end)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(absence_from_row).collect()
}

/// Ids of live records dated inside `start..=end`.
pub async fn ids_in_range(
    conn: &mut SqliteConnection,
    table: RecordTable,
    member_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(&format!(
        "SELECT id FROM {table} WHERE member_id = ?1 AND {date} BETWEEN ?2 AND ?3 ORDER BY {date}, id",
        table = table.table,
        date = table.date_column,
    ))
    .bind(member_id)
    .bind(start)
    .bind(end)
    .fetch_all(&mut *conn)
    .await
}

pub async fn ids_on_date(
    conn: &mut SqliteConnection,
    table: RecordTable,
    member_id: &str,
    date: NaiveDate,
    status: RecordStatus,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(&format!(
        "SELECT id FROM {table} WHERE member_id = ?1 AND {date} = ?2 AND status = ?3 ORDER BY id",
        table = table.table,
        date = table.date_column,
    ))
    .bind(member_id)
    .bind(date)
    .bind(status.as_str())
    .fetch_all(&mut *conn)
    .await
}

/// Hours recorded for the member on `date`, leaving out `exclude_id`.
pub async fn sum_hours(
    conn: &mut SqliteConnection,
    table: RecordTable,
    member_id: &str,
    date: NaiveDate,
    exclude_id: Option<&str>,
) -> Result<Hours, sqlx::Error> {
    let quarters = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COALESCE(SUM(quarter_hours), 0) FROM {table}
         WHERE member_id = ?1 AND {date} = ?2 AND (?3 IS NULL OR id <> ?3)",
        table = table.table,
        date = table.date_column,
    ))
    .bind(member_id)
    .bind(date)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(Hours::from_quarters(
        u32::try_from(quarters).map_err(decode_error)?,
    ))
}

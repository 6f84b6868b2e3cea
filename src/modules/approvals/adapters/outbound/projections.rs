use crate::modules::approvals::core::state::{ApprovalStatus, MonthlyApproval};
use crate::shared::core::primitives::FiscalMonth;
use crate::shared::infrastructure::repository::Projection;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteConnection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyApprovalView {
    pub id: String,
    pub member_id: String,
    pub fiscal_month_start: NaiveDate,
    pub fiscal_month_end: NaiveDate,
    pub status: ApprovalStatus,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<i64>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub rejection_reason: Option<String>,
    pub work_log_entry_ids: Vec<String>,
    pub absence_ids: Vec<String>,
    pub version: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyApprovalProjection;

#[async_trait]
impl Projection<MonthlyApproval> for MonthlyApprovalProjection {
    async fn project(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        version: i64,
        state: &MonthlyApproval,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO monthly_approvals
                (id, member_id, fiscal_month_start, fiscal_month_end, status, submitted_by,
                 submitted_at, reviewed_by, reviewed_at, rejection_reason, work_log_entry_ids,
                 absence_ids, version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             ON CONFLICT(id) DO UPDATE SET
                status = excluded.status,
                submitted_by = excluded.submitted_by,
                submitted_at = excluded.submitted_at,
                reviewed_by = excluded.reviewed_by,
                reviewed_at = excluded.reviewed_at,
                rejection_reason = excluded.rejection_reason,
                work_log_entry_ids = excluded.work_log_entry_ids,
                absence_ids = excluded.absence_ids,
                version = excluded.version",
        )
        .bind(id)
        .bind(&state.member_id)
        .bind(state.fiscal_month.start())
        .bind(state.fiscal_month.end())
        .bind(state.status.as_str())
        .bind(&state.submitted_by)
        .bind(state.submitted_at)
        .bind(&state.reviewed_by)
        .bind(state.reviewed_at)
        .bind(&state.rejection_reason)
        .bind(Json(&state.work_log_entry_ids))
        .bind(Json(&state.absence_ids))
        .bind(version)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

const COLUMNS: &str = "id, member_id, fiscal_month_start, fiscal_month_end, status, submitted_by, \
     submitted_at, reviewed_by, reviewed_at, rejection_reason, work_log_entry_ids, absence_ids, version";

fn approval_from_row(row: &SqliteRow) -> Result<MonthlyApprovalView, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let Json(work_log_entry_ids) = row.try_get::<Json<Vec<String>>, _>("work_log_entry_ids")?;
    let Json(absence_ids) = row.try_get::<Json<Vec<String>>, _>("absence_ids")?;
    Ok(MonthlyApprovalView {
        id: row.try_get("id")?,
        member_id: row.try_get("member_id")?,
        fiscal_month_start: row.try_get("fiscal_month_start")?,
        fiscal_month_end: row.try_get("fiscal_month_end")?,
        status: status
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        submitted_by: row.try_get("submitted_by")?,
        submitted_at: row.try_get("submitted_at")?,
        reviewed_by: row.try_get("reviewed_by")?,
        reviewed_at: row.try_get("reviewed_at")?,
        rejection_reason: row.try_get("rejection_reason")?,
        work_log_entry_ids,
        absence_ids,
        version: row.try_get("version")?,
    })
}

pub async fn find_approval(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<MonthlyApprovalView>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM monthly_approvals WHERE id = ?1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(approval_from_row).transpose()
}

pub async fn find_id_for_month(
    conn: &mut SqliteConnection,
    member_id: &str,
    fiscal_month: &FiscalMonth,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT id FROM monthly_approvals
         WHERE member_id = ?1 AND fiscal_month_start = ?2 AND fiscal_month_end = ?3",
    )
    .bind(member_id)
    .bind(fiscal_month.start())
    .bind(fiscal_month.end())
    .fetch_optional(&mut *conn)
    .await
}

/// Another approval of the member whose fiscal month shares a day with `fiscal_month` without
/// being the same period.
pub async fn find_overlapping(
    conn: &mut SqliteConnection,
    member_id: &str,
    fiscal_month: &FiscalMonth,
) -> Result<Option<MonthlyApprovalView>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM monthly_approvals
         WHERE member_id = ?1 AND fiscal_month_start <= ?3 AND fiscal_month_end >= ?2
           AND NOT (fiscal_month_start = ?2 AND fiscal_month_end = ?3)
         ORDER BY fiscal_month_start
         LIMIT 1"
    ))
    .bind(member_id)
    .bind(fiscal_month.start())
    .bind(fiscal_month.end())
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(approval_from_row).transpose()
}

/// The approval whose fiscal month contains `date`, if one was ever opened.
pub async fn find_covering(
    conn: &mut SqliteConnection,
    member_id: &str,
    date: NaiveDate,
) -> Result<Option<MonthlyApprovalView>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM monthly_approvals
         WHERE member_id = ?1 AND fiscal_month_start <= ?2 AND fiscal_month_end >= ?2
         ORDER BY fiscal_month_start DESC
         LIMIT 1"
    ))
    .bind(member_id)
    .bind(date)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(approval_from_row).transpose()
}

pub async fn list_for_members(
    conn: &mut SqliteConnection,
    member_ids: &[String],
    status: ApprovalStatus,
) -> Result<Vec<MonthlyApprovalView>, sqlx::Error> {
    if member_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM monthly_approvals
         WHERE status = ?1 AND member_id IN (SELECT value FROM json_each(?2))
         ORDER BY fiscal_month_start, member_id"
    ))
    .bind(status.as_str())
    .bind(Json(member_ids))
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(approval_from_row).collect()
}

pub async fn list_for_member(
    conn: &mut SqliteConnection,
    member_id: &str,
) -> Result<Vec<MonthlyApprovalView>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM monthly_approvals WHERE member_id = ?1 ORDER BY fiscal_month_start"
    ))
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(approval_from_row).collect()
}

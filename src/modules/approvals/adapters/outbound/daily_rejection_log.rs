// Daily rejection log: the latest rejection of one member-day. Not event-sourced; a later
// rejection of the same day overwrites the row.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteConnection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRejection {
    pub member_id: String,
    pub work_date: NaiveDate,
    pub rejected_by: String,
    pub rejection_reason: String,
    pub affected_entry_ids: Vec<String>,
    pub created_at: i64,
}

pub async fn upsert(
    conn: &mut SqliteConnection,
    rejection: &DailyRejection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO daily_rejection_logs
            (member_id, work_date, rejected_by, rejection_reason, affected_entry_ids, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(member_id, work_date) DO UPDATE SET
            rejected_by = excluded.rejected_by,
            rejection_reason = excluded.rejection_reason,
            affected_entry_ids = excluded.affected_entry_ids,
            created_at = excluded.created_at",
    )
    .bind(&rejection.member_id)
    .bind(rejection.work_date)
    .bind(&rejection.rejected_by)
    .bind(&rejection.rejection_reason)
    .bind(Json(&rejection.affected_entry_ids))
    .bind(rejection.created_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

fn rejection_from_row(row: &SqliteRow) -> Result<DailyRejection, sqlx::Error> {
    let Json(affected_entry_ids) = row.try_get::<Json<Vec<String>>, _>("affected_entry_ids")?;
    Ok(DailyRejection {
        member_id: row.try_get("member_id")?,
        work_date: row.try_get("work_date")?,
        rejected_by: row.try_get("rejected_by")?,
        rejection_reason: row.try_get("rejection_reason")?,
        affected_entry_ids,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn find(
    conn: &mut SqliteConnection,
    member_id: &str,
    work_date: NaiveDate,
) -> Result<Option<DailyRejection>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT member_id, work_date, rejected_by, rejection_reason, affected_entry_ids, created_at
         FROM daily_rejection_logs WHERE member_id = ?1 AND work_date = ?2",
    )
    .bind(member_id)
    .bind(work_date)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(rejection_from_row).transpose()
}

pub async fn list_in_range(
    conn: &mut SqliteConnection,
    member_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyRejection>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT member_id, work_date, rejected_by, rejection_reason, affected_entry_ids, created_at
         FROM daily_rejection_logs
         WHERE member_id = ?1 AND work_date BETWEEN ?2 AND ?3
         ORDER BY work_date",
    )
    .bind(member_id)
    .bind(start)
    .bind(end)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(rejection_from_row).collect()
}

// Per member-day counter for day notices. It only ever grows, whatever happens to the day's
// records, and is bumped inside the operation's transaction.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

/// Advances the counter of `member_id` on `date` and returns the new value, starting at 1.
pub async fn next(
    conn: &mut SqliteConnection,
    member_id: &str,
    date: NaiveDate,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO day_notice_sequences (member_id, work_date, sequence)
         VALUES (?1, ?2, 1)
         ON CONFLICT(member_id, work_date) DO UPDATE SET sequence = sequence + 1
         RETURNING sequence",
    )
    .bind(member_id)
    .bind(date)
    .fetch_one(&mut *conn)
    .await
}

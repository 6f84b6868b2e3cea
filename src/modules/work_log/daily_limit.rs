// Combined 24h limit across work-log entries and absences.
//
// Responsibilities
// - Sums both projection tables for one member and day, leaving out the record being replaced,
//   and refuses a candidate that would push the total past 24h.
// - Runs on the caller's transaction, before the guarded write, so the read and the write
//   commit together.

use crate::modules::work_log::adapters::outbound::projections::{ABSENCES, ENTRIES, sum_hours};
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::Hours;
use chrono::NaiveDate;
use sqlx::SqliteConnection;

pub async fn validate_combined_daily_limit(
    conn: &mut SqliteConnection,
    member_id: &str,
    date: NaiveDate,
    candidate: Hours,
    exclude_id: Option<&str>,
) -> Result<(), ApplicationError> {
    let entries = sum_hours(conn, ENTRIES, member_id, date, exclude_id).await?;
    let absences = sum_hours(conn, ABSENCES, member_id, date, exclude_id).await?;
    let existing = entries + absences;
    if existing + candidate > Hours::DAILY_LIMIT {
        tracing::debug!(member_id, %date, %existing, %candidate, "daily limit exceeded");
        return Err(ApplicationError::DailyLimitExceeded {
            member_id: member_id.to_string(),
            date,
            existing,
            requested: candidate,
        });
    }
    Ok(())
}

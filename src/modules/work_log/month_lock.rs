// A submitted or approved month takes no new records. Records already inside it move only
// through the approval workflow, and may not leave it by a change of date: the approval keeps
// their ids until it is reviewed.

use crate::modules::approvals::adapters::outbound::projections::find_covering;
use crate::shared::application::errors::ApplicationError;
use chrono::NaiveDate;
use sqlx::SqliteConnection;

pub async fn ensure_month_open(
    conn: &mut SqliteConnection,
    member_id: &str,
    date: NaiveDate,
) -> Result<(), ApplicationError> {
    if let Some(approval) = find_covering(conn, member_id, date).await? {
        if approval.status.locks_records() {
            return Err(ApplicationError::Domain(format!(
                "fiscal month {}..{} is {}; no records can be added for {date}",
                approval.fiscal_month_start, approval.fiscal_month_end, approval.status
            )));
        }
    }
    Ok(())
}

/// Checks a record moving from `from` to `to`. Both ends must allow it: the target month must
/// be open, and a locked source month keeps the record inside its range.
pub async fn ensure_date_move_allowed(
    conn: &mut SqliteConnection,
    member_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(), ApplicationError> {
    if from == to {
        return Ok(());
    }
    if let Some(source) = find_covering(conn, member_id, from).await? {
        let stays = source.fiscal_month_start <= to && to <= source.fiscal_month_end;
        if stays {
            return Ok(());
        }
        if source.status.locks_records() {
            return Err(ApplicationError::Domain(format!(
                "fiscal month {}..{} is {}; a record on {from} cannot move to {to}",
                source.fiscal_month_start, source.fiscal_month_end, source.status
            )));
        }
    }
    ensure_month_open(conn, member_id, to).await
}

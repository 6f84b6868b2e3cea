// Bulk status change over daily records inside the caller's transaction.
//
// Responsibilities
// - Records that are gone or already in the target status are passed over.
// - A record in an unexpected status is either passed over or fails the whole operation,
//   depending on the caller. Nothing is written until the caller commits.

use crate::modules::work_log::core::record::{DailyRecord, decide_transition};
use crate::modules::work_log::core::status::RecordStatus;
use crate::shared::application::errors::ApplicationError;
use crate::shared::infrastructure::repository::{AggregateRepository, Projection};
use sqlx::SqliteConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMismatch {
    Skip,
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub struct StatusChange<'a> {
    pub from: RecordStatus,
    pub to: RecordStatus,
    pub on_mismatch: OnMismatch,
    pub changed_by: &'a str,
    pub changed_at: i64,
}

/// Returns the ids that actually changed.
pub async fn transition_records<R, P>(
    conn: &mut SqliteConnection,
    repository: &AggregateRepository<R, P>,
    ids: &[String],
    change: StatusChange<'_>,
) -> Result<Vec<String>, ApplicationError>
where
    R: DailyRecord,
    P: Projection<R>,
{
    let mut changed = Vec::new();
    for id in ids {
        let Some(mut record) = repository.load(conn, id).await? else {
            continue;
        };
        let Some(state) = record.state().cloned() else {
            continue;
        };
        if state.is_deleted() || state.status() == change.to {
            continue;
        }
        if state.status() != change.from {
            match change.on_mismatch {
                OnMismatch::Skip => continue,
                OnMismatch::Fail => {
                    return Err(ApplicationError::Domain(format!(
                        "{} {id} on {} is {}, expected {}",
                        R::KIND,
                        state.date(),
                        state.status(),
                        change.from
                    )));
                }
            }
        }
        let events = decide_transition(&state, change.to, change.changed_by, change.changed_at)
            .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        record.record(events);
        repository.save(conn, &mut record).await?;
        changed.push(id.clone());
    }
    Ok(changed)
}

// Work-log entry use cases: create, update, delete.
//
// Responsibilities
// - Proxy permission is checked against the member directory before a transaction is opened.
// - Inside one transaction: month lock, combined daily limit, decide, append plus projection.
// - Updates and deletes carry the version the caller read; a newer stream is a conflict.

use crate::modules::members::core::ports::MemberDirectory;
use crate::modules::members::permissions::ensure_may_act_for;
use crate::modules::work_log::adapters::outbound::projections::{
    WorkLogEntryProjection, find_entry,
};
use crate::modules::work_log::core::entry::decide::{
    EntryDetails, decide_create, decide_delete, decide_update,
};
use crate::modules::work_log::core::entry::state::WorkLogEntry;
use crate::modules::work_log::daily_limit::validate_combined_daily_limit;
use crate::modules::work_log::month_lock::{ensure_date_move_allowed, ensure_month_open};
use crate::modules::work_log::use_cases::record_work_log_entry::command::{
    CreateWorkLogEntry, DeleteWorkLogEntry, UpdateWorkLogEntry,
};
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::aggregate::Tracked;
use crate::shared::core::primitives::{Hours, new_id, now_millis};
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::repository::AggregateRepository;
use sqlx::{Sqlite, Transaction};
use std::sync::Arc;

pub struct WorkLogEntryHandler {
    db: Database,
    directory: Arc<dyn MemberDirectory>,
    repository: AggregateRepository<WorkLogEntry, WorkLogEntryProjection>,
}

impl WorkLogEntryHandler {
    pub fn new(db: Database, directory: Arc<dyn MemberDirectory>) -> Self {
        Self {
            db,
            directory,
            repository: AggregateRepository::new(WorkLogEntryProjection),
        }
    }

    #[tracing::instrument(skip(self, command), fields(member_id = %command.member_id, date = %command.work_date))]
    pub async fn create(&self, command: CreateWorkLogEntry) -> Result<String, ApplicationError> {
        let hours = Hours::from_hours(command.hours)?;
        ensure_may_act_for(&*self.directory, &command.entered_by, &command.member_id).await?;

        let mut tx = self.db.begin().await?;
        ensure_month_open(&mut *tx, &command.member_id, command.work_date).await?;
        validate_combined_daily_limit(&mut *tx, &command.member_id, command.work_date, hours, None)
            .await?;

        let id = new_id();
        let events = decide_create(
            None,
            &id,
            &command.member_id,
            EntryDetails {
                project_id: command.project_id,
                work_date: command.work_date,
                hours,
                comment: command.comment,
            },
            &command.entered_by,
            now_millis(),
        )
        .map_err(|e| ApplicationError::Domain(e.to_string()))?;

        let mut entry = Tracked::<WorkLogEntry>::new(&id);
        entry.record(events);
        self.repository.save(&mut *tx, &mut entry).await?;
        tx.commit().await?;
        tracing::info!(entry_id = %id, %hours, entered_by = %command.entered_by, "work log entry created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, command), fields(entry_id = %command.entry_id))]
    pub async fn update(&self, command: UpdateWorkLogEntry) -> Result<i64, ApplicationError> {
        let hours = Hours::from_hours(command.hours)?;
        let member_id = self.owner_of(&command.entry_id).await?;
        ensure_may_act_for(&*self.directory, &command.updated_by, &member_id).await?;

        let mut tx = self.db.begin().await?;
        let mut entry = self
            .load_expected(&mut tx, &command.entry_id, command.expected_version)
            .await?;
        let current = entry
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("work log entry", &command.entry_id))?;
        ensure_date_move_allowed(&mut *tx, &member_id, current.work_date, command.work_date)
            .await?;
        validate_combined_daily_limit(
            &mut *tx,
            &member_id,
            command.work_date,
            hours,
            Some(&command.entry_id),
        )
        .await?;

        let events = decide_update(
            &current,
            EntryDetails {
                project_id: command.project_id,
                work_date: command.work_date,
                hours,
                comment: command.comment,
            },
            &command.updated_by,
            now_millis(),
        )
        .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        entry.record(events);
        let version = self.repository.save(&mut *tx, &mut entry).await?;
        tx.commit().await?;
        tracing::info!(version, updated_by = %command.updated_by, "work log entry updated");
        Ok(version)
    }

    #[tracing::instrument(skip(self, command), fields(entry_id = %command.entry_id))]
    pub async fn delete(&self, command: DeleteWorkLogEntry) -> Result<(), ApplicationError> {
        let member_id = self.owner_of(&command.entry_id).await?;
        ensure_may_act_for(&*self.directory, &command.deleted_by, &member_id).await?;

        let mut tx = self.db.begin().await?;
        let mut entry = self
            .load_expected(&mut tx, &command.entry_id, command.expected_version)
            .await?;
        let current = entry
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("work log entry", &command.entry_id))?;
        let events = decide_delete(&current, &command.deleted_by, now_millis())
            .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        entry.record(events);
        self.repository.save(&mut *tx, &mut entry).await?;
        tx.commit().await?;
        tracing::info!(deleted_by = %command.deleted_by, "work log entry deleted");
        Ok(())
    }

    async fn owner_of(&self, entry_id: &str) -> Result<String, ApplicationError> {
        let mut conn = self.db.acquire().await?;
        find_entry(&mut conn, entry_id)
            .await?
            .map(|view| view.member_id)
            .ok_or_else(|| ApplicationError::not_found("work log entry", entry_id))
    }

    async fn load_expected(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
        entry_id: &str,
        expected_version: i64,
    ) -> Result<Tracked<WorkLogEntry>, ApplicationError> {
        let entry = self
            .repository
            .load(&mut **tx, entry_id)
            .await?
            .filter(|e| e.state().is_some_and(|s| !s.deleted))
            .ok_or_else(|| ApplicationError::not_found("work log entry", entry_id))?;
        if entry.version() != expected_version {
            return Err(ApplicationError::ConcurrencyConflict {
                stream_id: entry_id.to_string(),
                expected: expected_version,
                actual: entry.version(),
            });
        }
        Ok(entry)
    }
}

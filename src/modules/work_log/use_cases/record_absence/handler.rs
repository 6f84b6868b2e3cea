use crate::modules::members::core::ports::MemberDirectory;
use crate::modules::members::permissions::ensure_may_act_for;
use crate::modules::work_log::adapters::outbound::projections::{AbsenceProjection, find_absence};
use crate::modules::work_log::core::absence::decide::{
    AbsenceDetails, decide_delete, decide_record, decide_update,
};
use crate::modules::work_log::core::absence::state::Absence;
use crate::modules::work_log::daily_limit::validate_combined_daily_limit;
use crate::modules::work_log::month_lock::{ensure_date_move_allowed, ensure_month_open};
use crate::modules::work_log::use_cases::record_absence::command::{
    DeleteAbsence, RecordAbsence, UpdateAbsence,
};
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::aggregate::Tracked;
use crate::shared::core::primitives::{Hours, new_id, now_millis};
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::repository::AggregateRepository;
use sqlx::{Sqlite, Transaction};
use std::sync::Arc;

pub struct AbsenceHandler {
    db: Database,
    directory: Arc<dyn MemberDirectory>,
    repository: AggregateRepository<Absence, AbsenceProjection>,
}

impl AbsenceHandler {
    pub fn new(db: Database, directory: Arc<dyn MemberDirectory>) -> Self {
        Self {
            db,
            directory,
            repository: AggregateRepository::new(AbsenceProjection),
        }
    }

    #[tracing::instrument(skip(self, command), fields(member_id = %command.member_id, date = %command.absence_date))]
    pub async fn record(&self, command: RecordAbsence) -> Result<String, ApplicationError> {
        let hours = Hours::from_hours(command.hours)?;
        ensure_may_act_for(&*self.directory, &command.recorded_by, &command.member_id).await?;

        let mut tx = self.db.begin().await?;
        ensure_month_open(&mut *tx, &command.member_id, command.absence_date).await?;
        validate_combined_daily_limit(
            &mut *tx,
            &command.member_id,
            command.absence_date,
            hours,
            None,
        )
        .await?;

        let id = new_id();
        let events = decide_record(
            None,
            &id,
            &command.member_id,
            AbsenceDetails {
                absence_date: command.absence_date,
                hours,
                absence_type: command.absence_type,
                reason: command.reason,
            },
            &command.recorded_by,
            now_millis(),
        )
        .map_err(|e| ApplicationError::Domain(e.to_string()))?;

        let mut absence = Tracked::<Absence>::new(&id);
        absence.record(events);
        self.repository.save(&mut *tx, &mut absence).await?;
        tx.commit().await?;
        tracing::info!(absence_id = %id, %hours, absence_type = %command.absence_type, "absence recorded");
        Ok(id)
    }

    #[tracing::instrument(skip(self, command), fields(absence_id = %command.absence_id))]
    pub async fn update(&self, command: UpdateAbsence) -> Result<i64, ApplicationError> {
        let hours = Hours::from_hours(command.hours)?;
        let member_id = self.owner_of(&command.absence_id).await?;
        ensure_may_act_for(&*self.directory, &command.updated_by, &member_id).await?;

        let mut tx = self.db.begin().await?;
        let mut absence = self
            .load_expected(&mut tx, &command.absence_id, command.expected_version)
            .await?;
        let current = absence
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("absence", &command.absence_id))?;
        ensure_date_move_allowed(&mut *tx, &member_id, current.absence_date, command.absence_date)
            .await?;
        validate_combined_daily_limit(
            &mut *tx,
            &member_id,
            command.absence_date,
            hours,
            Some(&command.absence_id),
        )
        .await?;

        let events = decide_update(
            &current,
            AbsenceDetails {
                absence_date: command.absence_date,
                hours,
                absence_type: command.absence_type,
                reason: command.reason,
            },
            &command.updated_by,
            now_millis(),
        )
        .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        absence.record(events);
        let version = self.repository.save(&mut *tx, &mut absence).await?;
        tx.commit().await?;
        tracing::info!(version, updated_by = %command.updated_by, "absence updated");
        Ok(version)
    }

    #[tracing::instrument(skip(self, command), fields(absence_id = %command.absence_id))]
    pub async fn delete(&self, command: DeleteAbsence) -> Result<(), ApplicationError> {
        let member_id = self.owner_of(&command.absence_id).await?;
        ensure_may_act_for(&*self.directory, &command.deleted_by, &member_id).await?;

        let mut tx = self.db.begin().await?;
        let mut absence = self
            .load_expected(&mut tx, &command.absence_id, command.expected_version)
            .await?;
        let current = absence
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("absence", &command.absence_id))?;
        let events = decide_delete(&current, &command.deleted_by, now_millis())
            .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        absence.record(events);
        self.repository.save(&mut *tx, &mut absence).await?;
        tx.commit().await?;
        tracing::info!(deleted_by = %command.deleted_by, "absence deleted");
        Ok(())
    }

    async fn owner_of(&self, absence_id: &str) -> Result<String, ApplicationError> {
        let mut conn = self.db.acquire().await?;
        find_absence(&mut conn, absence_id)
            .await?
            .map(|view| view.member_id)
            .ok_or_else(|| ApplicationError::not_found("absence", absence_id))
    }

    async fn load_expected(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
        absence_id: &str,
        expected_version: i64,
    ) -> Result<Tracked<Absence>, ApplicationError> {
        let absence = self
            .repository
            .load(&mut **tx, absence_id)
            .await?
            .filter(|a| a.state().is_some_and(|s| !s.deleted))
            .ok_or_else(|| ApplicationError::not_found("absence", absence_id))?;
        if absence.version() != expected_version {
            return Err(ApplicationError::ConcurrencyConflict {
                stream_id: absence_id.to_string(),
                expected: expected_version,
                actual: absence.version(),
            });
        }
        Ok(absence)
    }
}

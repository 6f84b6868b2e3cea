// Organization management.
//
// Responsibilities
// - Each operation runs in its own transaction: load by replay, decide, save with projection.
// - Code uniqueness per tenant is checked against the projection and backed by its unique index,
//   so a lost race surfaces as `Conflict`.

use crate::modules::organizations::adapters::outbound::projections::{
    OrganizationProjection, count_active_children, find_organization_by_code,
};
use crate::modules::organizations::core::decide::{
    CreateOrganization, decide_activate, decide_create, decide_deactivate, decide_rename,
};
use crate::modules::organizations::core::state::Organization;
use crate::modules::organizations::use_cases::manage_organization::command::{
    CreateOrganizationCommand, RenameOrganization,
};
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::aggregate::Tracked;
use crate::shared::core::primitives::{new_id, now_millis};
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::repository::AggregateRepository;

type OrganizationRepository = AggregateRepository<Organization, OrganizationProjection>;

pub struct OrganizationService {
    db: Database,
    repository: OrganizationRepository,
}

impl OrganizationService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            repository: AggregateRepository::new(OrganizationProjection),
        }
    }

    #[tracing::instrument(skip(self, command), fields(tenant_id = %command.tenant_id, code = %command.code))]
    pub async fn create(&self, command: CreateOrganizationCommand) -> Result<String, ApplicationError> {
        let mut tx = self.db.begin().await?;

        if find_organization_by_code(&mut *tx, &command.tenant_id, &command.code)
            .await?
            .is_some()
        {
            return Err(ApplicationError::Conflict(format!(
                "organization code {} already exists",
                command.code
            )));
        }

        let parent = match command.parent_id.as_deref() {
            Some(parent_id) => Some(
                self.repository
                    .load(&mut *tx, parent_id)
                    .await?
                    .and_then(Tracked::into_state)
                    .ok_or_else(|| ApplicationError::not_found("organization", parent_id))?,
            ),
            None => None,
        };

        let id = new_id();
        let events = decide_create(
            None,
            parent.as_ref(),
            CreateOrganization {
                organization_id: id.clone(),
                tenant_id: command.tenant_id,
                parent_id: command.parent_id,
                code: command.code,
                name: command.name,
                created_by: command.created_by,
                created_at: now_millis(),
            },
        )
        .map_err(|e| ApplicationError::Domain(e.to_string()))?;

        let mut organization = Tracked::<Organization>::new(&id);
        organization.record(events);
        self.repository.save(&mut *tx, &mut organization).await?;
        tx.commit().await?;
        tracing::info!(organization_id = %id, "organization created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, command), fields(organization_id = %command.organization_id))]
    pub async fn rename(&self, command: RenameOrganization) -> Result<(), ApplicationError> {
        let mut tx = self.db.begin().await?;
        let mut organization = self.load(&mut tx, &command.organization_id).await?;
        let state = organization.state().cloned().ok_or_else(|| {
            ApplicationError::not_found("organization", &command.organization_id)
        })?;
        let events = decide_rename(&state, &command.name, &command.renamed_by, now_millis())
            .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        organization.record(events);
        self.repository.save(&mut *tx, &mut organization).await?;
        tx.commit().await?;
        tracing::info!("organization renamed");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn deactivate(
        &self,
        organization_id: &str,
        deactivated_by: &str,
    ) -> Result<(), ApplicationError> {
        let mut tx = self.db.begin().await?;
        let mut organization = self.load(&mut tx, organization_id).await?;
        let state = organization
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("organization", organization_id))?;
        let active_children = count_active_children(&mut *tx, organization_id).await?;
        let events = decide_deactivate(&state, active_children, deactivated_by, now_millis())
            .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        organization.record(events);
        self.repository.save(&mut *tx, &mut organization).await?;
        tx.commit().await?;
        tracing::info!("organization deactivated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn activate(
        &self,
        organization_id: &str,
        activated_by: &str,
    ) -> Result<(), ApplicationError> {
        let mut tx = self.db.begin().await?;
        let mut organization = self.load(&mut tx, organization_id).await?;
        let state = organization
            .state()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("organization", organization_id))?;
        let events = decide_activate(&state, activated_by, now_millis())
            .map_err(|e| ApplicationError::Domain(e.to_string()))?;
        organization.record(events);
        self.repository.save(&mut *tx, &mut organization).await?;
        tx.commit().await?;
        tracing::info!("organization activated");
        Ok(())
    }

    async fn load(
        &self,
        tx: &mut sqlx::Transaction<'static, sqlx::Sqlite>,
        organization_id: &str,
    ) -> Result<Tracked<Organization>, ApplicationError> {
        self.repository
            .load(&mut **tx, organization_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("organization", organization_id))
    }
}

use crate::modules::members::core::ports::MemberDirectory;
use crate::modules::members::manager_graph::ManagerGraphValidator;
use crate::shared::application::errors::ApplicationError;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignManager {
    pub member_id: String,
    /// `None` clears the manager link.
    pub manager_id: Option<String>,
    pub assigned_by: String,
}

pub struct AssignManagerHandler {
    directory: Arc<dyn MemberDirectory>,
    validator: ManagerGraphValidator,
}

impl AssignManagerHandler {
    pub fn new(directory: Arc<dyn MemberDirectory>) -> Self {
        Self {
            validator: ManagerGraphValidator::new(directory.clone()),
            directory,
        }
    }

    #[tracing::instrument(skip(self), fields(member_id = %command.member_id))]
    pub async fn handle(&self, command: AssignManager) -> Result<(), ApplicationError> {
        let member = self
            .directory
            .find_by_id(&command.member_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("member", &command.member_id))?;

        if let Some(manager_id) = command.manager_id.as_deref() {
            let manager = self
                .directory
                .find_by_id(manager_id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("member", manager_id))?;
            if manager.tenant_id != member.tenant_id {
                return Err(ApplicationError::Validation(format!(
                    "manager {manager_id} belongs to another tenant"
                )));
            }
            if !manager.is_active {
                return Err(ApplicationError::Validation(format!(
                    "manager {manager_id} is inactive"
                )));
            }
            self.validator
                .validate_assignment(&member.id, manager_id)
                .await?;
        }

        self.directory
            .update_manager(&member.id, command.manager_id.as_deref())
            .await?;
        tracing::info!(
            manager_id = command.manager_id.as_deref().unwrap_or("-"),
            assigned_by = %command.assigned_by,
            "manager assigned"
        );
        Ok(())
    }
}

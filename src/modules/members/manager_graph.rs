// Cycle detection for the manager graph.
//
// Purpose
// - Answer "would assigning manager M to member X close a reporting loop?" before anything
//   is persisted.
//
// Responsibilities
// - Self assignment is the one-node cycle.
// - Walk `manager_id` links from the proposed manager, by id only, tracking visited ids so
//   data that is already cyclic cannot loop forever. Depth is unbounded.

use crate::modules::members::core::ports::MemberDirectory;
use crate::shared::application::errors::ApplicationError;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct ManagerGraphValidator {
    directory: Arc<dyn MemberDirectory>,
}

impl ManagerGraphValidator {
    pub fn new(directory: Arc<dyn MemberDirectory>) -> Self {
        Self { directory }
    }

    pub async fn would_create_cycle(
        &self,
        member_id: &str,
        proposed_manager_id: &str,
    ) -> Result<bool, ApplicationError> {
        if member_id == proposed_manager_id {
            return Ok(true);
        }
        let mut visited = HashSet::new();
        let mut current = Some(proposed_manager_id.to_string());
        while let Some(id) = current {
            if id == member_id {
                return Ok(true);
            }
            if !visited.insert(id.clone()) {
                tracing::warn!(member_id = %id, "manager chain already contains a cycle");
                return Ok(false);
            }
            current = self
                .directory
                .find_by_id(&id)
                .await?
                .and_then(|m| m.manager_id);
        }
        Ok(false)
    }

    pub async fn validate_assignment(
        &self,
        member_id: &str,
        proposed_manager_id: &str,
    ) -> Result<(), ApplicationError> {
        if self
            .would_create_cycle(member_id, proposed_manager_id)
            .await?
        {
            return Err(ApplicationError::CircularReference {
                member_id: member_id.to_string(),
                manager_id: proposed_manager_id.to_string(),
            });
        }
        Ok(())
    }
}

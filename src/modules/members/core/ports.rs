// Ports define what the approval core needs from the member directory.
//
// Purpose
// - Members are a direct-read entity owned elsewhere. The core only looks members up, walks
//   the manager chain and rewrites a manager link.
//
// Testing guidance
// - The in-memory adapter backs unit and scenario tests; the SQLite adapter backs the binary.

use crate::modules::members::core::member::Member;
use async_trait::async_trait;
use std::collections::HashSet;

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn find_by_id(&self, member_id: &str) -> anyhow::Result<Option<Member>>;

    async fn update_manager(&self, member_id: &str, manager_id: Option<&str>)
    -> anyhow::Result<()>;

    /// Every member whose manager chain reaches `manager_id`.
    async fn subordinate_ids(&self, manager_id: &str) -> anyhow::Result<Vec<String>>;

    /// True when `manager_id` appears anywhere above `member_id` in the manager chain.
    async fn is_subordinate_of(&self, manager_id: &str, member_id: &str) -> anyhow::Result<bool> {
        let mut visited = HashSet::new();
        let mut current = self
            .find_by_id(member_id)
            .await?
            .and_then(|m| m.manager_id);
        while let Some(id) = current {
            if id == manager_id {
                return Ok(true);
            }
            if !visited.insert(id.clone()) {
                return Ok(false);
            }
            current = self.find_by_id(&id).await?.and_then(|m| m.manager_id);
        }
        Ok(false)
    }
}

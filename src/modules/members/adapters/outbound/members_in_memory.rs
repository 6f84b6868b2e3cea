// In memory implementation of the MemberDirectory port.
//
// Purpose
// - Support workflow tests and local development without a members table.

use crate::modules::members::core::member::Member;
use crate::modules::members::core::ports::MemberDirectory;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryMemberDirectory {
    members: RwLock<HashMap<String, Member>>,
    offline: bool,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, member: Member) {
        self.members.write().await.insert(member.id.clone(), member);
    }

    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.offline {
            anyhow::bail!("Member directory offline");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn find_by_id(&self, member_id: &str) -> anyhow::Result<Option<Member>> {
        self.ensure_online()?;
        Ok(self.members.read().await.get(member_id).cloned())
    }

    async fn update_manager(
        &self,
        member_id: &str,
        manager_id: Option<&str>,
    ) -> anyhow::Result<()> {
        self.ensure_online()?;
        let mut guard = self.members.write().await;
        let member = guard
            .get_mut(member_id)
            .ok_or_else(|| anyhow::anyhow!("member {member_id} not found"))?;
        member.manager_id = manager_id.map(str::to_string);
        Ok(())
    }

    async fn subordinate_ids(&self, manager_id: &str) -> anyhow::Result<Vec<String>> {
        self.ensure_online()?;
        let ids: Vec<String> = self.members.read().await.keys().cloned().collect();
        let mut subordinates = Vec::new();
        for id in ids {
            if self.is_subordinate_of(manager_id, &id).await? {
                subordinates.push(id);
            }
        }
        subordinates.sort();
        Ok(subordinates)
    }
}

// SQLite implementation of the MemberDirectory port over the `members` table.
//
// Responsibilities
// - Manager chains are walked with recursive CTEs. `UNION` (not `UNION ALL`) drops repeated
//   ids, so a chain that already contains a cycle still terminates.

use crate::modules::members::core::member::Member;
use crate::modules::members::core::ports::MemberDirectory;
use anyhow::Context;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct SqliteMemberDirectory {
    pool: SqlitePool,
}

impl SqliteMemberDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, member: &Member) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO members (id, tenant_id, organization_id, email, display_name, manager_id, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                tenant_id = excluded.tenant_id,
                organization_id = excluded.organization_id,
                email = excluded.email,
                display_name = excluded.display_name,
                manager_id = excluded.manager_id,
                is_active = excluded.is_active",
        )
        .bind(&member.id)
        .bind(&member.tenant_id)
        .bind(&member.organization_id)
        .bind(&member.email)
        .bind(&member.display_name)
        .bind(&member.manager_id)
        .bind(member.is_active)
        .execute(&self.pool)
        .await
        .with_context(|| format!("upsert member {}", member.id))?;
        Ok(())
    }
}

fn member_from_row(row: &SqliteRow) -> Result<Member, sqlx::Error> {
    Ok(Member {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        organization_id: row.try_get("organization_id")?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        manager_id: row.try_get("manager_id")?,
        is_active: row.try_get("is_active")?,
    })
}

#[async_trait::async_trait]
impl MemberDirectory for SqliteMemberDirectory {
    async fn find_by_id(&self, member_id: &str) -> anyhow::Result<Option<Member>> {
        let row = sqlx::query(
            "SELECT id, tenant_id, organization_id, email, display_name, manager_id, is_active
             FROM members WHERE id = ?1",
        )
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await
        .context("load member")?;
        row.as_ref()
            .map(member_from_row)
            .transpose()
            .context("decode member")
    }

    async fn update_manager(
        &self,
        member_id: &str,
        manager_id: Option<&str>,
    ) -> anyhow::Result<()> {
        let result = sqlx::query("UPDATE members SET manager_id = ?2 WHERE id = ?1")
            .bind(member_id)
            .bind(manager_id)
            .execute(&self.pool)
            .await
            .context("update manager")?;
        if result.rows_affected() == 0 {
            anyhow::bail!("member {member_id} not found");
        }
        Ok(())
    }

    async fn subordinate_ids(&self, manager_id: &str) -> anyhow::Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>(
            "WITH RECURSIVE reports(id) AS (
                SELECT id FROM members WHERE manager_id = ?1
                UNION
                SELECT m.id FROM members m JOIN reports r ON m.manager_id = r.id
             )
             SELECT id FROM reports WHERE id <> ?1 ORDER BY id",
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await
        .context("list subordinates")?;
        Ok(ids)
    }

    async fn is_subordinate_of(&self, manager_id: &str, member_id: &str) -> anyhow::Result<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "WITH RECURSIVE chain(id) AS (
                SELECT manager_id FROM members WHERE id = ?1 AND manager_id IS NOT NULL
                UNION
                SELECT m.manager_id FROM members m JOIN chain c ON m.id = c.id
                WHERE m.manager_id IS NOT NULL
             )
             SELECT EXISTS (SELECT 1 FROM chain WHERE id = ?2)",
        )
        .bind(member_id)
        .bind(manager_id)
        .fetch_one(&self.pool)
        .await
        .context("walk manager chain")?;
        Ok(found != 0)
    }
}

#[cfg(test)]
mod sqlite_member_directory_tests {
    use super::*;
    use crate::shared::infrastructure::database::Database;
    use crate::tests::fixtures::members::member;
    use rstest::rstest;

    async fn directory() -> (Database, SqliteMemberDirectory) {
        let db = Database::in_memory().await.unwrap();
        let directory = SqliteMemberDirectory::new(db.pool().clone());
        for m in [
            member("ceo", None),
            member("director", Some("ceo")),
            member("lead", Some("director")),
            member("dev", Some("lead")),
        ] {
            directory.upsert(&m).await.unwrap();
        }
        (db, directory)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_round_trip_a_member() {
        let (_db, directory) = directory().await;
        let found = directory.find_by_id("lead").await.unwrap().unwrap();
        assert_eq!(found, member("lead", Some("director")));
        assert!(directory.find_by_id("nobody").await.unwrap().is_none());
    }

    #[rstest]
    #[case("ceo", "dev", true)]
    #[case("lead", "dev", true)]
    #[case("dev", "ceo", false)]
    #[case("dev", "dev", false)]
    #[tokio::test]
    async fn it_should_walk_the_manager_chain(
        #[case] manager: &str,
        #[case] subordinate: &str,
        #[case] expected: bool,
    ) {
        let (_db, directory) = directory().await;
        assert_eq!(
            directory.is_subordinate_of(manager, subordinate).await.unwrap(),
            expected
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_transitive_reports() {
        let (_db, directory) = directory().await;
        assert_eq!(
            directory.subordinate_ids("director").await.unwrap(),
            vec!["dev".to_string(), "lead".to_string()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_terminate_when_the_data_already_has_a_cycle() {
        let (_db, directory) = directory().await;
        directory.update_manager("ceo", Some("dev")).await.unwrap();
        assert!(!directory.is_subordinate_of("stranger", "dev").await.unwrap());
        assert!(directory.is_subordinate_of("dev", "lead").await.unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_to_update_an_unknown_member() {
        let (_db, directory) = directory().await;
        assert!(directory.update_manager("nobody", None).await.is_err());
    }
}

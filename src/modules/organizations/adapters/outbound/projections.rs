use crate::modules::organizations::core::state::Organization;
use crate::shared::infrastructure::repository::Projection;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRow {
    pub id: String,
    pub tenant_id: String,
    pub parent_id: Option<String>,
    pub code: String,
    pub name: String,
    pub level: u8,
    pub is_active: bool,
    pub updated_at: i64,
    pub version: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationProjection;

#[async_trait]
impl Projection<Organization> for OrganizationProjection {
    async fn project(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        version: i64,
        state: &Organization,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO organizations
                (id, tenant_id, parent_id, code, name, level, is_active, updated_at, version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                is_active = excluded.is_active,
                updated_at = excluded.updated_at,
                version = excluded.version",
        )
        .bind(id)
        .bind(&state.tenant_id)
        .bind(&state.parent_id)
        .bind(&state.code)
        .bind(&state.name)
        .bind(i64::from(state.level))
        .bind(state.is_active)
        .bind(state.updated_at)
        .bind(version)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

const COLUMNS: &str = "id, tenant_id, parent_id, code, name, level, is_active, updated_at, version";

fn organization_from_row(row: &SqliteRow) -> Result<OrganizationRow, sqlx::Error> {
    let level: i64 = row.try_get("level")?;
    Ok(OrganizationRow {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        parent_id: row.try_get("parent_id")?,
        code: row.try_get("code")?,
        name: row.try_get("name")?,
        level: u8::try_from(level).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        is_active: row.try_get("is_active")?,
        updated_at: row.try_get("updated_at")?,
        version: row.try_get("version")?,
    })
}

pub async fn find_organization(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<OrganizationRow>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM organizations WHERE id = ?1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(organization_from_row).transpose()
}

pub async fn find_organization_by_code(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    code: &str,
) -> Result<Option<OrganizationRow>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM organizations WHERE tenant_id = ?1 AND code = ?2"
    ))
    .bind(tenant_id)
    .bind(code)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(organization_from_row).transpose()
}

pub async fn list_children(
    conn: &mut SqliteConnection,
    parent_id: &str,
) -> Result<Vec<OrganizationRow>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM organizations WHERE parent_id = ?1 ORDER BY code"
    ))
    .bind(parent_id)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(organization_from_row).collect()
}

pub async fn count_active_children(
    conn: &mut SqliteConnection,
    parent_id: &str,
) -> Result<usize, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM organizations WHERE parent_id = ?1 AND is_active = 1",
    )
    .bind(parent_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(usize::try_from(count).unwrap_or(0))
}

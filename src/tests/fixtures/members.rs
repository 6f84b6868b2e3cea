use crate::modules::members::core::member::Member;

pub const TENANT: &str = "tenant-0001";

pub fn member(id: &str, manager_id: Option<&str>) -> Member {
    Member {
        id: id.to_string(),
        tenant_id: TENANT.to_string(),
        organization_id: Some("org-0001".to_string()),
        email: format!("{id}@example.test"),
        display_name: format!("Member {id}"),
        manager_id: manager_id.map(str::to_string),
        is_active: true,
    }
}

use crate::modules::organizations::core::events::v1::OrganizationCreatedV1;
use crate::tests::fixtures::members::TENANT;

/// A root organization with a code derived from its id.
pub fn organization_created_v1(organization_id: &str) -> OrganizationCreatedV1 {
    OrganizationCreatedV1 {
        organization_id: organization_id.to_string(),
        tenant_id: TENANT.to_string(),
        parent_id: None,
        code: organization_id.to_uppercase(),
        name: "Engineering".to_string(),
        level: 1,
        created_by: "admin-0001".to_string(),
        created_at: 1_700_000_000_000,
    }
}

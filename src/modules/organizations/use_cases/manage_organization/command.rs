#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrganizationCommand {
    pub tenant_id: String,
    pub parent_id: Option<String>,
    pub code: String,
    pub name: String,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOrganization {
    pub organization_id: String,
    pub name: String,
    pub renamed_by: String,
}

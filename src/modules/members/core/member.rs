/// A member as the directory reports it. Members are edited outside this crate; only the
/// manager link is written here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub tenant_id: String,
    pub organization_id: Option<String>,
    pub email: String,
    pub display_name: String,
    pub manager_id: Option<String>,
    pub is_active: bool,
}

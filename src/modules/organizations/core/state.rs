use crate::modules::organizations::core::events::OrganizationEvent;
use crate::shared::core::aggregate::Aggregate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    pub tenant_id: String,
    pub parent_id: Option<String>,
    pub code: String,
    pub name: String,
    pub level: u8,
    pub is_active: bool,
    pub updated_at: i64,
}

pub fn evolve(state: Option<Organization>, event: &OrganizationEvent) -> Option<Organization> {
    match (state, event) {
        (None, OrganizationEvent::OrganizationCreatedV1(e)) => Some(Organization {
            id: e.organization_id.clone(),
            tenant_id: e.tenant_id.clone(),
            parent_id: e.parent_id.clone(),
            code: e.code.clone(),
            name: e.name.clone(),
            level: e.level,
            is_active: true,
            updated_at: e.created_at,
        }),
        (Some(org), OrganizationEvent::OrganizationRenamedV1(e)) => Some(Organization {
            name: e.name.clone(),
            updated_at: e.renamed_at,
            ..org
        }),
        (Some(org), OrganizationEvent::OrganizationDeactivatedV1(e)) => Some(Organization {
            is_active: false,
            updated_at: e.deactivated_at,
            ..org
        }),
        (Some(org), OrganizationEvent::OrganizationActivatedV1(e)) => Some(Organization {
            is_active: true,
            updated_at: e.activated_at,
            ..org
        }),
        (state, _) => state,
    }
}

impl Aggregate for Organization {
    type Event = OrganizationEvent;
    const AGGREGATE_TYPE: &'static str = "organization";

    fn evolve(state: Option<Self>, event: &OrganizationEvent) -> Option<Self> {
        evolve(state, event)
    }
}

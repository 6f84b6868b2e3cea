use crate::shared::core::aggregate::DomainEvent;

pub mod v1 {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct OrganizationCreatedV1 {
        pub organization_id: String,
        pub tenant_id: String,
        pub parent_id: Option<String>,
        pub code: String,
        pub name: String,
        pub level: u8,
        pub created_by: String,
        pub created_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct OrganizationRenamedV1 {
        pub name: String,
        pub renamed_by: String,
        pub renamed_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct OrganizationDeactivatedV1 {
        pub deactivated_by: String,
        pub deactivated_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct OrganizationActivatedV1 {
        pub activated_by: String,
        pub activated_at: i64,
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum OrganizationEvent {
    OrganizationCreatedV1(v1::OrganizationCreatedV1),
    OrganizationRenamedV1(v1::OrganizationRenamedV1),
    OrganizationDeactivatedV1(v1::OrganizationDeactivatedV1),
    OrganizationActivatedV1(v1::OrganizationActivatedV1),
}

impl DomainEvent for OrganizationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrganizationEvent::OrganizationCreatedV1(_) => "OrganizationCreated",
            OrganizationEvent::OrganizationRenamedV1(_) => "OrganizationRenamed",
            OrganizationEvent::OrganizationDeactivatedV1(_) => "OrganizationDeactivated",
            OrganizationEvent::OrganizationActivatedV1(_) => "OrganizationActivated",
        }
    }
}

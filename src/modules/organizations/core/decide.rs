// Pure decision functions for organizations.
//
// Responsibilities
// - Codes are short identifiers, names are bounded, the hierarchy is at most six levels deep.
// - Children can only be attached to an active parent of the same tenant.
// - Never perform input or output.

use crate::modules::organizations::core::events::v1::{
    OrganizationActivatedV1, OrganizationCreatedV1, OrganizationDeactivatedV1,
    OrganizationRenamedV1,
};
use crate::modules::organizations::core::events::OrganizationEvent;
use crate::modules::organizations::core::state::Organization;

pub const MAX_LEVEL: u8 = 6;
pub const MAX_CODE_LENGTH: usize = 32;
pub const MAX_NAME_LENGTH: usize = 256;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("organization already exists")]
    AlreadyExists,

    #[error("code must be 1-32 letters, digits or underscores")]
    InvalidCode,

    #[error("name must be 1-256 characters")]
    InvalidName,

    #[error("parent organization is inactive")]
    ParentInactive,

    #[error("parent organization belongs to another tenant")]
    ParentTenantMismatch,

    #[error("organization hierarchy is limited to {MAX_LEVEL} levels")]
    TooDeep,

    #[error("organization is inactive")]
    Inactive,

    #[error("organization is already active")]
    AlreadyActive,

    #[error("organization still has active children")]
    HasActiveChildren,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrganization {
    pub organization_id: String,
    pub tenant_id: String,
    pub parent_id: Option<String>,
    pub code: String,
    pub name: String,
    pub created_by: String,
    pub created_at: i64,
}

fn valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn valid_name(name: &str) -> bool {
    let length = name.trim().chars().count();
    (1..=MAX_NAME_LENGTH).contains(&length)
}

pub fn decide_create(
    state: Option<&Organization>,
    parent: Option<&Organization>,
    command: CreateOrganization,
) -> Result<Vec<OrganizationEvent>, DecideError> {
    if state.is_some() {
        return Err(DecideError::AlreadyExists);
    }
    if !valid_code(&command.code) {
        return Err(DecideError::InvalidCode);
    }
    if !valid_name(&command.name) {
        return Err(DecideError::InvalidName);
    }
    let level = match parent {
        None => 1,
        Some(parent) => {
            if parent.tenant_id != command.tenant_id {
                return Err(DecideError::ParentTenantMismatch);
            }
            if !parent.is_active {
                return Err(DecideError::ParentInactive);
            }
            if parent.level >= MAX_LEVEL {
                return Err(DecideError::TooDeep);
            }
            parent.level + 1
        }
    };
    Ok(vec![OrganizationEvent::OrganizationCreatedV1(
        OrganizationCreatedV1 {
            organization_id: command.organization_id,
            tenant_id: command.tenant_id,
            parent_id: parent.map(|p| p.id.clone()),
            code: command.code,
            name: command.name.trim().to_string(),
            level,
            created_by: command.created_by,
            created_at: command.created_at,
        },
    )])
}

pub fn decide_rename(
    state: &Organization,
    name: &str,
    renamed_by: &str,
    renamed_at: i64,
) -> Result<Vec<OrganizationEvent>, DecideError> {
    if !state.is_active {
        return Err(DecideError::Inactive);
    }
    if !valid_name(name) {
        return Err(DecideError::InvalidName);
    }
    Ok(vec![OrganizationEvent::OrganizationRenamedV1(
        OrganizationRenamedV1 {
            name: name.trim().to_string(),
            renamed_by: renamed_by.to_string(),
            renamed_at,
        },
    )])
}

pub fn decide_deactivate(
    state: &Organization,
    active_children: usize,
    deactivated_by: &str,
    deactivated_at: i64,
) -> Result<Vec<OrganizationEvent>, DecideError> {
    if !state.is_active {
        return Err(DecideError::Inactive);
    }
    if active_children > 0 {
        return Err(DecideError::HasActiveChildren);
    }
    Ok(vec![OrganizationEvent::OrganizationDeactivatedV1(
        OrganizationDeactivatedV1 {
            deactivated_by: deactivated_by.to_string(),
            deactivated_at,
        },
    )])
}

pub fn decide_activate(
    state: &Organization,
    activated_by: &str,
    activated_at: i64,
) -> Result<Vec<OrganizationEvent>, DecideError> {
    if state.is_active {
        return Err(DecideError::AlreadyActive);
    }
    Ok(vec![OrganizationEvent::OrganizationActivatedV1(
        OrganizationActivatedV1 {
            activated_by: activated_by.to_string(),
            activated_at,
        },
    )])
}

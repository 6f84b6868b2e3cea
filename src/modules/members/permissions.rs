// Who may act for whom.
//
// - Acting for yourself is always allowed.
// - Acting for someone else (proxy entry, proxy submit or recall) needs the actor somewhere
//   above the member in the manager chain.
// - Reviewing (approve, reject) always needs that relationship; nobody reviews their own work.

use crate::modules::members::core::ports::MemberDirectory;
use crate::shared::application::errors::ApplicationError;

pub async fn ensure_may_act_for(
    directory: &dyn MemberDirectory,
    actor_id: &str,
    member_id: &str,
) -> Result<(), ApplicationError> {
    if actor_id == member_id {
        return Ok(());
    }
    ensure_manages(directory, actor_id, member_id).await
}

pub async fn ensure_manages(
    directory: &dyn MemberDirectory,
    reviewer_id: &str,
    member_id: &str,
) -> Result<(), ApplicationError> {
    if reviewer_id != member_id && directory.is_subordinate_of(reviewer_id, member_id).await? {
        return Ok(());
    }
    tracing::info!(actor_id = reviewer_id, member_id, "permission denied");
    Err(ApplicationError::PermissionDenied {
        actor_id: reviewer_id.to_string(),
        member_id: member_id.to_string(),
    })
}

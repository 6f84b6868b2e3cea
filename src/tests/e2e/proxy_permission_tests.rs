use crate::modules::work_log::core::status::RecordStatus;
use crate::modules::work_log::use_cases::record_work_log_entry::command::{
    DeleteWorkLogEntry, UpdateWorkLogEntry,
};
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::Hours;
use crate::tests::fixtures::commands::CreateWorkLogEntryBuilder;
use crate::tests::fixtures::context::{TestContext, day};

#[tokio::test]
async fn manager_works_as_proxy_but_a_peer_cannot() {
    let ctx = TestContext::new().await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().entered_by(TestContext::MANAGER).build())
        .await
        .unwrap();
    let approval_id = ctx
        .workflow
        .submit_month(TestContext::MEMBER, TestContext::january(), TestContext::DIRECTOR)
        .await
        .unwrap();
    let approval = ctx.approval(&approval_id).await.unwrap();
    assert_eq!(approval.submitted_by.as_deref(), Some(TestContext::DIRECTOR));
    assert_eq!(ctx.entry(&entry).await.unwrap().status, RecordStatus::Submitted);

    let peer_entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().entered_by(TestContext::PEER).build())
        .await;
    let peer_submit = ctx
        .workflow
        .submit_month(TestContext::MEMBER, TestContext::january(), TestContext::PEER)
        .await;
    let upward = ctx
        .workflow
        .submit_daily(TestContext::MANAGER, day(15), TestContext::MEMBER)
        .await;
    for result in [peer_entry.map(|_| ()), peer_submit.map(|_| ()), upward.map(|_| ())] {
        assert!(matches!(result, Err(ApplicationError::PermissionDenied { .. })));
    }
}

#[tokio::test]
async fn self_and_proxy_edits_race_and_only_the_first_wins() {
    let ctx = TestContext::new().await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().hours(8.0).build())
        .await
        .unwrap();
    let seen = ctx.entry(&entry).await.unwrap();

    let edit = |hours: f64, by: &str| UpdateWorkLogEntry {
        entry_id: entry.clone(),
        expected_version: seen.version,
        project_id: seen.project_id.clone(),
        work_date: seen.work_date,
        hours,
        comment: None,
        updated_by: by.to_string(),
    };
    ctx.entries
        .update(edit(7.0, TestContext::MEMBER))
        .await
        .unwrap();
    let proxy = ctx.entries.update(edit(6.0, TestContext::MANAGER)).await;
    assert!(matches!(
        proxy,
        Err(ApplicationError::ConcurrencyConflict { expected: 1, actual: 2, .. })
    ));
    let stale_delete = ctx
        .entries
        .delete(DeleteWorkLogEntry {
            entry_id: entry.clone(),
            expected_version: seen.version,
            deleted_by: TestContext::MANAGER.into(),
        })
        .await;
    assert!(matches!(stale_delete, Err(ApplicationError::ConcurrencyConflict { .. })));

    let view = ctx.entry(&entry).await.unwrap();
    assert_eq!(view.hours, Hours::from_hours(7.0).unwrap());
    assert_eq!(view.version, 2);
    assert_eq!(view.updated_by, TestContext::MEMBER);
}

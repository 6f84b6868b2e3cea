use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::work_log::core::status::RecordStatus;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::tests::fixtures::commands::CreateWorkLogEntryBuilder;
use crate::tests::fixtures::context::{TestContext, day};

#[tokio::test]
async fn workflow_commits_while_the_outbox_is_offline() {
    let ctx = TestContext::with_outbox(InMemoryDomainOutbox::offline()).await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(8)).build())
        .await
        .unwrap();

    ctx.workflow
        .submit_daily(TestContext::MEMBER, day(8), TestContext::MEMBER)
        .await
        .unwrap();
    let approval_id = ctx.submit_january().await;
    ctx.workflow
        .approve_month(&approval_id, TestContext::MANAGER)
        .await
        .unwrap();

    assert_eq!(
        ctx.approval(&approval_id).await.unwrap().status,
        ApprovalStatus::Approved
    );
    assert_eq!(ctx.entry(&entry).await.unwrap().status, RecordStatus::Approved);
    assert!(ctx.outbox.event_types().await.is_empty());
}

#[tokio::test]
async fn month_notices_follow_the_approval_stream_versions() {
    let ctx = TestContext::new().await;
    let approval_id = ctx.submit_january().await;
    ctx.workflow
        .approve_month(&approval_id, TestContext::MANAGER)
        .await
        .unwrap();

    let rows = ctx.outbox.rows().await;
    let versions: Vec<_> = rows.iter().map(|r| (r.stream_id.clone(), r.stream_version)).collect();
    assert_eq!(versions, vec![(approval_id.clone(), 2), (approval_id, 3)]);
    assert_eq!(rows[1].payload["actor_id"], TestContext::MANAGER);
    assert_eq!(rows[1].topic, "time-approvals");
}

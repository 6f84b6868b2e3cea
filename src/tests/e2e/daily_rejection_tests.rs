use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::work_log::core::status::RecordStatus;
use crate::modules::work_log::use_cases::record_work_log_entry::command::UpdateWorkLogEntry;
use crate::shared::application::errors::ApplicationError;
use crate::tests::fixtures::commands::CreateWorkLogEntryBuilder;
use crate::tests::fixtures::context::{TestContext, day};
use chrono::NaiveDate;

async fn fix_hours(ctx: &TestContext, entry_id: &str, hours: f64) {
    let view = ctx.entry(entry_id).await.unwrap();
    ctx.entries
        .update(UpdateWorkLogEntry {
            entry_id: entry_id.to_string(),
            expected_version: view.version,
            project_id: view.project_id,
            work_date: view.work_date,
            hours,
            comment: view.comment,
            updated_by: TestContext::MEMBER.into(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn day_rejected_before_the_month_is_picked_up_by_the_month_submit() {
    let ctx = TestContext::new().await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(10)).build())
        .await
        .unwrap();
    ctx.workflow
        .submit_daily(TestContext::MEMBER, day(10), TestContext::MEMBER)
        .await
        .unwrap();
    ctx.workflow
        .reject_daily(TestContext::MEMBER, day(10), TestContext::MANAGER, "wrong project")
        .await
        .unwrap();
    assert_eq!(ctx.entry(&entry).await.unwrap().status, RecordStatus::Draft);

    fix_hours(&ctx, &entry, 7.5).await;
    let approval_id = ctx.submit_january().await;

    let approval = ctx.approval(&approval_id).await.unwrap();
    assert_eq!(approval.work_log_entry_ids, vec![entry.clone()]);
    assert_eq!(ctx.entry(&entry).await.unwrap().status, RecordStatus::Submitted);
    let log = ctx.rejection(day(10)).await.unwrap();
    assert_eq!(log.affected_entry_ids, vec![entry]);
}

#[tokio::test]
async fn approving_a_month_with_an_unresolved_rejected_day_fails_and_changes_nothing() {
    let ctx = TestContext::new().await;
    let rejected = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(10)).build())
        .await
        .unwrap();
    let kept = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(11)).build())
        .await
        .unwrap();
    let approval_id = ctx.submit_january().await;
    ctx.workflow
        .reject_daily(TestContext::MEMBER, day(10), TestContext::MANAGER, "missing ticket")
        .await
        .unwrap();

    let events_before = ctx.stream_versions().await;
    let outbox_before = ctx.outbox.event_types().await.len();
    let result = ctx
        .workflow
        .approve_month(&approval_id, TestContext::MANAGER)
        .await;
    assert!(matches!(result, Err(ApplicationError::Domain(_))));

    assert_eq!(ctx.stream_versions().await, events_before);
    assert_eq!(ctx.outbox.event_types().await.len(), outbox_before);
    assert_eq!(
        ctx.approval(&approval_id).await.unwrap().status,
        ApprovalStatus::Submitted
    );
    assert_eq!(ctx.entry(&kept).await.unwrap().status, RecordStatus::Submitted);
    assert_eq!(ctx.entry(&rejected).await.unwrap().status, RecordStatus::Draft);

    fix_hours(&ctx, &rejected, 6.0).await;
    ctx.workflow
        .submit_daily(TestContext::MEMBER, day(10), TestContext::MEMBER)
        .await
        .unwrap();
    ctx.workflow
        .approve_month(&approval_id, TestContext::MANAGER)
        .await
        .unwrap();
    assert_eq!(ctx.entry(&rejected).await.unwrap().status, RecordStatus::Approved);
    assert_eq!(ctx.entry(&kept).await.unwrap().status, RecordStatus::Approved);
}

#[tokio::test]
async fn recall_is_refused_while_the_month_is_submitted() {
    let ctx = TestContext::new().await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(10)).build())
        .await
        .unwrap();
    ctx.submit_january().await;

    let result = ctx
        .workflow
        .recall_daily(TestContext::MEMBER, day(10), TestContext::MEMBER)
        .await;
    assert!(matches!(result, Err(ApplicationError::Domain(_))));
    assert_eq!(ctx.entry(&entry).await.unwrap().status, RecordStatus::Submitted);
}

#[tokio::test]
async fn a_rejected_day_is_corrected_inside_its_submitted_month() {
    let ctx = TestContext::new().await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(15)).build())
        .await
        .unwrap();
    let approval_id = ctx.submit_january().await;
    ctx.workflow
        .reject_daily(TestContext::MEMBER, day(15), TestContext::MANAGER, "wrong day")
        .await
        .unwrap();

    fix_hours(&ctx, &entry, 6.5).await;
    let view = ctx.entry(&entry).await.unwrap();
    assert_eq!(view.version, 4);
    assert_eq!(view.status, RecordStatus::Draft);

    let move_to = |work_date: NaiveDate| UpdateWorkLogEntry {
        entry_id: entry.clone(),
        expected_version: 4,
        project_id: view.project_id.clone(),
        work_date,
        hours: 6.5,
        comment: view.comment.clone(),
        updated_by: TestContext::MEMBER.into(),
    };
    let february = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
    let result = ctx.entries.update(move_to(february)).await;
    assert!(matches!(result, Err(ApplicationError::Domain(_))));
    assert_eq!(ctx.entry(&entry).await.unwrap().work_date, day(15));

    assert_eq!(ctx.entries.update(move_to(day(16))).await.unwrap(), 5);
    ctx.workflow
        .submit_daily(TestContext::MEMBER, day(16), TestContext::MEMBER)
        .await
        .unwrap();
    ctx.workflow
        .approve_month(&approval_id, TestContext::MANAGER)
        .await
        .unwrap();

    let approved = ctx.entry(&entry).await.unwrap();
    assert_eq!(approved.work_date, day(16));
    assert_eq!(approved.status, RecordStatus::Approved);
    assert_eq!(ctx.approval(&approval_id).await.unwrap().work_log_entry_ids, vec![entry]);
}

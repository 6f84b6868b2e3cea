use crate::modules::approvals::core::state::ApprovalStatus;
use crate::modules::work_log::core::status::RecordStatus;
use crate::modules::work_log::use_cases::record_work_log_entry::command::UpdateWorkLogEntry;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::Hours;
use crate::tests::fixtures::commands::{CreateWorkLogEntryBuilder, RecordAbsenceBuilder};
use crate::tests::fixtures::context::{TestContext, day};

#[tokio::test]
async fn rejected_month_is_corrected_resubmitted_and_approved() {
    let ctx = TestContext::new().await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(6)).hours(8.0).build())
        .await
        .unwrap();
    let absence = ctx
        .absences
        .record(RecordAbsenceBuilder::new().absence_date(day(7)).build())
        .await
        .unwrap();

    let approval_id = ctx.submit_january().await;
    ctx.workflow
        .reject_month(&approval_id, TestContext::MANAGER, "the 6th was a half day")
        .await
        .unwrap();

    let rejected = ctx.approval(&approval_id).await.unwrap();
    assert_eq!(rejected.status, ApprovalStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("the 6th was a half day"));
    let draft = ctx.entry(&entry).await.unwrap();
    assert_eq!(draft.status, RecordStatus::Draft);
    assert_eq!(ctx.absence(&absence).await.unwrap().status, RecordStatus::Draft);

    ctx.entries
        .update(UpdateWorkLogEntry {
            entry_id: entry.clone(),
            expected_version: draft.version,
            project_id: draft.project_id.clone(),
            work_date: day(6),
            hours: 4.0,
            comment: Some("half day".into()),
            updated_by: TestContext::MEMBER.into(),
        })
        .await
        .unwrap();

    assert_eq!(ctx.submit_january().await, approval_id);
    let resubmitted = ctx.approval(&approval_id).await.unwrap();
    assert_eq!(resubmitted.status, ApprovalStatus::Submitted);
    assert_eq!(resubmitted.rejection_reason, None);

    ctx.workflow
        .approve_month(&approval_id, TestContext::MANAGER)
        .await
        .unwrap();
    let approved_entry = ctx.entry(&entry).await.unwrap();
    assert_eq!(approved_entry.status, RecordStatus::Approved);
    assert_eq!(approved_entry.hours, Hours::from_hours(4.0).unwrap());
    assert_eq!(ctx.absence(&absence).await.unwrap().status, RecordStatus::Approved);
    assert_eq!(ctx.approval(&approval_id).await.unwrap().version, 5);
    assert_eq!(
        ctx.outbox.event_types().await,
        vec![
            "MonthSubmitted".to_string(),
            "MonthRejected".to_string(),
            "MonthSubmitted".to_string(),
            "MonthApproved".to_string(),
        ]
    );
}

#[tokio::test]
async fn rejected_month_can_be_resubmitted_unchanged() {
    let ctx = TestContext::new().await;
    ctx.entries
        .create(CreateWorkLogEntryBuilder::new().build())
        .await
        .unwrap();
    let approval_id = ctx.submit_january().await;
    ctx.workflow
        .reject_month(&approval_id, TestContext::MANAGER, "check again")
        .await
        .unwrap();

    ctx.submit_january().await;
    ctx.workflow
        .approve_month(&approval_id, TestContext::DIRECTOR)
        .await
        .unwrap();
    assert_eq!(
        ctx.approval(&approval_id).await.unwrap().status,
        ApprovalStatus::Approved
    );
}

#[tokio::test]
async fn approved_month_is_frozen() {
    let ctx = TestContext::new().await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().build())
        .await
        .unwrap();
    let approval_id = ctx.submit_january().await;
    ctx.workflow
        .approve_month(&approval_id, TestContext::MANAGER)
        .await
        .unwrap();

    let reject = ctx
        .workflow
        .reject_month(&approval_id, TestContext::MANAGER, "too late")
        .await;
    assert!(matches!(reject, Err(ApplicationError::Domain(_))));
    let create = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(20)).build())
        .await;
    assert!(matches!(create, Err(ApplicationError::Domain(_))));
    let resubmit = ctx
        .workflow
        .submit_month(TestContext::MEMBER, TestContext::january(), TestContext::MEMBER)
        .await;
    assert!(matches!(resubmit, Err(ApplicationError::Domain(_))));
    assert_eq!(ctx.entry(&entry).await.unwrap().status, RecordStatus::Approved);
}

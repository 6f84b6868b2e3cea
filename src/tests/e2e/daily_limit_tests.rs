use crate::modules::work_log::use_cases::record_work_log_entry::command::UpdateWorkLogEntry;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::Hours;
use crate::tests::fixtures::commands::{CreateWorkLogEntryBuilder, RecordAbsenceBuilder};
use crate::tests::fixtures::context::{TestContext, day};

#[tokio::test]
async fn entries_and_absences_share_the_24_hour_day() {
    let ctx = TestContext::new().await;
    let entry = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(3)).hours(12.0).build())
        .await
        .unwrap();
    ctx.entries
        .create(
            CreateWorkLogEntryBuilder::new()
                .work_date(day(3))
                .hours(4.0)
                .entered_by(TestContext::MANAGER)
                .build(),
        )
        .await
        .unwrap();
    ctx.absences
        .record(RecordAbsenceBuilder::new().absence_date(day(3)).hours(8.0).build())
        .await
        .unwrap();

    let over = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(3)).hours(0.25).build())
        .await;
    match over {
        Err(ApplicationError::DailyLimitExceeded { existing, requested, date, .. }) => {
            assert_eq!(existing, Hours::DAILY_LIMIT);
            assert_eq!(requested, Hours::from_hours(0.25).unwrap());
            assert_eq!(date, day(3));
        }
        other => panic!("expected a daily limit failure, got {other:?}"),
    }

    let other_day = ctx
        .entries
        .create(CreateWorkLogEntryBuilder::new().work_date(day(4)).hours(0.25).build())
        .await;
    assert!(other_day.is_ok());

    let growing = ctx
        .entries
        .update(UpdateWorkLogEntry {
            entry_id: entry.clone(),
            expected_version: 1,
            project_id: "project-0001".into(),
            work_date: day(3),
            hours: 12.25,
            comment: None,
            updated_by: TestContext::MEMBER.into(),
        })
        .await;
    assert!(matches!(growing, Err(ApplicationError::DailyLimitExceeded { .. })));

    let calendar = ctx
        .calendar
        .month_calendar(TestContext::MANAGER, TestContext::MEMBER, TestContext::january())
        .await
        .unwrap();
    assert_eq!(calendar.day(day(3)).unwrap().total(), Hours::DAILY_LIMIT);
}

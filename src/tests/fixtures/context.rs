// Wired services over a private in-memory database and a four-member reporting chain:
// director <- manager <- member, and a peer who reports to the same manager.

use crate::modules::approvals::adapters::outbound::daily_rejection_log::{self, DailyRejection};
use crate::modules::approvals::adapters::outbound::projections::{
    MonthlyApprovalView, find_approval,
};
use crate::modules::approvals::use_cases::approval_queue::handler::ApprovalQueries;
use crate::modules::approvals::use_cases::approval_workflow::handler::ApprovalWorkflowService;
use crate::modules::members::adapters::outbound::members_in_memory::InMemoryMemberDirectory;
use crate::modules::work_log::adapters::outbound::projections::{
    AbsenceView, WorkLogEntryView, find_absence, find_entry,
};
use crate::modules::work_log::use_cases::month_calendar::handler::CalendarQueries;
use crate::modules::work_log::use_cases::record_absence::handler::AbsenceHandler;
use crate::modules::work_log::use_cases::record_work_log_entry::handler::WorkLogEntryHandler;
use crate::shared::core::primitives::FiscalMonth;
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::tests::fixtures::members::member;
use chrono::NaiveDate;
use std::sync::Arc;

pub const TOPIC: &str = "time-approvals";

/// A day of January 2025.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

pub struct TestContext {
    pub db: Database,
    pub directory: Arc<InMemoryMemberDirectory>,
    pub outbox: Arc<InMemoryDomainOutbox>,
    pub entries: WorkLogEntryHandler,
    pub absences: AbsenceHandler,
    pub workflow: ApprovalWorkflowService,
    pub queries: ApprovalQueries,
    pub calendar: CalendarQueries,
}

impl TestContext {
    pub const DIRECTOR: &'static str = "director-0001";
    pub const MANAGER: &'static str = "manager-0001";
    pub const MEMBER: &'static str = "member-0001";
    pub const PEER: &'static str = "member-0002";

    pub async fn new() -> Self {
        Self::with_outbox(InMemoryDomainOutbox::new()).await
    }

    pub async fn with_outbox(outbox: InMemoryDomainOutbox) -> Self {
        let db = Database::in_memory().await.unwrap();
        let directory = Arc::new(InMemoryMemberDirectory::new());
        directory.insert(member(Self::DIRECTOR, None)).await;
        directory.insert(member(Self::MANAGER, Some(Self::DIRECTOR))).await;
        directory.insert(member(Self::MEMBER, Some(Self::MANAGER))).await;
        directory.insert(member(Self::PEER, Some(Self::MANAGER))).await;
        let outbox = Arc::new(outbox);

        Self {
            entries: WorkLogEntryHandler::new(db.clone(), directory.clone()),
            absences: AbsenceHandler::new(db.clone(), directory.clone()),
            workflow: ApprovalWorkflowService::new(
                db.clone(),
                directory.clone(),
                outbox.clone(),
                TOPIC,
            ),
            queries: ApprovalQueries::new(db.clone(), directory.clone()),
            calendar: CalendarQueries::new(db.clone(), directory.clone()),
            db,
            directory,
            outbox,
        }
    }

    pub fn january() -> FiscalMonth {
        FiscalMonth::calendar(2025, 1).unwrap()
    }

    /// The member submits January themselves.
    pub async fn submit_january(&self) -> String {
        self.workflow
            .submit_month(Self::MEMBER, Self::january(), Self::MEMBER)
            .await
            .unwrap()
    }

    pub async fn entry(&self, id: &str) -> Option<WorkLogEntryView> {
        let mut conn = self.db.acquire().await.unwrap();
        find_entry(&mut conn, id).await.unwrap()
    }

    pub async fn absence(&self, id: &str) -> Option<AbsenceView> {
        let mut conn = self.db.acquire().await.unwrap();
        find_absence(&mut conn, id).await.unwrap()
    }

    pub async fn entry_count(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM work_log_entries")
            .fetch_one(self.db.pool())
            .await
            .unwrap()
    }

    pub async fn approval(&self, id: &str) -> Option<MonthlyApprovalView> {
        let mut conn = self.db.acquire().await.unwrap();
        find_approval(&mut conn, id).await.unwrap()
    }

    pub async fn rejection(&self, date: NaiveDate) -> Option<DailyRejection> {
        let mut conn = self.db.acquire().await.unwrap();
        daily_rejection_log::find(&mut conn, Self::MEMBER, date)
            .await
            .unwrap()
    }

    /// Total events across every stream, for asserting that a failed operation kept nothing.
    pub async fn stream_versions(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(version), 0) FROM event_streams")
            .fetch_one(self.db.pool())
            .await
            .unwrap()
    }
}

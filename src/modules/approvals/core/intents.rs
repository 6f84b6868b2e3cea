// Notifications a committed workflow operation asks to publish.
//
// Month notices belong to the approval stream. Day notices belong to a member-day stream whose
// version the workflow derives from the records it wrote.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthNotice {
    pub approval_id: String,
    pub member_id: String,
    pub fiscal_month_start: NaiveDate,
    pub fiscal_month_end: NaiveDate,
    pub actor_id: String,
    pub reason: Option<String>,
    pub occurred_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayNotice {
    pub member_id: String,
    pub date: NaiveDate,
    pub actor_id: String,
    pub reason: Option<String>,
    pub record_ids: Vec<String>,
    pub occurred_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalIntent {
    PublishMonthSubmitted(MonthNotice),
    PublishMonthApproved(MonthNotice),
    PublishMonthRejected(MonthNotice),
    PublishDaySubmitted(DayNotice),
    PublishDayRecalled(DayNotice),
    PublishDayRejected(DayNotice),
}

impl ApprovalIntent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ApprovalIntent::PublishMonthSubmitted(_) => "MonthSubmitted",
            ApprovalIntent::PublishMonthApproved(_) => "MonthApproved",
            ApprovalIntent::PublishMonthRejected(_) => "MonthRejected",
            ApprovalIntent::PublishDaySubmitted(_) => "DaySubmitted",
            ApprovalIntent::PublishDayRecalled(_) => "DayRecalled",
            ApprovalIntent::PublishDayRejected(_) => "DayRejected",
        }
    }

    pub fn occurred_at(&self) -> i64 {
        match self {
            ApprovalIntent::PublishMonthSubmitted(n)
            | ApprovalIntent::PublishMonthApproved(n)
            | ApprovalIntent::PublishMonthRejected(n) => n.occurred_at,
            ApprovalIntent::PublishDaySubmitted(n)
            | ApprovalIntent::PublishDayRecalled(n)
            | ApprovalIntent::PublishDayRejected(n) => n.occurred_at,
        }
    }

    pub fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            ApprovalIntent::PublishMonthSubmitted(n)
            | ApprovalIntent::PublishMonthApproved(n)
            | ApprovalIntent::PublishMonthRejected(n) => serde_json::to_value(n),
            ApprovalIntent::PublishDaySubmitted(n)
            | ApprovalIntent::PublishDayRecalled(n)
            | ApprovalIntent::PublishDayRejected(n) => serde_json::to_value(n),
        }
    }
}

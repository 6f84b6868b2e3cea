// Month calendar: what a member recorded per day of a fiscal month, read from projections only.

use crate::modules::approvals::adapters::outbound::daily_rejection_log::{
    self, DailyRejection,
};
use crate::modules::approvals::adapters::outbound::projections::{
    MonthlyApprovalView, find_approval, find_id_for_month,
};
use crate::modules::members::core::ports::MemberDirectory;
use crate::modules::members::permissions::ensure_may_act_for;
use crate::modules::work_log::adapters::outbound::projections::{
    AbsenceView, WorkLogEntryView, absences_in_range, entries_in_range,
};
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::{FiscalMonth, Hours};
use crate::shared::infrastructure::database::Database;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub work_hours: Hours,
    pub absence_hours: Hours,
    pub entries: Vec<WorkLogEntryView>,
    pub absences: Vec<AbsenceView>,
    pub rejection: Option<DailyRejection>,
}

impl CalendarDay {
    pub fn total(&self) -> Hours {
        self.work_hours + self.absence_hours
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub member_id: String,
    pub fiscal_month: FiscalMonth,
    pub approval: Option<MonthlyApprovalView>,
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    pub fn total(&self) -> Hours {
        self.days.iter().map(CalendarDay::total).sum()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }
}

pub struct CalendarQueries {
    db: Database,
    directory: Arc<dyn MemberDirectory>,
}

impl CalendarQueries {
    pub fn new(db: Database, directory: Arc<dyn MemberDirectory>) -> Self {
        Self { db, directory }
    }

    #[tracing::instrument(skip(self))]
    pub async fn month_calendar(
        &self,
        viewer_id: &str,
        member_id: &str,
        fiscal_month: FiscalMonth,
    ) -> Result<MonthCalendar, ApplicationError> {
        ensure_may_act_for(&*self.directory, viewer_id, member_id).await?;

        let mut conn = self.db.acquire().await?;
        let (start, end) = (fiscal_month.start(), fiscal_month.end());
        let entries = entries_in_range(&mut conn, member_id, start, end).await?;
        let absences = absences_in_range(&mut conn, member_id, start, end).await?;
        let rejections = daily_rejection_log::list_in_range(&mut conn, member_id, start, end).await?;
        let approval = match find_id_for_month(&mut conn, member_id, &fiscal_month).await? {
            Some(id) => find_approval(&mut conn, &id).await?,
            None => None,
        };

        let days = fiscal_month
            .days()
            .map(|date| {
                let entries: Vec<_> = entries.iter().filter(|e| e.work_date == date).cloned().collect();
                let absences: Vec<_> = absences
                    .iter()
                    .filter(|a| a.absence_date == date)
                    .cloned()
                    .collect();
                CalendarDay {
                    date,
                    work_hours: entries.iter().map(|e| e.hours).sum(),
                    absence_hours: absences.iter().map(|a| a.hours).sum(),
                    entries,
                    absences,
                    rejection: rejections.iter().find(|r| r.work_date == date).cloned(),
                }
            })
            .collect();

        Ok(MonthCalendar {
            member_id: member_id.to_string(),
            fiscal_month,
            approval,
            days,
        })
    }
}

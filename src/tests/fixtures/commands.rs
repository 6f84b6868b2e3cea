// Builders for the write commands, defaulting to a member logging their own day.

use crate::modules::work_log::core::absence::state::AbsenceType;
use crate::modules::work_log::use_cases::record_absence::command::RecordAbsence;
use crate::modules::work_log::use_cases::record_work_log_entry::command::CreateWorkLogEntry;
use crate::tests::fixtures::context::{TestContext, day};
use chrono::NaiveDate;

pub struct CreateWorkLogEntryBuilder {
    inner: CreateWorkLogEntry,
}

impl Default for CreateWorkLogEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl CreateWorkLogEntryBuilder {
    pub fn new() -> Self {
        Self {
            inner: CreateWorkLogEntry {
                member_id: TestContext::MEMBER.to_string(),
                project_id: "project-0001".to_string(),
                work_date: day(15),
                hours: 8.0,
                comment: Some("feature work".to_string()),
                entered_by: TestContext::MEMBER.to_string(),
            },
        }
    }

    pub fn member_id(mut self, v: impl Into<String>) -> Self {
        self.inner.member_id = v.into();
        self
    }

    pub fn project_id(mut self, v: impl Into<String>) -> Self {
        self.inner.project_id = v.into();
        self
    }

    pub fn work_date(mut self, v: NaiveDate) -> Self {
        self.inner.work_date = v;
        self
    }

    pub fn hours(mut self, v: f64) -> Self {
        self.inner.hours = v;
        self
    }

    pub fn comment(mut self, v: Option<String>) -> Self {
        self.inner.comment = v;
        self
    }

    pub fn entered_by(mut self, v: impl Into<String>) -> Self {
        self.inner.entered_by = v.into();
        self
    }

    pub fn build(self) -> CreateWorkLogEntry {
        self.inner
    }
}

pub struct RecordAbsenceBuilder {
    inner: RecordAbsence,
}

impl Default for RecordAbsenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RecordAbsenceBuilder {
    pub fn new() -> Self {
        Self {
            inner: RecordAbsence {
                member_id: TestContext::MEMBER.to_string(),
                absence_date: day(15),
                hours: 8.0,
                absence_type: AbsenceType::PaidLeave,
                reason: None,
                recorded_by: TestContext::MEMBER.to_string(),
            },
        }
    }

    pub fn member_id(mut self, v: impl Into<String>) -> Self {
        self.inner.member_id = v.into();
        self
    }

    pub fn absence_date(mut self, v: NaiveDate) -> Self {
        self.inner.absence_date = v;
        self
    }

    pub fn hours(mut self, v: f64) -> Self {
        self.inner.hours = v;
        self
    }

    pub fn absence_type(mut self, v: AbsenceType) -> Self {
        self.inner.absence_type = v;
        self
    }

    pub fn reason(mut self, v: Option<String>) -> Self {
        self.inner.reason = v;
        self
    }

    pub fn recorded_by(mut self, v: impl Into<String>) -> Self {
        self.inner.recorded_by = v.into();
        self
    }

    pub fn build(self) -> RecordAbsence {
        self.inner
    }
}

#[cfg(test)]
mod command_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_default_to_a_self_entered_working_day() {
        let built = CreateWorkLogEntryBuilder::default().build();
        assert_eq!(built.member_id, TestContext::MEMBER);
        assert_eq!(built.entered_by, built.member_id);
        assert_eq!(built.work_date, day(15));
        assert_eq!(built.hours, 8.0);
    }

    #[rstest]
    fn it_should_override_fields_with_setters() {
        let built = RecordAbsenceBuilder::new()
            .member_id("member-0009")
            .absence_date(day(2))
            .hours(4.0)
            .absence_type(AbsenceType::SickLeave)
            .reason(Some("flu".into()))
            .recorded_by("manager-0009")
            .build();
        assert_eq!(built.member_id, "member-0009");
        assert_eq!(built.absence_date, day(2));
        assert_eq!(built.hours, 4.0);
        assert_eq!(built.absence_type, AbsenceType::SickLeave);
        assert_eq!(built.reason.as_deref(), Some("flu"));
        assert_eq!(built.recorded_by, "manager-0009");
    }
}

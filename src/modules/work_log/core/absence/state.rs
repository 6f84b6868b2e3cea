use crate::modules::work_log::core::absence::events::AbsenceEvent;
use crate::modules::work_log::core::absence::events::v1::AbsenceStatusChangedV1;
use crate::modules::work_log::core::record::DailyRecord;
use crate::modules::work_log::core::status::RecordStatus;
use crate::shared::core::aggregate::Aggregate;
use crate::shared::core::primitives::Hours;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceType {
    PaidLeave,
    SickLeave,
    SpecialLeave,
    Other,
}

impl AbsenceType {
    pub fn as_str(self) -> &'static str {
        match self {
            AbsenceType::PaidLeave => "PAID_LEAVE",
            AbsenceType::SickLeave => "SICK_LEAVE",
            AbsenceType::SpecialLeave => "SPECIAL_LEAVE",
            AbsenceType::Other => "OTHER",
        }
    }
}

impl fmt::Display for AbsenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown absence type {0}")]
pub struct UnknownAbsenceType(pub String);

impl FromStr for AbsenceType {
    type Err = UnknownAbsenceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAID_LEAVE" => Ok(AbsenceType::PaidLeave),
            "SICK_LEAVE" => Ok(AbsenceType::SickLeave),
            "SPECIAL_LEAVE" => Ok(AbsenceType::SpecialLeave),
            "OTHER" => Ok(AbsenceType::Other),
            other => Err(UnknownAbsenceType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Absence {
    pub id: String,
    pub member_id: String,
    pub absence_date: NaiveDate,
    pub hours: Hours,
    pub absence_type: AbsenceType,
    pub reason: Option<String>,
    pub status: RecordStatus,
    pub recorded_by: String,
    pub updated_by: String,
    pub updated_at: i64,
    pub deleted: bool,
}

pub fn evolve(state: Option<Absence>, event: &AbsenceEvent) -> Option<Absence> {
    match (state, event) {
        (None, AbsenceEvent::AbsenceRecordedV1(e)) => Some(Absence {
            id: e.absence_id.clone(),
            member_id: e.member_id.clone(),
            absence_date: e.absence_date,
            hours: e.hours,
            absence_type: e.absence_type,
            reason: e.reason.clone(),
            status: RecordStatus::Draft,
            recorded_by: e.recorded_by.clone(),
            updated_by: e.recorded_by.clone(),
            updated_at: e.recorded_at,
            deleted: false,
        }),
        (Some(absence), AbsenceEvent::AbsenceUpdatedV1(e)) => Some(Absence {
            absence_date: e.absence_date,
            hours: e.hours,
            absence_type: e.absence_type,
            reason: e.reason.clone(),
            updated_by: e.updated_by.clone(),
            updated_at: e.updated_at,
            ..absence
        }),
        (Some(absence), AbsenceEvent::AbsenceDeletedV1(e)) => Some(Absence {
            deleted: true,
            updated_by: e.deleted_by.clone(),
            updated_at: e.deleted_at,
            ..absence
        }),
        (Some(absence), AbsenceEvent::AbsenceStatusChangedV1(e)) => Some(Absence {
            status: e.to,
            updated_by: e.changed_by.clone(),
            updated_at: e.changed_at,
            ..absence
        }),
        (state, _) => state,
    }
}

impl Aggregate for Absence {
    type Event = AbsenceEvent;
    const AGGREGATE_TYPE: &'static str = "absence";

    fn evolve(state: Option<Self>, event: &AbsenceEvent) -> Option<Self> {
        evolve(state, event)
    }
}

impl DailyRecord for Absence {
    const KIND: &'static str = "absence";

    fn member_id(&self) -> &str {
        &self.member_id
    }

    fn date(&self) -> NaiveDate {
        self.absence_date
    }

    fn hours(&self) -> Hours {
        self.hours
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn status_changed(&self, to: RecordStatus, changed_by: &str, changed_at: i64) -> AbsenceEvent {
        AbsenceEvent::AbsenceStatusChangedV1(AbsenceStatusChangedV1 {
            from: self.status,
            to,
            changed_by: changed_by.to_string(),
            changed_at,
        })
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle shared by work-log entries and absences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Draft,
    Submitted,
    Approved,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Draft => "DRAFT",
            RecordStatus::Submitted => "SUBMITTED",
            RecordStatus::Approved => "APPROVED",
        }
    }

    /// DRAFT -> SUBMITTED -> APPROVED, and SUBMITTED -> DRAFT on reject or recall.
    pub fn can_transition_to(self, to: RecordStatus) -> bool {
        matches!(
            (self, to),
            (RecordStatus::Draft, RecordStatus::Submitted)
                | (RecordStatus::Submitted, RecordStatus::Approved)
                | (RecordStatus::Submitted, RecordStatus::Draft)
        )
    }

    pub fn is_editable(self) -> bool {
        self == RecordStatus::Draft
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record status {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RecordStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(RecordStatus::Draft),
            "SUBMITTED" => Ok(RecordStatus::Submitted),
            "APPROVED" => Ok(RecordStatus::Approved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

use crate::shared::core::primitives::{Hours, PrimitiveError};
use crate::shared::infrastructure::event_store::EventStoreError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(
        "concurrency conflict on stream {stream_id}: expected version {expected}, actual {actual}"
    )]
    ConcurrencyConflict {
        stream_id: String,
        expected: i64,
        actual: i64,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{actor_id} is not permitted to act for {member_id}")]
    PermissionDenied { actor_id: String, member_id: String },

    #[error(
        "daily limit exceeded for {member_id} on {date}: {existing} recorded plus {requested} requested is over 24h"
    )]
    DailyLimitExceeded {
        member_id: String,
        date: NaiveDate,
        existing: Hours,
        requested: Hours,
    },

    #[error("assigning manager {manager_id} to {member_id} would create a circular reporting chain")]
    CircularReference {
        member_id: String,
        manager_id: String,
    },

    #[error("{date} for {member_id} is covered by approved monthly approval {approval_id}")]
    RejectBlockedByApproval {
        member_id: String,
        date: NaiveDate,
        approval_id: String,
    },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("domain rejected: {0}")]
    Domain(String),

    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl ApplicationError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ApplicationError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::ConcurrencyConflict { .. } | ApplicationError::Conflict(_)
        )
    }
}

impl From<EventStoreError> for ApplicationError {
    fn from(error: EventStoreError) -> Self {
        match error {
            EventStoreError::VersionMismatch {
                stream_id,
                expected,
                actual,
            } => ApplicationError::ConcurrencyConflict {
                stream_id,
                expected,
                actual,
            },
            EventStoreError::Backend(e) => e.into(),
            other => ApplicationError::Storage(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for ApplicationError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApplicationError::Conflict(db.message().to_string())
            }
            _ => ApplicationError::Storage(error.to_string()),
        }
    }
}

impl From<PrimitiveError> for ApplicationError {
    fn from(error: PrimitiveError) -> Self {
        ApplicationError::Validation(error.to_string())
    }
}

impl From<anyhow::Error> for ApplicationError {
    fn from(error: anyhow::Error) -> Self {
        ApplicationError::Unexpected(format!("{error:#}"))
    }
}

#[cfg(test)]
mod application_error_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_map_a_version_mismatch_to_a_concurrency_conflict() {
        let error: ApplicationError = EventStoreError::VersionMismatch {
            stream_id: "entry-0001".into(),
            expected: 1,
            actual: 2,
        }
        .into();
        assert!(error.is_retryable());
        assert_eq!(
            error.to_string(),
            "concurrency conflict on stream entry-0001: expected version 1, actual 2"
        );
    }

    #[rstest]
    fn it_should_map_primitive_errors_to_validation() {
        let error: ApplicationError = PrimitiveError::BlankReason.into();
        assert!(matches!(error, ApplicationError::Validation(_)));
        assert!(!error.is_retryable());
    }
}

// Outbox kept in process, for tests and local runs. A row is identified by its stream id and
// stream version; a second row with the same identity is refused and remembered, so a test can
// tell a lost notice from one that was never sent. Can be switched offline at any time to
// exercise post-commit failures.

use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryDomainOutbox {
    accepted: Mutex<Vec<OutboxRow>>,
    refused: Mutex<Vec<(String, i64)>>,
    offline: AtomicBool,
}

impl InMemoryDomainOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts offline; every enqueue fails with a transient error until switched back.
    pub fn offline() -> Self {
        let outbox = Self::default();
        outbox.set_offline(true);
        outbox
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn rows(&self) -> Vec<OutboxRow> {
        self.accepted.lock().await.clone()
    }

    pub async fn event_types(&self) -> Vec<String> {
        self.accepted
            .lock()
            .await
            .iter()
            .map(|r| r.event_type.clone())
            .collect()
    }

    /// Versions accepted on one stream, in arrival order.
    pub async fn stream_versions(&self, stream_id: &str) -> Vec<i64> {
        self.accepted
            .lock()
            .await
            .iter()
            .filter(|r| r.stream_id == stream_id)
            .map(|r| r.stream_version)
            .collect()
    }

    /// Identities refused as duplicates.
    pub async fn refused(&self) -> Vec<(String, i64)> {
        self.refused.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl DomainOutbox for InMemoryDomainOutbox {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(OutboxError::Transient("outbox offline".into()));
        }
        let mut accepted = self.accepted.lock().await;
        let taken = accepted
            .iter()
            .any(|r| r.stream_id == row.stream_id && r.stream_version == row.stream_version);
        if taken {
            self.refused
                .lock()
                .await
                .push((row.stream_id.clone(), row.stream_version));
            return Err(OutboxError::Duplicate {
                stream_id: row.stream_id,
                stream_version: row.stream_version,
            });
        }
        accepted.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod in_memory_domain_outbox_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> OutboxRow {
        OutboxRow {
            topic: "time-approvals".to_string(),
            event_type: "MonthSubmitted".to_string(),
            event_version: 1,
            stream_id: "approval-0001".to_string(),
            stream_version: 2,
            occurred_at: 0,
            payload: serde_json::json!({ "member_id": "member-0001" }),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_accept_successive_versions_of_a_stream(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::new();
        outbox.enqueue(row.clone()).await.unwrap();
        outbox
            .enqueue(OutboxRow {
                event_type: "MonthApproved".into(),
                stream_version: 3,
                ..row
            })
            .await
            .unwrap();
        assert_eq!(
            outbox.event_types().await,
            vec!["MonthSubmitted".to_string(), "MonthApproved".to_string()]
        );
        assert_eq!(outbox.stream_versions("approval-0001").await, vec![2, 3]);
        assert!(outbox.refused().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_and_remember_a_duplicate(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::new();
        outbox.enqueue(row.clone()).await.unwrap();
        let result = outbox.enqueue(row).await;
        assert!(matches!(
            result,
            Err(OutboxError::Duplicate {
                stream_id: _,
                stream_version: 2
            })
        ));
        assert_eq!(outbox.rows().await.len(), 1);
        assert_eq!(outbox.refused().await, vec![("approval-0001".to_string(), 2)]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_while_offline_and_recover(row: OutboxRow) {
        let outbox = InMemoryDomainOutbox::offline();
        assert!(matches!(
            outbox.enqueue(row.clone()).await,
            Err(OutboxError::Transient(_))
        ));
        outbox.set_offline(false);
        assert!(outbox.enqueue(row).await.is_ok());
        assert_eq!(outbox.rows().await.len(), 1);
    }
}

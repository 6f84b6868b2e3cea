// Outbox that hands every row to the tracing pipeline as a structured record.
// Used by the binary when no broker is wired in.

use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDomainOutbox;

#[async_trait::async_trait]
impl DomainOutbox for TracingDomainOutbox {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError> {
        tracing::info!(
            target: "time_approvals::notifications",
            topic = %row.topic,
            event_type = %row.event_type,
            event_version = row.event_version,
            stream_id = %row.stream_id,
            stream_version = row.stream_version,
            occurred_at = row.occurred_at,
            payload = %row.payload,
            "notification"
        );
        Ok(())
    }
}

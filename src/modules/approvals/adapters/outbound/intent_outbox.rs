use crate::modules::approvals::core::intents::ApprovalIntent;
use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};

/// Translate committed intents into outbox rows and enqueue them.
/// Each intent takes the next version after `starting_version` on `stream_id`.
pub async fn dispatch_intents(
    outbox: &dyn DomainOutbox,
    stream_id: &str,
    starting_version: i64,
    topic: &str,
    intents: Vec<ApprovalIntent>,
) -> Result<(), OutboxError> {
    for (i, intent) in intents.into_iter().enumerate() {
        let payload = intent
            .payload()
            .map_err(|e| OutboxError::Backend(e.to_string()))?;
        outbox
            .enqueue(OutboxRow {
                topic: topic.to_string(),
                event_type: intent.event_type().to_string(),
                event_version: 1,
                stream_id: stream_id.to_string(),
                stream_version: starting_version + i as i64 + 1,
                occurred_at: intent.occurred_at(),
                payload,
            })
            .await?;
    }
    Ok(())
}

/// Publish after commit. The workflow outcome is already durable, so failures are only logged.
pub async fn publish_committed(
    outbox: &dyn DomainOutbox,
    stream_id: &str,
    starting_version: i64,
    topic: &str,
    intents: Vec<ApprovalIntent>,
) {
    if let Err(error) = dispatch_intents(outbox, stream_id, starting_version, topic, intents).await {
        tracing::warn!(stream_id, %error, "notification not enqueued");
    }
}

use thiserror::Error;

pub mod sqlite;

pub use sqlite::SqliteEventStore;

#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("version mismatch on stream {stream_id}: expected {expected}, actual {actual}")]
    VersionMismatch {
        stream_id: String,
        expected: i64,
        actual: i64,
    },

    #[error("stream {stream_id} holds {actual} events, not {expected}")]
    AggregateTypeMismatch {
        stream_id: String,
        expected: String,
        actual: String,
    },

    #[error("event payload could not be encoded or decoded: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent<E> {
    pub stream_id: String,
    pub aggregate_type: String,
    pub sequence_number: i64,
    pub event_type: String,
    pub payload: E,
    pub occurred_at: i64,
}

#[derive(Debug, Clone)]
pub struct LoadedStream<E> {
    pub events: Vec<StoredEvent<E>>,
    pub version: i64,
}

impl<E> LoadedStream<E> {
    pub fn empty() -> Self {
        Self {
            events: Vec::new(),
            version: 0,
        }
    }
}

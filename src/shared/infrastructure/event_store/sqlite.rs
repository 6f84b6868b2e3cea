// SQLite implementation of the append-only event log.
//
// Purpose
// - Persist events per stream and serialise concurrent appenders on the same stream.
//
// Responsibilities
// - The stream row in `event_streams` carries the current version. Appends claim the next
//   versions with a compare-and-swap on that column; a lost race is a `VersionMismatch`.
// - Every method runs on the caller's connection so the claim, the event rows and any
//   projection rows written afterwards share one transaction.
//
// Boundaries
// - Events of one aggregate type live in `<aggregate_type>_events`.

use crate::shared::core::aggregate::DomainEvent;
use crate::shared::core::primitives::now_millis;
use crate::shared::infrastructure::event_store::{EventStoreError, LoadedStream, StoredEvent};
use sqlx::{Row, SqliteConnection};

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteEventStore;

fn events_table(aggregate_type: &str) -> String {
    debug_assert!(
        aggregate_type
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '_'),
        "aggregate type must be a plain identifier"
    );
    format!("{aggregate_type}_events")
}

impl SqliteEventStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn current_version(
        &self,
        conn: &mut SqliteConnection,
        stream_id: &str,
    ) -> Result<i64, EventStoreError> {
        let version =
            sqlx::query_scalar::<_, i64>("SELECT version FROM event_streams WHERE stream_id = ?1")
                .bind(stream_id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(version.unwrap_or(0))
    }

    pub async fn append<E: DomainEvent>(
        &self,
        conn: &mut SqliteConnection,
        stream_id: &str,
        aggregate_type: &str,
        expected_version: i64,
        events: &[E],
    ) -> Result<i64, EventStoreError> {
        if events.is_empty() {
            return Ok(expected_version);
        }
        let new_version = expected_version + events.len() as i64;
        let now = now_millis();

        let claimed = if expected_version == 0 {
            sqlx::query(
                "INSERT INTO event_streams (stream_id, aggregate_type, version, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(stream_id) DO NOTHING",
            )
            .bind(stream_id)
            .bind(aggregate_type)
            .bind(new_version)
            .bind(now)
            .execute(&mut *conn)
            .await?
            .rows_affected()
        } else {
            sqlx::query(
                "UPDATE event_streams SET version = ?1, updated_at = ?2
                 WHERE stream_id = ?3 AND aggregate_type = ?4 AND version = ?5",
            )
            .bind(new_version)
            .bind(now)
            .bind(stream_id)
            .bind(aggregate_type)
            .bind(expected_version)
            .execute(&mut *conn)
            .await?
            .rows_affected()
        };

        if claimed == 0 {
            let actual = self.current_version(conn, stream_id).await?;
            tracing::debug!(stream_id, expected_version, actual, "append lost the version race");
            return Err(EventStoreError::VersionMismatch {
                stream_id: stream_id.to_string(),
                expected: expected_version,
                actual,
            });
        }

        let insert = format!(
            "INSERT INTO {} (stream_id, sequence_number, event_type, payload, occurred_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            events_table(aggregate_type)
        );
        for (offset, event) in events.iter().enumerate() {
            let payload = serde_json::to_string(event)?;
            sqlx::query(&insert)
                .bind(stream_id)
                .bind(expected_version + offset as i64 + 1)
                .bind(event.event_type())
                .bind(payload)
                .bind(now)
                .execute(&mut *conn)
                .await?;
        }

        tracing::debug!(
            stream_id,
            aggregate_type,
            from = expected_version + 1,
            to = new_version,
            "appended events"
        );
        Ok(new_version)
    }

    pub async fn read_stream<E: DomainEvent>(
        &self,
        conn: &mut SqliteConnection,
        aggregate_type: &str,
        stream_id: &str,
    ) -> Result<LoadedStream<E>, EventStoreError> {
        let stream = sqlx::query("SELECT aggregate_type FROM event_streams WHERE stream_id = ?1")
            .bind(stream_id)
            .fetch_optional(&mut *conn)
            .await?;
        let Some(stream) = stream else {
            return Ok(LoadedStream::empty());
        };
        let stored_type: String = stream.try_get("aggregate_type")?;
        if stored_type != aggregate_type {
            return Err(EventStoreError::AggregateTypeMismatch {
                stream_id: stream_id.to_string(),
                expected: aggregate_type.to_string(),
                actual: stored_type,
            });
        }

        let select = format!(
            "SELECT sequence_number, event_type, payload, occurred_at FROM {}
             WHERE stream_id = ?1 ORDER BY sequence_number ASC",
            events_table(aggregate_type)
        );
        let rows = sqlx::query(&select)
            .bind(stream_id)
            .fetch_all(&mut *conn)
            .await?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            let payload: String = row.try_get("payload")?;
            events.push(StoredEvent {
                stream_id: stream_id.to_string(),
                aggregate_type: aggregate_type.to_string(),
                sequence_number: row.try_get("sequence_number")?,
                event_type: row.try_get("event_type")?,
                payload: serde_json::from_str::<E>(&payload)?,
                occurred_at: row.try_get("occurred_at")?,
            });
        }
        let version = events.last().map(|e| e.sequence_number).unwrap_or(0);
        Ok(LoadedStream { events, version })
    }
}

#[cfg(test)]
mod sqlite_event_store_tests {
    use super::*;
    use crate::modules::organizations::core::events::OrganizationEvent;
    use crate::modules::organizations::core::events::v1::{
        OrganizationDeactivatedV1, OrganizationRenamedV1,
    };
    use crate::shared::infrastructure::database::Database;
    use crate::tests::fixtures::events::organization_created_v1;
    use rstest::rstest;

    const STREAM: &str = "org-0001";
    const TYPE: &str = "organization";

    fn renamed(name: &str) -> OrganizationEvent {
        OrganizationEvent::OrganizationRenamedV1(OrganizationRenamedV1 {
            name: name.to_string(),
            renamed_by: "admin-0001".to_string(),
            renamed_at: 1_700_000_100_000,
        })
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_append_and_read_back_a_gap_free_stream() {
        let db = Database::in_memory().await.unwrap();
        let store = SqliteEventStore::new();
        let mut conn = db.acquire().await.unwrap();

        let first = vec![OrganizationEvent::OrganizationCreatedV1(organization_created_v1(STREAM))];
        assert_eq!(store.append(&mut conn, STREAM, TYPE, 0, &first).await.unwrap(), 1);
        let more = vec![renamed("Platform"), renamed("Platform Team")];
        assert_eq!(store.append(&mut conn, STREAM, TYPE, 1, &more).await.unwrap(), 3);

        let stream = store
            .read_stream::<OrganizationEvent>(&mut conn, TYPE, STREAM)
            .await
            .unwrap();
        assert_eq!(stream.version, 3);
        let sequence: Vec<i64> = stream.events.iter().map(|e| e.sequence_number).collect();
        assert_eq!(sequence, vec![1, 2, 3]);
        assert_eq!(stream.events[1].event_type, "OrganizationRenamed");
        assert_eq!(stream.events[2].payload, renamed("Platform Team"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_read_an_unknown_stream_as_empty() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let stream = SqliteEventStore::new()
            .read_stream::<OrganizationEvent>(&mut conn, TYPE, "missing")
            .await
            .unwrap();
        assert!(stream.events.is_empty());
        assert_eq!(stream.version, 0);
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[tokio::test]
    async fn it_should_reject_an_append_with_a_stale_expected_version(#[case] expected: i64) {
        let db = Database::in_memory().await.unwrap();
        let store = SqliteEventStore::new();
        let mut conn = db.acquire().await.unwrap();
        let first = vec![OrganizationEvent::OrganizationCreatedV1(organization_created_v1(STREAM))];
        store.append(&mut conn, STREAM, TYPE, 0, &first).await.unwrap();

        let result = store
            .append(&mut conn, STREAM, TYPE, expected, &[renamed("Late")])
            .await;
        match result {
            Err(EventStoreError::VersionMismatch {
                expected: e,
                actual,
                ..
            }) => {
                assert_eq!(e, expected);
                assert_eq!(actual, 1);
            }
            other => panic!("expected VersionMismatch, got {other:?}"),
        }
        let stream = store
            .read_stream::<OrganizationEvent>(&mut conn, TYPE, STREAM)
            .await
            .unwrap();
        assert_eq!(stream.events.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_treat_an_empty_batch_as_a_no_op() {
        let db = Database::in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let version = SqliteEventStore::new()
            .append::<OrganizationEvent>(&mut conn, STREAM, TYPE, 0, &[])
            .await
            .unwrap();
        assert_eq!(version, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_to_read_a_stream_as_another_aggregate_type() {
        let db = Database::in_memory().await.unwrap();
        let store = SqliteEventStore::new();
        let mut conn = db.acquire().await.unwrap();
        let first = vec![OrganizationEvent::OrganizationCreatedV1(organization_created_v1(STREAM))];
        store.append(&mut conn, STREAM, TYPE, 0, &first).await.unwrap();

        let result = store
            .read_stream::<OrganizationEvent>(&mut conn, "absence", STREAM)
            .await;
        assert!(matches!(
            result,
            Err(EventStoreError::AggregateTypeMismatch { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_discard_appends_when_the_transaction_rolls_back() {
        let db = Database::in_memory().await.unwrap();
        let store = SqliteEventStore::new();
        {
            let mut tx = db.begin().await.unwrap();
            let first =
                vec![OrganizationEvent::OrganizationCreatedV1(organization_created_v1(STREAM))];
            store.append(&mut *tx, STREAM, TYPE, 0, &first).await.unwrap();
            let deactivated =
                OrganizationEvent::OrganizationDeactivatedV1(OrganizationDeactivatedV1 {
                    deactivated_by: "admin-0001".to_string(),
                    deactivated_at: 1_700_000_200_000,
                });
            store.append(&mut *tx, STREAM, TYPE, 1, &[deactivated]).await.unwrap();
            tx.rollback().await.unwrap();
        }
        let mut conn = db.acquire().await.unwrap();
        assert_eq!(store.current_version(&mut conn, STREAM).await.unwrap(), 0);
    }
}

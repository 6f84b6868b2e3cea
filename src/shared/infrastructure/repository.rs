// Aggregate repository: event replay on load, append plus projection on save.
//
// Purpose
// - Read models must never observe an event without its projection row, or the reverse.
//
// Responsibilities
// - `load` folds the stream through `Aggregate::evolve`.
// - `save` appends the uncommitted events with the loaded version as the expected version and,
//   on the same connection, hands the new state to the projection. A failed append returns
//   before the projection runs; the caller drops its transaction and nothing is kept.

use crate::shared::core::aggregate::{Aggregate, Tracked};
use crate::shared::infrastructure::event_store::{EventStoreError, SqliteEventStore};
use async_trait::async_trait;
use sqlx::SqliteConnection;
use std::marker::PhantomData;

#[async_trait]
pub trait Projection<A: Aggregate>: Send + Sync {
    async fn project(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        version: i64,
        state: &A,
    ) -> Result<(), sqlx::Error>;
}

pub struct AggregateRepository<A, P>
where
    A: Aggregate,
    P: Projection<A>,
{
    store: SqliteEventStore,
    projection: P,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A, P> AggregateRepository<A, P>
where
    A: Aggregate,
    P: Projection<A>,
{
    pub fn new(projection: P) -> Self {
        Self {
            store: SqliteEventStore::new(),
            projection,
            _aggregate: PhantomData,
        }
    }

    pub async fn load(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Tracked<A>>, EventStoreError> {
        let stream = self
            .store
            .read_stream::<A::Event>(conn, A::AGGREGATE_TYPE, id)
            .await?;
        let state = A::replay(stream.events.iter().map(|e| &e.payload));
        Ok(state.map(|s| Tracked::restore(id, stream.version, s)))
    }

    pub async fn save(
        &self,
        conn: &mut SqliteConnection,
        aggregate: &mut Tracked<A>,
    ) -> Result<i64, EventStoreError> {
        if !aggregate.has_changes() {
            return Ok(aggregate.version());
        }
        let version = self
            .store
            .append(
                conn,
                aggregate.id(),
                A::AGGREGATE_TYPE,
                aggregate.version(),
                aggregate.uncommitted(),
            )
            .await?;
        if let Some(state) = aggregate.state() {
            self.projection
                .project(conn, aggregate.id(), version, state)
                .await?;
        }
        aggregate.mark_committed(version);
        Ok(version)
    }
}

// Aggregate abstraction shared by every event-sourced module.
//
// Purpose
// - An aggregate's state is a pure fold of its events; nothing else mutates it.
//
// Responsibilities
// - `Aggregate::evolve` is the reducer `(state, event) -> state`. It never performs input or output.
// - `Tracked` carries the loaded version and the events recorded since loading, so a repository
//   can append them with the loaded version as the expected version.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub trait DomainEvent: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Stable name stored next to the payload.
    fn event_type(&self) -> &'static str;
}

pub trait Aggregate: Clone + Debug + Send + Sync + 'static {
    type Event: DomainEvent;

    /// Stable identifier of the aggregate type. Also names its event table.
    const AGGREGATE_TYPE: &'static str;

    fn evolve(state: Option<Self>, event: &Self::Event) -> Option<Self>;

    fn replay<'a, I>(events: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self::Event>,
    {
        events.into_iter().fold(None, Self::evolve)
    }
}

#[derive(Debug, Clone)]
pub struct Tracked<A: Aggregate> {
    id: String,
    version: i64,
    state: Option<A>,
    uncommitted: Vec<A::Event>,
}

impl<A: Aggregate> Tracked<A> {
    /// A stream that has no events yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: 0,
            state: None,
            uncommitted: Vec::new(),
        }
    }

    pub fn restore(id: impl Into<String>, version: i64, state: A) -> Self {
        Self {
            id: id.into(),
            version,
            state: Some(state),
            uncommitted: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Version of the last committed event; uncommitted events are not counted.
    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn state(&self) -> Option<&A> {
        self.state.as_ref()
    }

    pub fn into_state(self) -> Option<A> {
        self.state
    }

    pub fn record(&mut self, events: Vec<A::Event>) {
        for event in &events {
            self.state = A::evolve(self.state.take(), event);
        }
        self.uncommitted.extend(events);
    }

    pub fn uncommitted(&self) -> &[A::Event] {
        &self.uncommitted
    }

    pub fn has_changes(&self) -> bool {
        !self.uncommitted.is_empty()
    }

    pub(crate) fn mark_committed(&mut self, version: i64) {
        self.version = version;
        self.uncommitted.clear();
    }
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type")]
    enum CounterEvent {
        Opened,
        Incremented { by: u32 },
    }

    impl DomainEvent for CounterEvent {
        fn event_type(&self) -> &'static str {
            match self {
                CounterEvent::Opened => "Opened",
                CounterEvent::Incremented { .. } => "Incremented",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        total: u32,
    }

    impl Aggregate for Counter {
        type Event = CounterEvent;
        const AGGREGATE_TYPE: &'static str = "counter";

        fn evolve(state: Option<Self>, event: &CounterEvent) -> Option<Self> {
            match (state, event) {
                (None, CounterEvent::Opened) => Some(Counter { total: 0 }),
                (Some(c), CounterEvent::Incremented { by }) => Some(Counter { total: c.total + by }),
                (state, _) => state,
            }
        }
    }

    #[rstest]
    fn it_should_replay_events_in_order() {
        let events = vec![
            CounterEvent::Opened,
            CounterEvent::Incremented { by: 2 },
            CounterEvent::Incremented { by: 3 },
        ];
        assert_eq!(Counter::replay(&events), Some(Counter { total: 5 }));
    }

    #[rstest]
    fn it_should_ignore_events_before_the_stream_is_opened() {
        let events = vec![CounterEvent::Incremented { by: 2 }];
        assert_eq!(Counter::replay(&events), None);
    }

    #[rstest]
    fn it_should_track_recorded_events_until_committed() {
        let mut tracked = Tracked::<Counter>::new("c-1");
        tracked.record(vec![CounterEvent::Opened, CounterEvent::Incremented { by: 4 }]);
        assert_eq!(tracked.version(), 0);
        assert_eq!(tracked.uncommitted().len(), 2);
        assert_eq!(tracked.state(), Some(&Counter { total: 4 }));

        tracked.mark_committed(2);
        assert_eq!(tracked.version(), 2);
        assert!(!tracked.has_changes());
    }
}

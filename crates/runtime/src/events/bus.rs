//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::EnumIter;
use tokio::sync::broadcast;

use super::types::{SessionEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, EnumIter)]
pub enum Topic {
    /// Committed actions and passes
    Turn,
    /// New game, save, load, failures, game over
    Session,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Turn(TurnEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Turn(_) => Topic::Turn,
            Event::Session(_) => Topic::Session,
        }
    }
}

impl From<TurnEvent> for Event {
    fn from(event: TurnEvent) -> Self {
        Event::Turn(event)
    }
}

impl From<SessionEvent> for Event {
    fn from(event: SessionEvent) -> Self {
        Event::Session(event)
    }
}

struct Channels {
    turn: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Session => &self.session,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                turn: broadcast::channel(capacity).0,
                session: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to every topic, in declaration order.
    pub fn subscribe_all(&self) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        use strum::IntoEnumIterator;
        Topic::iter()
            .map(|topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Side;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut turns = bus.subscribe(Topic::Turn);
        let mut session = bus.subscribe(Topic::Session);

        bus.publish(TurnEvent::Passed { side: Side::Enemy });
        bus.publish(SessionEvent::NewGame);

        assert_eq!(
            turns.recv().await.unwrap(),
            Event::Turn(TurnEvent::Passed { side: Side::Enemy })
        );
        assert_eq!(
            session.recv().await.unwrap(),
            Event::Session(SessionEvent::NewGame)
        );
        assert!(turns.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(0);
        bus.publish(SessionEvent::GameOver {
            winner: Side::Player,
        });
        assert_eq!(bus.subscribe_all().len(), 2);
    }
}

use stagecraft_shared::models::events::DomainEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// In-process publish/subscribe channel between the persistence layer and
/// subscribed views. Replaces live database subscriptions: every mutation
/// publishes, each view holds its own receiver.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Fire-and-forget publish. Sending only fails when no receiver exists.
    pub fn publish(&self, event: DomainEvent) {
        match self.sender.send(event) {
            Ok(subscribers) => debug!("Published domain event to {} subscribers", subscribers),
            Err(_) => debug!("Published domain event with no active subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_shared::models::events::ContactReceivedEvent;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let bus = EventBus::new(16);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let submission_id = Uuid::new_v4();
        bus.publish(DomainEvent::ContactReceived(ContactReceivedEvent {
            submission_id,
            timestamp: 1_700_000_000,
        }));

        for receiver in [&mut first, &mut second] {
            match receiver.recv().await.unwrap() {
                DomainEvent::ContactReceived(event) => {
                    assert_eq!(event.submission_id, submission_id)
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        bus.publish(DomainEvent::ContactReceived(ContactReceivedEvent {
            submission_id: Uuid::new_v4(),
            timestamp: 0,
        }));
    }
}

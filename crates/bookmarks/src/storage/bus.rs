use tokio::sync::broadcast;

use super::StorageChange;

pub const DEFAULT_BUS_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<StorageChange>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.sender.subscribe()
    }

    /// Publishes a change. Returns the number of subscribers that will see it.
    pub fn publish(&self, change: StorageChange) -> usize {
        self.sender.send(change).unwrap_or(0)
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change(value: i64) -> StorageChange {
        StorageChange {
            key: "customTags".to_string(),
            old_value: None,
            new_value: Some(json!(value)),
        }
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let bus = ChangeBus::default();
        assert_eq!(bus.publish(change(1)), 0);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_change() {
        let bus = ChangeBus::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.publish(change(7)), 2);

        assert_eq!(rx1.recv().await.expect("recv1"), change(7));
        assert_eq!(rx2.recv().await.expect("recv2"), change(7));
    }
}

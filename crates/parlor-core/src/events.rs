use async_trait::async_trait;
use parlor_models::update::{Updates, EVENT_UPDATES};
use tokio::sync::broadcast;

use crate::sync::{SyncError, SyncService};

#[derive(Debug, Clone)]
pub struct ServerEvent {
    pub event_type: String,
    pub payload: serde_json::Value,
    /// Account whose sessions receive this event.
    pub user_id: i64,
    /// When set, sessions bound to this permanent auth key skip the event.
    pub exclude_perm_auth_key_id: Option<i64>,
}

/// Broadcast-based event bus for real-time dispatch.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: ServerEvent) {
        // Ignore error if no receivers
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Helper: publish an event to an account, skipping the originating auth key.
    pub fn dispatch_not_me(
        &self,
        event_type: &str,
        payload: serde_json::Value,
        user_id: i64,
        perm_auth_key_id: i64,
    ) {
        self.publish(ServerEvent {
            event_type: event_type.to_string(),
            payload,
            user_id,
            exclude_perm_auth_key_id: Some(perm_auth_key_id),
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(4096)
    }
}

#[async_trait]
impl SyncService for EventBus {
    async fn notify_others(
        &self,
        user_id: i64,
        perm_auth_key_id: i64,
        updates: Updates,
    ) -> Result<(), SyncError> {
        let payload = serde_json::to_value(&updates)?;
        tracing::debug!(
            user_id,
            perm_auth_key_id,
            updates = updates.updates.len(),
            "dispatching updates to other sessions"
        );
        self.dispatch_not_me(EVENT_UPDATES, payload, user_id, perm_auth_key_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_models::update::Update;

    #[tokio::test]
    async fn notify_others_tags_origin_key() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let updates = Updates::from_updates(vec![Update::UserName {
            user_id: 5,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            username: String::new(),
        }]);

        bus.notify_others(5, 900, updates.clone()).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EVENT_UPDATES);
        assert_eq!(event.user_id, 5);
        assert_eq!(event.exclude_perm_auth_key_id, Some(900));
        let decoded: Updates = serde_json::from_value(event.payload).unwrap();
        assert_eq!(decoded, updates);
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_ok() {
        let bus = EventBus::default();
        let result = bus
            .notify_others(1, 2, Updates::from_updates(Vec::new()))
            .await;
        assert!(result.is_ok());
    }
}

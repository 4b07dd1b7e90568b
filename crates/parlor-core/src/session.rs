use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::events::ServerEvent;

/// One connected client of an account.
pub struct Session {
    pub user_id: i64,
    pub perm_auth_key_id: i64,
    pub session_id: String,
    pub sequence: u64,
}

impl Session {
    pub fn new(user_id: i64, perm_auth_key_id: i64) -> Self {
        Self {
            user_id,
            perm_auth_key_id,
            session_id: uuid::Uuid::new_v4().to_string(),
            sequence: 0,
        }
    }

    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    pub fn should_receive_event(&self, event: &ServerEvent) -> bool {
        if event.user_id != self.user_id {
            return false;
        }
        // The session that caused a change already knows about it.
        event.exclude_perm_auth_key_id != Some(self.perm_auth_key_id)
    }

    /// Collect the events already queued for this session without waiting.
    pub fn drain_pending(
        &mut self,
        rx: &mut broadcast::Receiver<ServerEvent>,
    ) -> Vec<(u64, ServerEvent)> {
        let mut delivered = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    if self.should_receive_event(&event) {
                        delivered.push((self.next_sequence(), event));
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        session_id = %self.session_id,
                        skipped,
                        "session lagged behind event bus"
                    );
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        delivered
    }
}

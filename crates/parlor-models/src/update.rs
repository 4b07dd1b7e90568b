use chrono::Utc;
use serde::{Deserialize, Serialize};

// Dispatch event names
pub const EVENT_UPDATES: &str = "UPDATES";

/// A single change pushed to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_")]
pub enum Update {
    #[serde(rename = "updateUserName")]
    UserName {
        user_id: i64,
        first_name: String,
        last_name: String,
        username: String,
    },
}

/// Envelope handed to the update-distribution layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Updates {
    pub updates: Vec<Update>,
    /// Unix timestamp (seconds) at which the envelope was built.
    pub date: i64,
    pub seq: i32,
}

impl Updates {
    /// Wrap updates that do not advance the account's common sequence.
    pub fn from_updates(updates: Vec<Update>) -> Self {
        Self {
            updates,
            date: Utc::now().timestamp(),
            seq: 0,
        }
    }
}

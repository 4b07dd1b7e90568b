use serde::{Deserialize, Serialize};

/// Routing metadata of the session that issued a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Permanent auth key of the originating client; its sessions are
    /// excluded from the fan-out of changes they caused.
    pub perm_auth_key_id: i64,
    /// Client label for logs only.
    #[serde(default)]
    pub client: Option<String>,
}

impl SessionContext {
    pub fn new(perm_auth_key_id: i64) -> Self {
        Self {
            perm_auth_key_id,
            client: None,
        }
    }
}

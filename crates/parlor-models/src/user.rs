use serde::{Deserialize, Serialize};

/// Point-in-time read of a user's profile fields.
///
/// A snapshot is never edited in place. After a successful write the caller
/// derives a new value with [`UserSnapshot::with_names`] or
/// [`UserSnapshot::with_about`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
}

impl UserSnapshot {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: None,
            about: None,
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    /// Current biography; an unset about reads as the empty string.
    pub fn about(&self) -> &str {
        self.about.as_deref().unwrap_or("")
    }

    pub fn names_equal(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    pub fn with_names(&self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..self.clone()
        }
    }

    /// An empty about clears the field.
    pub fn with_about(&self, about: &str) -> Self {
        Self {
            about: (!about.is_empty()).then(|| about.to_string()),
            ..self.clone()
        }
    }

    pub fn to_self_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            about: self.about.clone(),
            is_self: true,
        }
    }
}

/// The account's own view of its profile, returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub about: Option<String>,
    pub is_self: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
}

impl UpdateProfileRequest {
    pub fn names(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            about: None,
        }
    }

    pub fn about(about: impl Into<String>) -> Self {
        Self {
            about: Some(about.into()),
            ..Self::default()
        }
    }

    pub fn touches_names(&self) -> bool {
        self.first_name.is_some() || self.last_name.is_some()
    }
}

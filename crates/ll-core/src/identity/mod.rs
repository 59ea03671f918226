//! Identity provider profile and the editing session built on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Identity as reported by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Splits the display name into `(first, last)`.
    ///
    /// Everything after the first whitespace-separated token is treated as the last name.
    /// Explicit `first_name` / `last_name` metadata entries take precedence.
    pub fn name_parts(&self) -> (String, String) {
        let meta_first = self.metadata.get("first_name").map(|s| s.trim().to_string());
        let meta_last = self.metadata.get("last_name").map(|s| s.trim().to_string());

        let mut tokens = self.display_name.split_whitespace();
        let first = tokens.next().unwrap_or("").to_string();
        let last = tokens.collect::<Vec<_>>().join(" ");

        (
            meta_first.filter(|s| !s.is_empty()).unwrap_or(first),
            meta_last.filter(|s| !s.is_empty()).unwrap_or(last),
        )
    }
}

/// Authenticated editing session.
///
/// Passed explicitly to the wizard and to every section editor at construction,
/// so no component looks the identity up on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSession {
    identity: UserIdentity,
}

impl ProfileSession {
    pub fn new(identity: UserIdentity) -> Self {
        Self { identity }
    }

    pub fn user_id(&self) -> &UserId {
        &self.identity.id
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }
}

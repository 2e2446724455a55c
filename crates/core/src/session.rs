//! Explicitly passed identity of the viewing user.
//!
//! Views receive a [`SessionContext`] instead of reading a process-wide
//! "current user". It can be decoded from the user record the login flow
//! stores, with the role inferred from the page path when the record does
//! not carry a usable one.

use serde::{Deserialize, Serialize};

use crate::roles::{Role, ROLE_ANONYMOUS};
use crate::types::DbId;

/// User record as returned by the login endpoint and kept by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Older clients stored the role under this key.
    #[serde(default)]
    pub account_type: Option<String>,
}

/// The viewing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: Option<DbId>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub role: Role,
}

impl SessionContext {
    /// A session with a role and no identity; sees only role broadcasts.
    pub fn for_role(role: Role) -> Self {
        Self {
            user_id: None,
            name: None,
            username: None,
            role,
        }
    }

    /// Build a session from a stored user, inferring the role from `path`
    /// when the stored role is missing, anonymous, or unrecognised.
    pub fn from_stored_user(user: StoredUser, path: &str) -> Self {
        let role = user
            .role
            .as_deref()
            .or(user.account_type.as_deref())
            .map(str::trim)
            .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case(ROLE_ANONYMOUS))
            .and_then(|r| Role::from_str_value(r).ok())
            .unwrap_or_else(|| Role::infer_from_path(path));

        Self {
            user_id: user.id,
            name: user.name,
            username: user.username,
            role,
        }
    }

    /// Decode the stored JSON user record.
    ///
    /// Malformed JSON is treated as "no stored user": the session falls back
    /// to the path-inferred role with no identity.
    pub fn from_stored_json(raw: Option<&str>, path: &str) -> Self {
        let user = raw
            .and_then(|raw| serde_json::from_str::<StoredUser>(raw).ok())
            .unwrap_or_default();
        Self::from_stored_user(user, path)
    }

    /// Lower-cased, trimmed names this user answers to (name, username).
    pub fn names_lower(&self) -> Vec<String> {
        [self.name.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect()
    }

    /// Whether `name` (case-insensitive, trimmed) refers to this user.
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        !name.is_empty() && self.names_lower().contains(&name)
    }

    /// Identifier officers are assigned by: the username, falling back to name.
    pub fn officer_identifier(&self) -> Option<&str> {
        [self.username.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|n| !n.is_empty())
    }

    /// Display label for the header: name, falling back to username.
    pub fn display_name(&self) -> Option<&str> {
        [self.name.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|n| !n.is_empty())
    }
}

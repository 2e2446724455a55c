//! In-app notifications and the store they live in.
//!
//! A notification is addressed to a role (broadcast), to a named user, or
//! both. Views never touch storage directly: they receive a
//! [`NotificationStore`] and the viewing [`SessionContext`].

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::roles::Role;
use crate::session::SessionContext;
use crate::types::{DbId, Timestamp};

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DbId,
    /// Role token in any case, or empty when addressed by name only.
    pub to_role: String,
    /// Trimmed user name or username, or empty for a role broadcast.
    pub to_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complaint_id: Option<DbId>,
    pub message: String,
    pub created_at: Timestamp,
    pub is_read: bool,
}

/// A notification that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub to_role: String,
    pub to_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complaint_id: Option<DbId>,
    pub message: String,
    pub created_at: Timestamp,
}

impl NewNotification {
    /// Broadcast to every user of `role`.
    pub fn to_role(
        role: Role,
        complaint_id: Option<DbId>,
        message: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            to_role: role.as_str().to_string(),
            to_name: String::new(),
            complaint_id,
            message: message.into(),
            created_at: now,
        }
    }

    /// Address a single user by name or username.
    ///
    /// The role is left empty so the message is not broadcast to the
    /// recipient's peers.
    pub fn to_user(
        name: &str,
        complaint_id: Option<DbId>,
        message: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            to_role: String::new(),
            to_name: name.trim().to_string(),
            complaint_id,
            message: message.into(),
            created_at: now,
        }
    }

    fn into_notification(self, id: DbId) -> Notification {
        Notification {
            id,
            to_role: self.to_role,
            to_name: self.to_name.trim().to_string(),
            complaint_id: self.complaint_id,
            message: self.message,
            created_at: self.created_at,
            is_read: false,
        }
    }
}

impl Notification {
    /// Whether the user behind `session` should see this notification.
    ///
    /// Visible when addressed to the session's role, or to one of the
    /// session's names (case-insensitive).
    pub fn is_visible_to(&self, session: &SessionContext) -> bool {
        if self.to_role.eq_ignore_ascii_case(session.role.as_str()) {
            return true;
        }
        session.answers_to(&self.to_name)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Storage for notifications, injected into whatever renders them.
pub trait NotificationStore: Send + Sync {
    /// Store `notification` and return it with its assigned id.
    fn append(&self, notification: NewNotification) -> Notification;

    /// Notifications visible to `session`, newest first.
    fn list_for(&self, session: &SessionContext) -> Vec<Notification>;

    /// Mark a notification read. Returns `false` if `id` is unknown.
    fn mark_read(&self, id: DbId) -> bool;

    /// Number of unread notifications visible to `session`.
    fn unread_count(&self, session: &SessionContext) -> usize {
        self.list_for(session).iter().filter(|n| !n.is_read).count()
    }

    /// Mark every notification visible to `session` as read.
    ///
    /// Returns how many were unread before the call.
    fn mark_all_read(&self, session: &SessionContext) -> usize {
        self.list_for(session)
            .into_iter()
            .filter(|n| !n.is_read)
            .filter(|n| self.mark_read(n.id))
            .count()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    next_id: DbId,
    notifications: Vec<Notification>,
}

/// Process-local [`NotificationStore`] guarded by an `RwLock`.
///
/// Ids start at 1 and increase monotonically.
#[derive(Debug, Default)]
pub struct InMemoryNotificationStore {
    state: RwLock<StoreState>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single notification by id.
    pub fn get(&self, id: DbId) -> CoreResult<Notification> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .notifications
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "notification",
                id,
            })
    }

    /// Total number of stored notifications, regardless of recipient.
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationStore for InMemoryNotificationStore {
    fn append(&self, notification: NewNotification) -> Notification {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.next_id += 1;
        let stored = notification.into_notification(state.next_id);
        state.notifications.push(stored.clone());
        stored
    }

    fn list_for(&self, session: &SessionContext) -> Vec<Notification> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        let mut visible: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| n.is_visible_to(session))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.id.cmp(&a.id));
        visible
    }

    fn mark_read(&self, id: DbId) -> bool {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        match state.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                true
            }
            None => false,
        }
    }
}

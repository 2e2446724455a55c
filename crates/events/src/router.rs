//! Notification delivery service.
//!
//! [`NotificationRouter`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and appends the notifications carried by each [`ComplaintEvent`] to the
//! injected [`NotificationStore`]. It runs as a long-lived background task
//! and stops when the bus is dropped or its [`CancellationToken`] fires.

use std::sync::Arc;

use resolveit_core::notification::NotificationStore;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::ComplaintEvent;

/// Background service that turns complaint events into stored notifications.
pub struct NotificationRouter {
    store: Arc<dyn NotificationStore>,
}

impl NotificationRouter {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Run the delivery loop until the channel closes or `cancel` fires.
    ///
    /// Returns the number of notifications delivered.
    pub async fn run(
        &self,
        mut receiver: broadcast::Receiver<ComplaintEvent>,
        cancel: CancellationToken,
    ) -> usize {
        let mut delivered = 0;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(delivered, "Notification router cancelled");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(event) => delivered += self.route(&event),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            skipped = n,
                            "Notification router lagged, some events were not delivered"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!(delivered, "Event bus closed, notification router shutting down");
                        break;
                    }
                },
            }
        }
        delivered
    }

    /// Deliver the notifications of a single event. Returns how many were stored.
    pub fn route(&self, event: &ComplaintEvent) -> usize {
        for notification in &event.notifications {
            let stored = self.store.append(notification.clone());
            tracing::debug!(
                notification_id = stored.id,
                event_type = %event.event_type,
                complaint_id = ?event.complaint_id,
                to_role = %stored.to_role,
                to_name = %stored.to_name,
                "Notification stored"
            );
        }
        event.notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use resolveit_core::notification::{InMemoryNotificationStore, NewNotification};
    use resolveit_core::roles::Role;

    use super::*;
    use crate::bus::EVENT_COMPLAINT_ASSIGNED;

    #[test]
    fn route_appends_every_notification() {
        let store = Arc::new(InMemoryNotificationStore::new());
        let router = NotificationRouter::new(store.clone());

        let event = ComplaintEvent::new(EVENT_COMPLAINT_ASSIGNED).with_notifications(vec![
            NewNotification::to_user("officer1", Some(3), "a", Utc::now()),
            NewNotification::to_role(Role::Admin, Some(3), "b", Utc::now()),
        ]);

        assert_eq!(router.route(&event), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn event_without_notifications_stores_nothing() {
        let store = Arc::new(InMemoryNotificationStore::new());
        let router = NotificationRouter::new(store.clone());
        assert_eq!(router.route(&ComplaintEvent::new(EVENT_COMPLAINT_ASSIGNED)), 0);
        assert!(store.is_empty());
    }
}

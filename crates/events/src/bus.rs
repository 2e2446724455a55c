//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`ComplaintEvent`]s. Share
//! it via `Arc<EventBus>` between whatever performs complaint actions and
//! the background services that react to them.

use chrono::{DateTime, Utc};
use resolveit_core::actions::ActionOutcome;
use resolveit_core::notification::NewNotification;
use resolveit_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

pub const EVENT_COMPLAINT_SUBMITTED: &str = "complaint.submitted";
pub const EVENT_COMPLAINT_ASSIGNED: &str = "complaint.assigned";
pub const EVENT_COMPLAINT_ESCALATED: &str = "complaint.escalated";
pub const EVENT_COMPLAINT_STATUS_CHANGED: &str = "complaint.status_changed";
pub const EVENT_COMPLAINT_OVERDUE: &str = "complaint.overdue";

// ---------------------------------------------------------------------------
// ComplaintEvent
// ---------------------------------------------------------------------------

/// Something that happened to a complaint.
///
/// Events carry the notifications the action produced, so subscribers do
/// not need to re-derive recipients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintEvent {
    /// Dot-separated event name, e.g. `"complaint.escalated"`.
    pub event_type: String,

    pub complaint_id: Option<DbId>,

    /// Id of the user that triggered the event, when known.
    pub actor_user_id: Option<DbId>,

    /// Notifications to deliver for this event.
    pub notifications: Vec<NewNotification>,

    pub timestamp: DateTime<Utc>,
}

impl ComplaintEvent {
    /// Create an event with only its type set.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            complaint_id: None,
            actor_user_id: None,
            notifications: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Wrap the notifications of an admin or officer action.
    pub fn from_outcome(
        event_type: impl Into<String>,
        complaint_id: DbId,
        outcome: &ActionOutcome,
    ) -> Self {
        Self::new(event_type)
            .with_complaint(complaint_id)
            .with_notifications(outcome.notifications.clone())
    }

    pub fn with_complaint(mut self, complaint_id: DbId) -> Self {
        self.complaint_id = Some(complaint_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_notifications(mut self, notifications: Vec<NewNotification>) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<ComplaintEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unconsumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it; zero means the
    /// event was dropped.
    pub fn publish(&self, event: ComplaintEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::debug!(
                    event_type = %event.event_type,
                    "No subscribers, complaint event dropped"
                );
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ComplaintEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use resolveit_core::roles::Role;

    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let at = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let event = ComplaintEvent::new(EVENT_COMPLAINT_ESCALATED)
            .with_complaint(42)
            .with_actor(7)
            .with_timestamp(at)
            .with_notifications(vec![NewNotification::to_role(Role::Admin, Some(42), "x", at)]);

        assert_eq!(bus.publish(event), 1);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "complaint.escalated");
        assert_eq!(received.complaint_id, Some(42));
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.timestamp, at);
        assert_eq!(received.notifications.len(), 1);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.publish(ComplaintEvent::new(EVENT_COMPLAINT_SUBMITTED)), 2);

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.event_type, EVENT_COMPLAINT_SUBMITTED);
        assert_eq!(e2.event_type, EVENT_COMPLAINT_SUBMITTED);
    }

    #[test]
    fn publish_with_no_subscribers_is_dropped() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(ComplaintEvent::new(EVENT_COMPLAINT_OVERDUE)), 0);
    }

    #[test]
    fn bare_event_has_empty_optional_fields() {
        let event = ComplaintEvent::new(EVENT_COMPLAINT_STATUS_CHANGED);
        assert!(event.complaint_id.is_none());
        assert!(event.actor_user_id.is_none());
        assert!(event.notifications.is_empty());
    }
}

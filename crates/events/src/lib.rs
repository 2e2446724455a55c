//! ResolveIT complaint event bus and notification routing.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ComplaintEvent`]: the envelope published when a complaint changes.
//! - [`NotificationRouter`]: background service that delivers the
//!   notifications carried by each event into a
//!   [`NotificationStore`](resolveit_core::NotificationStore).

pub mod bus;
pub mod router;

pub use bus::{ComplaintEvent, EventBus};
pub use router::NotificationRouter;

//! ResolveIT complaint domain.
//!
//! Pure, I/O-free building blocks shared by the dashboards and the CLI:
//!
//! - [`lifecycle`] evaluates a complaint for a viewing [`Role`]: whether it
//!   is escalated ([`escalation`]) and where it sits on the role's timeline
//!   ([`timeline`]).
//! - [`dashboard`] computes per-role counts and list ordering.
//! - [`actions`] turns admin and officer intent into a [`ComplaintUpdate`]
//!   plus the notifications to send.
//! - [`notification`] defines the injected [`NotificationStore`] and the
//!   visibility rule for a [`SessionContext`].

pub mod actions;
pub mod complaint;
pub mod dashboard;
pub mod deadline;
pub mod error;
pub mod escalation;
pub mod feedback;
pub mod lifecycle;
pub mod notification;
pub mod roles;
pub mod session;
pub mod status;
pub mod timeline;
pub mod types;

pub use complaint::{Complaint, ComplaintUpdate, NewComplaint};
pub use error::{CoreError, CoreResult};
pub use lifecycle::{evaluate, evaluate_all, ComplaintEvaluation, Evaluation};
pub use notification::{InMemoryNotificationStore, NewNotification, Notification, NotificationStore};
pub use roles::Role;
pub use session::SessionContext;
pub use types::{DbId, Timestamp};

//! Complaint workflow status vocabulary.
//!
//! Statuses travel as display strings (`"Under Review"`) because that is how
//! the backend stores them. Matching against these constants is exact; the
//! admin timeline is the only consumer that matches loosely (see
//! [`crate::timeline::MatchMode`]).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;

/// Initial state assigned by the backend on submission.
pub const STATUS_UNDER_REVIEW: &str = "Under Review";

/// An officer has started working on the complaint.
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// The officer considers the work done; awaiting admin closure.
pub const STATUS_COMPLETED: &str = "Completed";

/// Closed by an admin as fixed.
pub const STATUS_RESOLVED: &str = "Resolved";

/// Closed by an admin without a fix.
pub const STATUS_REJECTED: &str = "Rejected";

/// All valid status values, in workflow order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_UNDER_REVIEW,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_RESOLVED,
    STATUS_REJECTED,
];

/// Statuses an officer may set from the detail page.
pub const OFFICER_SETTABLE_STATUSES: &[&str] =
    &[STATUS_UNDER_REVIEW, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// A recognised complaint status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    /// Convert from the stored string value (exact match).
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_UNDER_REVIEW => Ok(Self::UnderReview),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_RESOLVED => Ok(Self::Resolved),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderReview => STATUS_UNDER_REVIEW,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Completed => STATUS_COMPLETED,
            Self::Resolved => STATUS_RESOLVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The status used for decisions: the stored value, or the initial state
/// when the record carries none.
pub fn effective_status(status: Option<&str>) -> &str {
    status.unwrap_or(STATUS_UNDER_REVIEW)
}

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    ComplaintStatus::from_str_value(status).map(|_| ())
}

/// Validate that `role` may move a complaint to `to`.
///
/// Admins may set any status. Officers may move work forward up to
/// `Completed` but cannot close it. Citizens never change status.
pub fn validate_status_change(role: Role, to: &str) -> Result<(), CoreError> {
    validate_status(to)?;
    match role {
        Role::Admin => Ok(()),
        Role::Officer if OFFICER_SETTABLE_STATUSES.contains(&to) => Ok(()),
        Role::Officer => Err(CoreError::Forbidden(format!(
            "Officers cannot set status '{to}'. Allowed: {}",
            OFFICER_SETTABLE_STATUSES.join(", ")
        ))),
        Role::Citizen => Err(CoreError::Forbidden(
            "Citizens cannot change complaint status".to_string(),
        )),
    }
}

/// Kebab-case display key for a status badge (`"in-progress"`).
///
/// Unknown or missing statuses map to the initial-state key.
pub fn status_key(status: Option<&str>) -> &'static str {
    let normalized = status
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    match normalized.as_str() {
        "in progress" => "in-progress",
        "completed" => "completed",
        "resolved" => "resolved",
        "rejected" => "rejected",
        _ => "under-review",
    }
}

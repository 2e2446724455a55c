//! Escalation predicate.
//!
//! A complaint is shown as escalated when it is overdue, or when an admin
//! flagged it and no deadline exists to compare against. Once a complaint
//! reaches a terminal status for the viewing role, escalation is suppressed
//! regardless of deadline or flag.

use chrono::Utc;
use serde::Serialize;

use crate::complaint::Complaint;
use crate::roles::Role;
use crate::status::{STATUS_COMPLETED, STATUS_REJECTED, STATUS_RESOLVED};
use crate::types::Timestamp;

/// Terminal statuses for citizen and admin views.
pub const CLOSED_STATUSES: &[&str] = &[STATUS_RESOLVED, STATUS_REJECTED];

/// Terminal statuses for the officer view; `Completed` ends the officer's work.
pub const OFFICER_TERMINAL_STATUSES: &[&str] =
    &[STATUS_RESOLVED, STATUS_REJECTED, STATUS_COMPLETED];

/// Why a complaint is displayed as escalated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    /// The deadline has passed.
    Overdue,
    /// An admin set the escalation flag and no deadline is set.
    Flagged,
}

/// The statuses after which `role` no longer sees escalation.
pub fn terminal_statuses(role: Role) -> &'static [&'static str] {
    match role {
        Role::Officer => OFFICER_TERMINAL_STATUSES,
        Role::Citizen | Role::Admin => CLOSED_STATUSES,
    }
}

/// Whether `status` is terminal from the viewpoint of `role`.
pub fn is_terminal(status: &str, role: Role) -> bool {
    terminal_statuses(role).contains(&status)
}

/// Decide whether and why `complaint` is escalated for `role` at `now`.
///
/// An unparsable deadline counts as absent, so the flag can still apply.
/// A future deadline wins over the flag.
pub fn escalation_reason(
    complaint: &Complaint,
    role: Role,
    now: Timestamp,
) -> Option<EscalationReason> {
    if is_terminal(complaint.effective_status(), role) {
        return None;
    }

    match complaint.deadline_at() {
        Some(deadline) if now > deadline => Some(EscalationReason::Overdue),
        Some(_) => None,
        None if complaint.is_flagged() => Some(EscalationReason::Flagged),
        None => None,
    }
}

/// Escalation predicate evaluated at an explicit instant.
pub fn is_escalated_at(complaint: &Complaint, role: Role, now: Timestamp) -> bool {
    escalation_reason(complaint, role, now).is_some()
}

/// Escalation predicate evaluated against the wall clock.
pub fn is_escalated(complaint: &Complaint, role: Role) -> bool {
    is_escalated_at(complaint, role, Utc::now())
}

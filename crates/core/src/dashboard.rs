//! Dashboard statistics and list ordering (per role).
//!
//! Counts are computed from the complaint list a dashboard has just loaded.
//! The core crate holds no state; callers pass in the records and the
//! instant used for overdue checks.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::complaint::{Complaint, DEFAULT_CATEGORY, DEFAULT_PRIORITY};
use crate::escalation::{is_escalated_at, is_terminal};
use crate::roles::Role;
use crate::status::{STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_RESOLVED, STATUS_UNDER_REVIEW};
use crate::types::Timestamp;

/// Statuses charted on the admin dashboard.
pub const CHARTED_STATUSES: &[&str] = &[
    STATUS_UNDER_REVIEW,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_RESOLVED,
];

/// Headline counts and breakdowns for one dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
    pub escalated: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
}

/// Whether `complaint` counts as done on `role`'s dashboard.
///
/// Officers treat their own `Completed` as done.
pub fn counts_as_resolved(complaint: &Complaint, role: Role) -> bool {
    match complaint.effective_status() {
        STATUS_RESOLVED => true,
        STATUS_COMPLETED => role == Role::Officer,
        _ => false,
    }
}

/// Whether `complaint` counts as outstanding on `role`'s dashboard.
///
/// Officers and citizens count everything not yet closed for them,
/// including unknown statuses. Admins count only open workflow statuses.
pub fn counts_as_pending(complaint: &Complaint, role: Role) -> bool {
    let status = complaint.effective_status();
    match role {
        Role::Officer | Role::Citizen => !is_terminal(status, role),
        Role::Admin => status == STATUS_UNDER_REVIEW || status == STATUS_IN_PROGRESS,
    }
}

fn bucket(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Summarize `complaints` for `role` at `now`.
pub fn summarize(complaints: &[Complaint], role: Role, now: Timestamp) -> DashboardSummary {
    let mut by_status: BTreeMap<String, usize> = CHARTED_STATUSES
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_priority: BTreeMap<String, usize> = BTreeMap::new();

    let mut pending = 0;
    let mut resolved = 0;
    let mut escalated = 0;

    for complaint in complaints {
        if counts_as_pending(complaint, role) {
            pending += 1;
        }
        if counts_as_resolved(complaint, role) {
            resolved += 1;
        }
        if is_escalated_at(complaint, role, now) {
            escalated += 1;
        }

        if let Some(count) = by_status.get_mut(complaint.effective_status()) {
            *count += 1;
        }
        *by_category
            .entry(bucket(complaint.category.as_deref(), DEFAULT_CATEGORY))
            .or_default() += 1;
        *by_priority
            .entry(bucket(complaint.priority.as_deref(), DEFAULT_PRIORITY))
            .or_default() += 1;
    }

    DashboardSummary {
        total: complaints.len(),
        pending,
        resolved,
        escalated,
        by_status,
        by_category,
        by_priority,
    }
}

/// Admin list order: id ascending.
pub fn sort_for_admin(complaints: &mut [Complaint]) {
    complaints.sort_by_key(|c| c.id);
}

/// Officer list order: newest submission first.
///
/// Complaints without a parsable `createdAt` follow the dated ones; ties and
/// undated complaints are ordered by id descending.
pub fn sort_for_officer(complaints: &mut [Complaint]) {
    complaints.sort_by_cached_key(|c| (Reverse(c.created()), Reverse(c.id)));
}

/// Order `complaints` the way `role`'s list view shows them.
///
/// Admin and citizen lists are id ascending.
pub fn sort_for_role(complaints: &mut [Complaint], role: Role) {
    match role {
        Role::Admin | Role::Citizen => sort_for_admin(complaints),
        Role::Officer => sort_for_officer(complaints),
    }
}

//! Admin and officer actions on a complaint.
//!
//! Each action validates its input and returns the partial update to send
//! to the backend together with the notifications to fan out once the
//! update has been accepted. Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use crate::complaint::{Complaint, ComplaintUpdate};
use crate::deadline::{format_deadline, parse_deadline};
use crate::error::{CoreError, CoreResult};
use crate::escalation::{escalation_reason, EscalationReason};
use crate::notification::NewNotification;
use crate::roles::Role;
use crate::status::validate_status_change;
use crate::types::Timestamp;

/// Message used when an escalation carries no notes.
pub const DEFAULT_ESCALATION_MESSAGE: &str = "Escalation raised by admin.";

/// Longest accepted escalation or officer note.
pub const MAX_NOTES_LENGTH: usize = 2000;

/// What an admin escalation does besides raising the alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EscalationAction {
    /// Raise the alert only.
    SendAlert,
    /// Raise the alert and move the deadline.
    ExtendDeadline { deadline_iso: String },
    /// Raise the alert and hand the complaint to another officer.
    Reassign { officer: String },
}

/// Result of an action: the update to persist and who to tell about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub update: ComplaintUpdate,
    pub notifications: Vec<NewNotification>,
}

fn trimmed_notes(notes: Option<&str>) -> CoreResult<Option<String>> {
    let notes = notes.map(str::trim).filter(|n| !n.is_empty());
    if let Some(n) = notes {
        if n.chars().count() > MAX_NOTES_LENGTH {
            return Err(CoreError::Validation(format!(
                "Notes must be at most {MAX_NOTES_LENGTH} characters"
            )));
        }
    }
    Ok(notes.map(str::to_string))
}

fn required(value: &str, what: &str) -> CoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{what} must not be empty")));
    }
    Ok(value.to_string())
}

/// Escalate `complaint` with `action`.
///
/// The citizen is notified when the complaint names one. The officer
/// notified is the new assignee for a reassignment, otherwise the current
/// assignee if there is one.
pub fn escalate(
    complaint: &Complaint,
    action: &EscalationAction,
    notes: Option<&str>,
    now: Timestamp,
) -> CoreResult<ActionOutcome> {
    let notes = trimmed_notes(notes)?;

    let mut update = ComplaintUpdate {
        is_escalated: Some(true),
        alert_message: notes.clone(),
        last_alert_at: Some(now.to_rfc3339()),
        ..ComplaintUpdate::default()
    };

    let mut officer = complaint.assignee().map(str::to_string);
    match action {
        EscalationAction::SendAlert => {}
        EscalationAction::ExtendDeadline { deadline_iso } => {
            let deadline = parse_deadline(deadline_iso).ok_or_else(|| {
                CoreError::Validation(format!("Invalid deadline '{deadline_iso}'"))
            })?;
            update.deadline_iso = Some(deadline_iso.trim().to_string());
            update.deadline = Some(format_deadline(deadline));
        }
        EscalationAction::Reassign { officer: new_officer } => {
            let new_officer = required(new_officer, "Officer")?;
            update.assigned_staff = Some(new_officer.clone());
            officer = Some(new_officer);
        }
    }

    let base = notes.as_deref().unwrap_or(DEFAULT_ESCALATION_MESSAGE);
    let id = complaint.id;
    let mut notifications = Vec::new();
    if let Some(citizen) = complaint.citizen() {
        notifications.push(NewNotification::to_user(
            citizen,
            Some(id),
            format!("Your complaint #{id} has been escalated. {base}"),
            now,
        ));
    }
    if let Some(officer) = officer {
        notifications.push(NewNotification::to_user(
            &officer,
            Some(id),
            format!("Complaint #{id} has been escalated by admin. {base}"),
            now,
        ));
    }

    Ok(ActionOutcome {
        update,
        notifications,
    })
}

/// Assign `complaint` to `officer`, optionally setting a deadline.
pub fn assign(
    complaint: &Complaint,
    officer: &str,
    deadline_iso: Option<&str>,
    now: Timestamp,
) -> CoreResult<ActionOutcome> {
    let officer = required(officer, "Officer")?;

    let mut update = ComplaintUpdate {
        assigned_staff: Some(officer.clone()),
        ..ComplaintUpdate::default()
    };
    if let Some(raw) = deadline_iso.map(str::trim).filter(|d| !d.is_empty()) {
        let deadline = parse_deadline(raw)
            .ok_or_else(|| CoreError::Validation(format!("Invalid deadline '{raw}'")))?;
        update.deadline_iso = Some(raw.to_string());
        update.deadline = Some(format_deadline(deadline));
    }

    let notification = NewNotification::to_user(
        &officer,
        Some(complaint.id),
        format!("A new complaint #{} has been assigned to you.", complaint.id),
        now,
    );

    Ok(ActionOutcome {
        update,
        notifications: vec![notification],
    })
}

/// Status change and notes submitted from the officer's detail page.
pub fn officer_update(status: &str, notes: Option<&str>) -> CoreResult<ComplaintUpdate> {
    let status = status.trim();
    validate_status_change(Role::Officer, status)?;
    Ok(ComplaintUpdate {
        status: Some(status.to_string()),
        officer_notes: trimmed_notes(notes)?,
        ..ComplaintUpdate::default()
    })
}

/// One admin broadcast per open complaint whose deadline has passed.
///
/// Complaints escalated by the flag alone are skipped; `escalate` already
/// notified about those.
pub fn overdue_alerts(complaints: &[Complaint], now: Timestamp) -> Vec<NewNotification> {
    complaints
        .iter()
        .filter(|c| escalation_reason(c, Role::Admin, now) == Some(EscalationReason::Overdue))
        .map(|c| {
            let subject = c.subject.as_deref().unwrap_or_default();
            NewNotification::to_role(
                Role::Admin,
                Some(c.id),
                format!("Complaint \"{subject}\" has been escalated (deadline passed)."),
                now,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::escalation::is_escalated_at;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn complaint() -> Complaint {
        Complaint {
            citizen_name: Some(" Asha ".to_string()),
            assigned_staff: Some("officer1".to_string()),
            status: Some("In Progress".to_string()),
            ..Complaint::new(7)
        }
    }

    fn recipients(outcome: &ActionOutcome) -> Vec<&str> {
        outcome
            .notifications
            .iter()
            .map(|n| n.to_name.as_str())
            .collect()
    }

    #[test]
    fn send_alert_notifies_citizen_and_current_officer() {
        let outcome =
            escalate(&complaint(), &EscalationAction::SendAlert, Some(" Please hurry "), now())
                .unwrap();

        assert_eq!(outcome.update.is_escalated, Some(true));
        assert_eq!(outcome.update.alert_message.as_deref(), Some("Please hurry"));
        assert_eq!(outcome.update.last_alert_at, Some(now().to_rfc3339()));
        assert!(outcome.update.assigned_staff.is_none());

        assert_eq!(recipients(&outcome), ["Asha", "officer1"]);
        assert_eq!(
            outcome.notifications[0].message,
            "Your complaint #7 has been escalated. Please hurry"
        );
        assert_eq!(
            outcome.notifications[1].message,
            "Complaint #7 has been escalated by admin. Please hurry"
        );
    }

    #[test]
    fn blank_notes_use_default_message() {
        let outcome = escalate(&complaint(), &EscalationAction::SendAlert, Some("  "), now()).unwrap();
        assert!(outcome.update.alert_message.is_none());
        assert!(outcome.notifications[0].message.ends_with(DEFAULT_ESCALATION_MESSAGE));
    }

    #[test]
    fn extend_deadline_sets_iso_and_display_value() {
        let action = EscalationAction::ExtendDeadline {
            deadline_iso: "2025-07-01T09:00".to_string(),
        };
        let outcome = escalate(&complaint(), &action, None, now()).unwrap();
        assert_eq!(outcome.update.deadline_iso.as_deref(), Some("2025-07-01T09:00"));
        assert_eq!(outcome.update.deadline.as_deref(), Some("Tue Jul 01 2025"));
    }

    #[test]
    fn extend_deadline_rejects_unparsable_value() {
        let action = EscalationAction::ExtendDeadline {
            deadline_iso: "soon".to_string(),
        };
        assert_matches!(
            escalate(&complaint(), &action, None, now()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn reassign_notifies_new_officer_instead_of_old() {
        let action = EscalationAction::Reassign {
            officer: " officer2 ".to_string(),
        };
        let outcome = escalate(&complaint(), &action, None, now()).unwrap();
        assert_eq!(outcome.update.assigned_staff.as_deref(), Some("officer2"));
        assert_eq!(recipients(&outcome), ["Asha", "officer2"]);
    }

    #[test]
    fn reassign_requires_an_officer() {
        let action = EscalationAction::Reassign {
            officer: "".to_string(),
        };
        assert_matches!(
            escalate(&complaint(), &action, None, now()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unassigned_complaint_without_citizen_notifies_nobody() {
        let bare = Complaint {
            assigned_staff: Some("Not assigned".to_string()),
            ..Complaint::new(1)
        };
        let outcome = escalate(&bare, &EscalationAction::SendAlert, None, now()).unwrap();
        assert!(outcome.notifications.is_empty());
    }

    #[test]
    fn overly_long_notes_are_rejected() {
        let notes = "x".repeat(MAX_NOTES_LENGTH + 1);
        assert_matches!(
            escalate(&complaint(), &EscalationAction::SendAlert, Some(&notes), now()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn action_deserializes_from_tagged_json() {
        let action: EscalationAction =
            serde_json::from_str(r#"{"kind": "reassign", "officer": "officer3"}"#).unwrap();
        assert_eq!(
            action,
            EscalationAction::Reassign {
                officer: "officer3".to_string()
            }
        );
        let action: EscalationAction = serde_json::from_str(r#"{"kind": "send_alert"}"#).unwrap();
        assert_eq!(action, EscalationAction::SendAlert);
    }

    #[test]
    fn assign_notifies_officer() {
        let outcome = assign(&Complaint::new(12), "officer4", Some("2025-07-01"), now()).unwrap();
        assert_eq!(outcome.update.assigned_staff.as_deref(), Some("officer4"));
        assert_eq!(outcome.update.deadline.as_deref(), Some("Tue Jul 01 2025"));
        assert_eq!(outcome.notifications.len(), 1);
        assert_eq!(outcome.notifications[0].to_name, "officer4");
        assert_eq!(
            outcome.notifications[0].message,
            "A new complaint #12 has been assigned to you."
        );
    }

    #[test]
    fn assign_without_deadline_leaves_it_untouched() {
        let outcome = assign(&Complaint::new(12), "officer4", Some(" "), now()).unwrap();
        assert!(outcome.update.deadline_iso.is_none());
        assert_matches!(
            assign(&Complaint::new(12), "   ", None, now()),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            assign(&Complaint::new(12), "officer4", Some("31/12/2025"), now()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn officer_update_enforces_settable_statuses() {
        let update = officer_update("Completed", Some(" fixed the pipe ")).unwrap();
        assert_eq!(update.status.as_deref(), Some("Completed"));
        assert_eq!(update.officer_notes.as_deref(), Some("fixed the pipe"));

        assert_matches!(officer_update("Resolved", None), Err(CoreError::Forbidden(_)));
        assert_matches!(officer_update("Done", None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overdue_alerts_cover_admin_escalations_only() {
        let overdue = Complaint {
            subject: Some("Broken streetlight".to_string()),
            status: Some("Completed".to_string()),
            deadline_iso: Some("2025-06-01".to_string()),
            ..Complaint::new(1)
        };
        let closed = Complaint {
            status: Some("Resolved".to_string()),
            deadline_iso: Some("2025-06-01".to_string()),
            ..Complaint::new(2)
        };
        let on_time = Complaint {
            deadline_iso: Some("2025-07-01".to_string()),
            ..Complaint::new(3)
        };

        let alerts = overdue_alerts(&[overdue, closed, on_time], now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].to_role, "ADMIN");
        assert_eq!(alerts[0].complaint_id, Some(1));
        assert_eq!(
            alerts[0].message,
            "Complaint \"Broken streetlight\" has been escalated (deadline passed)."
        );
    }
    #[test]
    fn flagged_complaint_without_deadline_gets_no_overdue_alert() {
        let flagged = Complaint {
            subject: Some("Noise".to_string()),
            status: Some("In Progress".to_string()),
            is_escalated: Some(true),
            ..Complaint::new(4)
        };
        assert!(is_escalated_at(&flagged, Role::Admin, now()));
        assert!(overdue_alerts(&[flagged], now()).is_empty());
    }
}

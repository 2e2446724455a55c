//! Complaint record as served by the backend, plus partial-update DTO.
//!
//! The record is read-only input to the evaluator. Field names follow the
//! backend's camelCase JSON; every field other than `id` may be missing.

use serde::{Deserialize, Serialize};

use crate::deadline::{parse_optional_deadline, parse_timestamp};
use crate::error::{CoreError, CoreResult};
use crate::status::effective_status;
use crate::types::{DbId, Timestamp};

/// Placeholder the backend stores in `assignedStaff` before assignment.
pub const UNASSIGNED_STAFF: &str = "Not assigned";

/// Category used when none is given.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Priority used when none is given.
pub const DEFAULT_PRIORITY: &str = "Medium";

/// Submitter name used when the citizen is not signed in.
pub const ANONYMOUS_CITIZEN: &str = "Anonymous";

/// A complaint record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_iso: Option<String>,
    /// Explicit admin escalation flag, independent of the deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_escalated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizen_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_staff: Option<String>,
    /// Human-readable deadline, e.g. `Mon Jan 06 2025`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_alert_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_image_path: Option<String>,
}

impl Complaint {
    /// Minimal record with only an id; handy for building fixtures.
    pub fn new(id: DbId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Status used for decisions (missing means `Under Review`).
    pub fn effective_status(&self) -> &str {
        effective_status(self.status.as_deref())
    }

    /// Parsed deadline; `None` when absent or unparsable.
    pub fn deadline_at(&self) -> Option<Timestamp> {
        parse_optional_deadline(self.deadline_iso.as_deref())
    }

    /// Parsed submission time; `None` when absent or unparsable.
    pub fn created(&self) -> Option<Timestamp> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Whether the admin escalation flag is explicitly `true`.
    pub fn is_flagged(&self) -> bool {
        self.is_escalated == Some(true)
    }

    /// The assigned officer, ignoring blanks and the unassigned placeholder.
    pub fn assignee(&self) -> Option<&str> {
        non_blank(self.assigned_staff.as_deref()).filter(|s| *s != UNASSIGNED_STAFF)
    }

    /// The submitting citizen's name, trimmed.
    pub fn citizen(&self) -> Option<&str> {
        non_blank(self.citizen_name.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Partial update: present fields overwrite, absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_staff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_iso: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_alert_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_escalated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer_notes: Option<String>,
}

impl ComplaintUpdate {
    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this update into `complaint` and stamp `updatedAt` with `now`.
    pub fn apply(self, complaint: &mut Complaint, now: Timestamp) {
        fn merge<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        merge(&mut complaint.status, self.status);
        merge(&mut complaint.priority, self.priority);
        merge(&mut complaint.category, self.category);
        merge(&mut complaint.assigned_staff, self.assigned_staff);
        merge(&mut complaint.deadline, self.deadline);
        merge(&mut complaint.deadline_iso, self.deadline_iso);
        merge(&mut complaint.admin_comments, self.admin_comments);
        merge(&mut complaint.internal_notes, self.internal_notes);
        merge(&mut complaint.alert_message, self.alert_message);
        merge(&mut complaint.last_alert_at, self.last_alert_at);
        merge(&mut complaint.is_escalated, self.is_escalated);
        merge(&mut complaint.officer_notes, self.officer_notes);

        complaint.updated_at = Some(now.to_rfc3339());
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A complaint as filed from the citizen form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub citizen_name: Option<String>,
}

impl NewComplaint {
    /// Trim every field and fill in defaults.
    ///
    /// Subject and description are required.
    pub fn normalize(self) -> CoreResult<Self> {
        let subject = self.subject.trim().to_string();
        let description = self.description.trim().to_string();
        if subject.is_empty() || description.is_empty() {
            return Err(CoreError::Validation(
                "Please enter subject and description.".to_string(),
            ));
        }

        let or_default = |value: Option<String>, default: &str| {
            Some(
                non_blank(value.as_deref())
                    .unwrap_or(default)
                    .to_string(),
            )
        };

        Ok(Self {
            subject,
            description,
            category: or_default(self.category, DEFAULT_CATEGORY),
            priority: or_default(self.priority, DEFAULT_PRIORITY),
            citizen_name: or_default(self.citizen_name, ANONYMOUS_CITIZEN),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn deserializes_backend_camel_case_record() {
        let json = r#"{
            "id": 7,
            "status": "In Progress",
            "deadlineIso": "2025-01-01T10:00",
            "isEscalated": false,
            "citizenName": "Asha",
            "assignedStaff": "officer1",
            "someFutureField": 42
        }"#;
        let complaint: Complaint = serde_json::from_str(json).unwrap();
        assert_eq!(complaint.id, 7);
        assert_eq!(complaint.status.as_deref(), Some("In Progress"));
        assert_eq!(complaint.deadline_iso.as_deref(), Some("2025-01-01T10:00"));
        assert_eq!(complaint.is_escalated, Some(false));
        assert_eq!(complaint.citizen(), Some("Asha"));
        assert_eq!(complaint.assignee(), Some("officer1"));
    }

    #[test]
    fn missing_fields_default_to_none() {
        let complaint: Complaint = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(complaint, Complaint::new(1));
        assert_eq!(complaint.effective_status(), "Under Review");
        assert!(complaint.deadline_at().is_none());
        assert!(!complaint.is_flagged());
    }

    #[test]
    fn explicit_null_fields_are_accepted() {
        let complaint: Complaint =
            serde_json::from_str(r#"{"id": 1, "status": null, "isEscalated": null}"#).unwrap();
        assert!(complaint.status.is_none());
        assert!(complaint.is_escalated.is_none());
    }

    #[test]
    fn placeholder_and_blank_assignees_are_unassigned() {
        let mut complaint = Complaint::new(1);
        complaint.assigned_staff = Some(UNASSIGNED_STAFF.to_string());
        assert_eq!(complaint.assignee(), None);
        complaint.assigned_staff = Some("   ".to_string());
        assert_eq!(complaint.assignee(), None);
        complaint.assigned_staff = Some("  officer2 ".to_string());
        assert_eq!(complaint.assignee(), Some("officer2"));
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let value = serde_json::to_value(Complaint::new(3)).unwrap();
        assert_eq!(value, serde_json::json!({"id": 3}));
    }

    #[test]
    fn update_overwrites_only_present_fields() {
        let mut complaint = Complaint::new(5);
        complaint.status = Some("Under Review".to_string());
        complaint.priority = Some("High".to_string());
        complaint.admin_comments = Some("old".to_string());

        let now = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
        ComplaintUpdate {
            status: Some("In Progress".to_string()),
            admin_comments: Some("new".to_string()),
            ..ComplaintUpdate::default()
        }
        .apply(&mut complaint, now);

        assert_eq!(complaint.status.as_deref(), Some("In Progress"));
        assert_eq!(complaint.priority.as_deref(), Some("High"));
        assert_eq!(complaint.admin_comments.as_deref(), Some("new"));
        assert_eq!(complaint.updated_at, Some(now.to_rfc3339()));
    }

    #[test]
    fn update_can_clear_escalation_flag() {
        let mut complaint = Complaint::new(5);
        complaint.is_escalated = Some(true);
        ComplaintUpdate {
            is_escalated: Some(false),
            ..ComplaintUpdate::default()
        }
        .apply(&mut complaint, Utc::now());
        assert!(!complaint.is_flagged());
    }

    #[test]
    fn empty_update_still_stamps_updated_at() {
        let update = ComplaintUpdate::default();
        assert!(update.is_empty());
        let mut complaint = Complaint::new(9);
        update.apply(&mut complaint, Utc::now());
        assert!(complaint.updated_at.is_some());
        assert!(complaint.status.is_none());
    }

    #[test]
    fn update_serializes_camel_case_without_nulls() {
        let update = ComplaintUpdate {
            is_escalated: Some(true),
            last_alert_at: Some("2025-01-01T00:00:00Z".to_string()),
            ..ComplaintUpdate::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"isEscalated": true, "lastAlertAt": "2025-01-01T00:00:00Z"})
        );
    }

    #[test]
    fn new_complaint_is_trimmed_and_defaulted() {
        let filed = NewComplaint {
            subject: "  Pothole ".to_string(),
            description: "Deep one on 5th street".to_string(),
            category: Some("".to_string()),
            ..NewComplaint::default()
        }
        .normalize()
        .unwrap();

        assert_eq!(filed.subject, "Pothole");
        assert_eq!(filed.category.as_deref(), Some(DEFAULT_CATEGORY));
        assert_eq!(filed.priority.as_deref(), Some(DEFAULT_PRIORITY));
        assert_eq!(filed.citizen_name.as_deref(), Some(ANONYMOUS_CITIZEN));
    }

    #[test]
    fn new_complaint_requires_subject_and_description() {
        let missing = NewComplaint {
            subject: "Pothole".to_string(),
            description: "   ".to_string(),
            ..NewComplaint::default()
        };
        assert_matches!(missing.normalize(), Err(CoreError::Validation(_)));
    }
}

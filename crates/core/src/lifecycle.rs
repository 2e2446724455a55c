//! Complaint lifecycle evaluation.
//!
//! Combines the escalation predicate and the timeline deriver into the
//! single result a view renders. Evaluation is pure: callers pass the
//! freshly fetched record and the instant to compare deadlines against.

use serde::Serialize;

use crate::complaint::Complaint;
use crate::escalation::{escalation_reason, EscalationReason};
use crate::roles::Role;
use crate::timeline::{derive_stages, Stage};
use crate::types::{DbId, Timestamp};

/// What a view shows for one complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub escalated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<EscalationReason>,
    pub stages: Vec<Stage>,
}

/// An [`Evaluation`] tagged with the complaint it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplaintEvaluation {
    pub id: DbId,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

/// Evaluate `complaint` for `role` at `now`.
pub fn evaluate(complaint: &Complaint, role: Role, now: Timestamp) -> Evaluation {
    let reason = escalation_reason(complaint, role, now);
    Evaluation {
        escalated: reason.is_some(),
        reason,
        stages: derive_stages(complaint.status.as_deref(), role),
    }
}

/// Evaluate every complaint in input order.
pub fn evaluate_all(
    complaints: &[Complaint],
    role: Role,
    now: Timestamp,
) -> Vec<ComplaintEvaluation> {
    complaints
        .iter()
        .map(|complaint| ComplaintEvaluation {
            id: complaint.id,
            evaluation: evaluate(complaint, role, now),
        })
        .collect()
}

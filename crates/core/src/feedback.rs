//! Citizen feedback on resolved complaints.

use serde::{Deserialize, Serialize};

use crate::complaint::Complaint;
use crate::error::{CoreError, CoreResult};
use crate::status::STATUS_RESOLVED;
use crate::types::DbId;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Longest accepted feedback comment, in characters.
pub const MAX_COMMENTS_LENGTH: usize = 2000;

/// Feedback as submitted by a citizen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub complaint_id: DbId,
    #[serde(default)]
    pub citizen_name: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Check the shape of a feedback submission.
pub fn validate_feedback(feedback: &NewFeedback) -> CoreResult<()> {
    match feedback.rating {
        Some(r) if (MIN_RATING..=MAX_RATING).contains(&r) => {}
        _ => {
            return Err(CoreError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )))
        }
    }

    if feedback
        .citizen_name
        .as_deref()
        .is_none_or(|n| n.trim().is_empty())
    {
        return Err(CoreError::Validation(
            "Citizen name must not be empty".to_string(),
        ));
    }

    if let Some(comments) = &feedback.comments {
        if comments.chars().count() > MAX_COMMENTS_LENGTH {
            return Err(CoreError::Validation(format!(
                "Comments must be at most {MAX_COMMENTS_LENGTH} characters"
            )));
        }
    }

    Ok(())
}

/// Check that `complaint` can take feedback, given how many entries it has.
///
/// Only resolved complaints accept feedback, and only once.
pub fn validate_feedback_allowed(complaint: &Complaint, existing_count: usize) -> CoreResult<()> {
    if complaint.effective_status() != STATUS_RESOLVED {
        return Err(CoreError::Validation(format!(
            "Feedback is only accepted for resolved complaints (complaint #{} is '{}')",
            complaint.id,
            complaint.effective_status()
        )));
    }
    if existing_count > 0 {
        return Err(CoreError::Conflict(format!(
            "Feedback for complaint #{} has already been submitted",
            complaint.id
        )));
    }
    Ok(())
}

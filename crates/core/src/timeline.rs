//! Timeline stage derivation.
//!
//! Each role sees a fixed, ordered pipeline of stages. A status resolves to
//! a [`StageProgress`]: how many leading stages are completed, and whether
//! the stage right after them is active. Everything else is pending.
//!
//! Citizen and officer views match the status exactly; the admin view
//! matches case-insensitive keywords so variant spellings still land on a
//! stage. The whole timeline is recomputed on every call.

use serde::Serialize;

use crate::roles::Role;
use crate::status::{
    STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_REJECTED, STATUS_RESOLVED, STATUS_UNDER_REVIEW,
};

// ---------------------------------------------------------------------------
// Stage names
// ---------------------------------------------------------------------------

pub const STAGE_SUBMITTED: &str = "Submitted";
pub const STAGE_UNDER_REVIEW: &str = "UnderReview";
pub const STAGE_PENDING: &str = "Pending";
pub const STAGE_REVIEW: &str = "Review";
pub const STAGE_PROGRESS: &str = "Progress";
pub const STAGE_RESOLVED: &str = "Resolved";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Display state of a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageState {
    Completed,
    Active,
    Pending,
}

/// One marker on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub name: &'static str,
    pub state: StageState,
}

/// How a role's view compares the status against its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The status must equal the rule's status string.
    Exact,
    /// The lower-cased, whitespace-collapsed status must contain the keyword.
    Substring,
}

impl MatchMode {
    fn matches(self, normalized: &str, pattern: &str) -> bool {
        match self {
            Self::Exact => normalized == pattern,
            Self::Substring => normalized.contains(pattern),
        }
    }

    fn normalize(self, status: &str) -> String {
        match self {
            Self::Exact => status.to_string(),
            Self::Substring => status
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
        }
    }
}

/// Where a status sits in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageProgress {
    /// Number of leading stages marked completed.
    pub completed: usize,
    /// Whether the stage at index `completed` is active.
    pub active: bool,
}

const fn progress(completed: usize, active: bool) -> StageProgress {
    StageProgress { completed, active }
}

/// A role's pipeline: its stages, matching mode, and status rules.
///
/// Rules are tried in order; the first match wins.
#[derive(Debug)]
pub struct TimelineSpec {
    pub stages: &'static [&'static str],
    pub mode: MatchMode,
    pub rules: &'static [(&'static str, StageProgress)],
    /// Status assumed when the record carries none; `None` uses `fallback`.
    pub missing_as: Option<&'static str>,
    /// Used when no rule matches.
    pub fallback: StageProgress,
}

// ---------------------------------------------------------------------------
// Per-role pipelines
// ---------------------------------------------------------------------------

/// Citizen: Submitted → UnderReview → Resolved.
pub static CITIZEN_TIMELINE: TimelineSpec = TimelineSpec {
    stages: &[STAGE_SUBMITTED, STAGE_UNDER_REVIEW, STAGE_RESOLVED],
    mode: MatchMode::Exact,
    rules: &[
        (STATUS_UNDER_REVIEW, progress(1, true)),
        (STATUS_IN_PROGRESS, progress(2, true)),
        (STATUS_COMPLETED, progress(2, true)),
        (STATUS_RESOLVED, progress(3, false)),
        // Closed without success: the last stage is reached but not completed.
        (STATUS_REJECTED, progress(2, true)),
    ],
    missing_as: None,
    fallback: progress(0, true),
};

/// Admin: Submitted → Review → Progress → Resolved, keyword matched.
pub static ADMIN_TIMELINE: TimelineSpec = TimelineSpec {
    stages: &[STAGE_SUBMITTED, STAGE_REVIEW, STAGE_PROGRESS, STAGE_RESOLVED],
    mode: MatchMode::Substring,
    rules: &[
        ("review", progress(1, true)),
        ("progress", progress(2, true)),
        ("resolved", progress(3, true)),
        // Rejected leaves the pipeline stalled before Resolved.
        ("rejected", progress(3, false)),
    ],
    missing_as: None,
    fallback: progress(1, false),
};

/// Officer: Pending → Review → Progress → Resolved.
pub static OFFICER_TIMELINE: TimelineSpec = TimelineSpec {
    stages: &[STAGE_PENDING, STAGE_REVIEW, STAGE_PROGRESS, STAGE_RESOLVED],
    mode: MatchMode::Exact,
    rules: &[
        (STATUS_UNDER_REVIEW, progress(1, true)),
        (STATUS_IN_PROGRESS, progress(2, true)),
        // Officer finished; waiting for admin closure.
        (STATUS_COMPLETED, progress(3, true)),
        (STATUS_RESOLVED, progress(4, false)),
        (STATUS_REJECTED, progress(3, true)),
    ],
    missing_as: Some(STATUS_UNDER_REVIEW),
    fallback: progress(1, false),
};

/// The pipeline shown to `role`.
pub fn timeline_spec(role: Role) -> &'static TimelineSpec {
    match role {
        Role::Citizen => &CITIZEN_TIMELINE,
        Role::Officer => &OFFICER_TIMELINE,
        Role::Admin => &ADMIN_TIMELINE,
    }
}

/// Matching mode used by `role`'s view.
pub fn match_mode(role: Role) -> MatchMode {
    timeline_spec(role).mode
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

impl TimelineSpec {
    /// Resolve `status` to its position in this pipeline.
    pub fn progress_for(&self, status: Option<&str>) -> StageProgress {
        let Some(status) = status.or(self.missing_as) else {
            return self.fallback;
        };
        let normalized = self.mode.normalize(status);
        self.rules
            .iter()
            .find(|(pattern, _)| self.mode.matches(&normalized, pattern))
            .map(|(_, progress)| *progress)
            .unwrap_or(self.fallback)
    }

    /// Build the full stage list for `status`.
    pub fn derive(&self, status: Option<&str>) -> Vec<Stage> {
        let StageProgress { completed, active } = self.progress_for(status);
        self.stages
            .iter()
            .enumerate()
            .map(|(index, &name)| {
                let state = if index < completed {
                    StageState::Completed
                } else if active && index == completed {
                    StageState::Active
                } else {
                    StageState::Pending
                };
                Stage { name, state }
            })
            .collect()
    }
}

/// Derive the timeline for `status` as seen by `role`.
///
/// Never fails: unknown statuses yield the role's initial timeline. A
/// missing status does too, except on the officer view, which reads it as
/// `Under Review`.
pub fn derive_stages(status: Option<&str>, role: Role) -> Vec<Stage> {
    timeline_spec(role).derive(status)
}

/// The active stage, if any.
pub fn active_stage(stages: &[Stage]) -> Option<&Stage> {
    stages.iter().find(|s| s.state == StageState::Active)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

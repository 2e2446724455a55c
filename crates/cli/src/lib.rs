//! Batch evaluator behind the `resolveit-eval` binary.
//!
//! Reads a JSON array of complaint records, evaluates each one for the
//! configured role and writes a JSON report: the per-complaint evaluations
//! in the role's list order plus the dashboard summary.

pub mod config;

use std::io::{Read, Write};

use anyhow::Context;
use resolveit_core::dashboard::{sort_for_role, summarize, DashboardSummary};
use resolveit_core::{evaluate_all, Complaint, ComplaintEvaluation, Role, Timestamp};
use serde::Serialize;

use crate::config::CliConfig;

/// Output document of one evaluator run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalReport {
    pub role: Role,
    pub evaluated_at: Timestamp,
    pub summary: DashboardSummary,
    pub complaints: Vec<ComplaintEvaluation>,
}

/// Evaluate `complaints` for `role` at `now`.
pub fn build_report(mut complaints: Vec<Complaint>, role: Role, now: Timestamp) -> EvalReport {
    sort_for_role(&mut complaints, role);
    EvalReport {
        role,
        evaluated_at: now,
        summary: summarize(&complaints, role, now),
        complaints: evaluate_all(&complaints, role, now),
    }
}

/// Decode a JSON array of complaints.
pub fn parse_complaints(raw: &str) -> anyhow::Result<Vec<Complaint>> {
    serde_json::from_str(raw).context("Input must be a JSON array of complaint records")
}

/// Read complaints from `config.input` (or `stdin`) and write the report to `out`.
pub fn run(
    config: &CliConfig,
    mut stdin: impl Read,
    mut out: impl Write,
) -> anyhow::Result<EvalReport> {
    let raw = match &config.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            stdin
                .read_to_string(&mut raw)
                .context("Failed to read complaints from stdin")?;
            raw
        }
    };

    let complaints = parse_complaints(&raw)?;
    tracing::info!(count = complaints.len(), role = %config.role, "Loaded complaints");

    let report = build_report(complaints, config.role, config.now());
    tracing::info!(
        total = report.summary.total,
        pending = report.summary.pending,
        resolved = report.summary.resolved,
        escalated = report.summary.escalated,
        "Evaluated complaints"
    );

    serde_json::to_writer_pretty(&mut out, &report).context("Failed to write report")?;
    writeln!(out).context("Failed to write report")?;
    Ok(report)
}

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use resolveit_core::{Role, Timestamp};

/// Evaluator configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// JSON file holding an array of complaints; `None` reads stdin.
    pub input: Option<PathBuf>,
    /// Role the complaints are evaluated for (default: `CITIZEN`).
    pub role: Role,
    /// Instant treated as "now"; `None` uses the wall clock.
    pub now: Option<Timestamp>,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var           | Default    |
    /// |-------------------|------------|
    /// | `RESOLVEIT_INPUT` | stdin      |
    /// | `RESOLVEIT_ROLE`  | `CITIZEN`  |
    /// | `RESOLVEIT_NOW`   | wall clock |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let input = get("RESOLVEIT_INPUT").map(PathBuf::from);

        let role = match get("RESOLVEIT_ROLE") {
            Some(raw) => Role::from_str_value(&raw).context("RESOLVEIT_ROLE is not a valid role")?,
            None => Role::Citizen,
        };

        let now = get("RESOLVEIT_NOW")
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw.trim())
                    .map(|dt| dt.with_timezone(&Utc))
                    .with_context(|| format!("RESOLVEIT_NOW must be an RFC 3339 instant, got '{raw}'"))
            })
            .transpose()?;

        Ok(Self { input, role, now })
    }

    /// The evaluation instant: the configured one, or the current time.
    pub fn now(&self) -> Timestamp {
        self.now.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::TimeZone;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<CliConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert_eq!(config.input, None);
        assert_eq!(config.role, Role::Citizen);
        assert_eq!(config.now, None);
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("RESOLVEIT_INPUT", "complaints.json"),
            ("RESOLVEIT_ROLE", "officer"),
            ("RESOLVEIT_NOW", "2025-06-15T12:00:00Z"),
        ])
        .unwrap();
        assert_eq!(config.input, Some(PathBuf::from("complaints.json")));
        assert_eq!(config.role, Role::Officer);
        assert_eq!(config.now(), Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[("RESOLVEIT_INPUT", " "), ("RESOLVEIT_ROLE", "")]).unwrap();
        assert_eq!(config.input, None);
        assert_eq!(config.role, Role::Citizen);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(config(&[("RESOLVEIT_ROLE", "MAYOR")]).is_err());
        assert!(config(&[("RESOLVEIT_NOW", "yesterday")]).is_err());
    }
}

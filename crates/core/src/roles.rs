//! Well-known role tokens and the [`Role`] enum.
//!
//! These must match the `users.role` values issued by the backend.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_CITIZEN: &str = "CITIZEN";
pub const ROLE_OFFICER: &str = "OFFICER";
pub const ROLE_ADMIN: &str = "ADMIN";

/// Placeholder role some clients store for a not-yet-identified user.
pub const ROLE_ANONYMOUS: &str = "ANONYMOUS";

/// All valid role tokens.
pub const VALID_ROLES: &[&str] = &[ROLE_CITIZEN, ROLE_OFFICER, ROLE_ADMIN];

/// The viewing role of a dashboard or detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Citizen,
    Officer,
    Admin,
}

impl Role {
    /// Parse a role token, ignoring case and surrounding whitespace.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_uppercase().as_str() {
            ROLE_CITIZEN => Ok(Self::Citizen),
            ROLE_OFFICER => Ok(Self::Officer),
            ROLE_ADMIN => Ok(Self::Admin),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    /// The canonical upper-case token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => ROLE_CITIZEN,
            Self::Officer => ROLE_OFFICER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Infer the role from a page path when the stored user carries none.
    ///
    /// Admin and officer pages are prefixed `admin-` and `officer-`; every
    /// other page belongs to the citizen portal.
    pub fn infer_from_path(path: &str) -> Self {
        let path = path.to_ascii_lowercase();
        if path.contains("admin-") {
            Self::Admin
        } else if path.contains("officer-") {
            Self::Officer
        } else {
            Self::Citizen
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_value(s)
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account roles on the platform.
///
/// `register` only accepts farmer and microfinance; admin accounts are
/// provisioned on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Microfinance,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Microfinance => "microfinance",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string matches none of the known roles.
#[derive(Debug, thiserror::Error)]
#[error("unknown role '{0}' (expected farmer, microfinance, or admin)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "microfinance" | "mfi" => Ok(Role::Microfinance),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

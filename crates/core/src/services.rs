//! External identity services a passkeep account can be linked to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/* --------------------------------------------------------------------------
   Service constants
   -------------------------------------------------------------------------- */

pub const SERVICE_GITHUB: &str = "github";
pub const SERVICE_TELEGRAM: &str = "telegram";
pub const SERVICE_GMAIL: &str = "gmail";
pub const SERVICE_EMAIL: &str = "email";

/// All accepted values of the `service` parameter, in display order.
///
/// Must match the `CHECK` constraint on `auth_providers.provider`.
pub const ALLOWED_SERVICES: &[&str] = &[
    SERVICE_GITHUB,
    SERVICE_TELEGRAM,
    SERVICE_GMAIL,
    SERVICE_EMAIL,
];

/// An identity service, stored as `auth_providers.provider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthService {
    Github,
    Telegram,
    Gmail,
    Email,
}

impl AuthService {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthService::Github => SERVICE_GITHUB,
            AuthService::Telegram => SERVICE_TELEGRAM,
            AuthService::Gmail => SERVICE_GMAIL,
            AuthService::Email => SERVICE_EMAIL,
        }
    }
}

impl fmt::Display for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Service must be one of: {}", ALLOWED_SERVICES.join(", "))]
pub struct UnknownService;

impl FromStr for AuthService {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SERVICE_GITHUB => Ok(AuthService::Github),
            SERVICE_TELEGRAM => Ok(AuthService::Telegram),
            SERVICE_GMAIL => Ok(AuthService::Gmail),
            SERVICE_EMAIL => Ok(AuthService::Email),
            _ => Err(UnknownService),
        }
    }
}

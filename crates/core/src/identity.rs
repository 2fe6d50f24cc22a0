//! Login identities.
//!
//! A user has exactly one primary identity (`auth_type` + `auth_id`) and may
//! additionally link a Telegram account. The primary identity's kind decides
//! which login path created the account.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const AUTH_TYPE_EMAIL: &str = "email";
pub const AUTH_TYPE_TELEGRAM: &str = "telegram";
pub const AUTH_TYPE_YANDEX: &str = "yandex";

/// Kind of primary login identity, stored as text in `users.auth_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    Email,
    Telegram,
    Yandex,
}

impl AuthType {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthType::Email => AUTH_TYPE_EMAIL,
            AuthType::Telegram => AUTH_TYPE_TELEGRAM,
            AuthType::Yandex => AUTH_TYPE_YANDEX,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AUTH_TYPE_EMAIL => Ok(AuthType::Email),
            AUTH_TYPE_TELEGRAM => Ok(AuthType::Telegram),
            AUTH_TYPE_YANDEX => Ok(AuthType::Yandex),
            other => Err(format!("Unknown auth type '{other}'")),
        }
    }
}

/// An external identity a user can be looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalIdentity {
    /// Email + password account; the email doubles as the auth id.
    Email(String),
    /// Telegram numeric user id.
    Telegram(i64),
    /// Yandex OAuth subject id.
    Yandex(String),
}

impl ExternalIdentity {
    pub fn auth_type(&self) -> AuthType {
        match self {
            ExternalIdentity::Email(_) => AuthType::Email,
            ExternalIdentity::Telegram(_) => AuthType::Telegram,
            ExternalIdentity::Yandex(_) => AuthType::Yandex,
        }
    }

    /// Value stored in `users.auth_id` for this identity.
    pub fn auth_id(&self) -> String {
        match self {
            ExternalIdentity::Email(email) => email.clone(),
            ExternalIdentity::Telegram(id) => id.to_string(),
            ExternalIdentity::Yandex(id) => id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_type_round_trips_through_text() {
        for kind in [AuthType::Email, AuthType::Telegram, AuthType::Yandex] {
            assert_eq!(kind.as_str().parse::<AuthType>(), Ok(kind));
        }
        assert!("github".parse::<AuthType>().is_err());
    }

    #[test]
    fn external_identity_auth_id() {
        assert_eq!(ExternalIdentity::Telegram(42).auth_id(), "42");
        assert_eq!(
            ExternalIdentity::Email("a@b.io".into()).auth_type(),
            AuthType::Email
        );
    }
}

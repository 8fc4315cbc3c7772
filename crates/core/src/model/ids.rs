use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("user id cannot be empty")]
    EmptyUserId,
}

/// Stable identifier handed out by the identity provider.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a validated `UserId` (trimmed, non-empty).
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::EmptyUserId` if the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::EmptyUserId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    id: UserId,
    display_name: Option<String>,
}

impl UserIdentity {
    #[must_use]
    pub fn new(id: UserId, display_name: Option<String>) -> Self {
        let display_name = display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        Self { id, display_name }
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Display name, falling back to `"User"` when the provider gave none.
    #[must_use]
    pub fn display_name_or_default(&self) -> &str {
        self.display_name().unwrap_or("User")
    }

    /// First character of the display name, used for avatars.
    #[must_use]
    pub fn initial(&self) -> char {
        self.display_name()
            .and_then(|name| name.chars().next())
            .unwrap_or('U')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_blank() {
        assert_eq!(UserId::new("   ").unwrap_err(), IdentityError::EmptyUserId);
    }

    #[test]
    fn user_id_trims() {
        let id = UserId::new("  abc123 ").unwrap();
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn identity_falls_back_when_name_missing() {
        let identity = UserIdentity::new(UserId::new("u1").unwrap(), Some("  ".into()));
        assert_eq!(identity.display_name(), None);
        assert_eq!(identity.display_name_or_default(), "User");
        assert_eq!(identity.initial(), 'U');
    }

    #[test]
    fn identity_initial_uses_first_char() {
        let identity = UserIdentity::new(UserId::new("u1").unwrap(), Some("Ada".into()));
        assert_eq!(identity.initial(), 'A');
        assert_eq!(identity.display_name_or_default(), "Ada");
    }
}

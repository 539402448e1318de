//! Basic-auth credential pairs.

use std::fmt;

/// A `(user, password)` pair for HTTP Basic authentication.
///
/// Two independent instances exist in a running server: the read pair and the
/// write pair. Either may be absent, which disables that tier.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Check a supplied pair against this one.
    pub fn matches(&self, user: &str, password: &str) -> bool {
        self.user == user && self.password == password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_requires_both_fields() {
        let creds = Credentials::new("w", "wp");
        assert!(creds.matches("w", "wp"));
        assert!(!creds.matches("w", "other"));
        assert!(!creds.matches("other", "wp"));
    }

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::new("w", "secret");
        let printed = format!("{creds:?}");
        assert!(!printed.contains("secret"));
    }
}

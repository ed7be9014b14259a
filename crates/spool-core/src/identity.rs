//! Commit author identity parsing and newtype.
//!
//! Provides a [`CommitIdentity`] type parsed from the single free-text
//! `Name <email>` string the commit form exposes.

use std::fmt;

use crate::error::Error;

/// A validated commit author identity.
///
/// Parsed from the strict `Name <email>` shape: non-empty name, one
/// space, then an angle-bracketed e-mail with non-empty local part and
/// domain. Anything else is rejected before the adapter is called, so a
/// malformed author can never reach the commit itself.
///
/// # Examples
///
/// ```
/// use spool_core::CommitIdentity;
///
/// let identity = CommitIdentity::parse("Jane Doe <jane@example.com>").unwrap();
/// assert_eq!(identity.name(), "Jane Doe");
/// assert_eq!(identity.email(), "jane@example.com");
///
/// assert!(CommitIdentity::parse("just a name").is_err());
/// assert!(CommitIdentity::parse("Jane <not-an-email>").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    name: String,
    email: String,
}

impl CommitIdentity {
    /// Parse a `Name <email>` string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAuthor`] if the string does not match the
    /// pattern.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidAuthor(raw.to_string());

        let rest = raw.strip_suffix('>').ok_or_else(invalid)?;
        let (name, email) = rest.split_once(" <").ok_or_else(invalid)?;

        if name.is_empty() || email.is_empty() || email.contains('<') || email.contains('>') {
            return Err(invalid());
        }

        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// The author name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The author e-mail address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for CommitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

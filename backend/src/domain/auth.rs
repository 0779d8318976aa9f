//! Session tokens issued by the identity provider.
//!
//! The client signs in with the provider and hands the resulting token to
//! `POST /api/v1/session`; the service exchanges it for a cookie session.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when a session token payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTokenValidationError {
    /// Token was missing or blank once trimmed.
    Empty,
    /// Token contained whitespace or control characters.
    Malformed,
}

impl fmt::Display for SessionTokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "session token must not be empty"),
            Self::Malformed => write!(f, "session token is malformed"),
        }
    }
}

impl std::error::Error for SessionTokenValidationError {}

/// Opaque provider token.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - No interior whitespace or control characters.
/// - Wiped from memory on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use backend::domain::SessionToken;
///
/// let token = SessionToken::new("  sess_abc  ").unwrap();
/// assert_eq!(token.expose(), "sess_abc");
/// assert!(!format!("{token:?}").contains("sess_abc"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Validate a raw token string.
    pub fn new(raw: &str) -> Result<Self, SessionTokenValidationError> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(SessionTokenValidationError::Empty);
        }
        if token
            .chars()
            .any(|ch| ch.is_whitespace() || ch.is_control())
        {
            return Err(SessionTokenValidationError::Malformed);
        }
        Ok(Self(Zeroizing::new(token.to_owned())))
    }

    /// Raw token for forwarding to the provider.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

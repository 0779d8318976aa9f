//! Driving port for username availability checks.

use async_trait::async_trait;

use crate::domain::{Error, UsernameStatus};

/// Answers whether a handle can still be registered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsernameQuery: Send + Sync {
    /// Classify any candidate string. Reserved and malformed handles are
    /// answered without consulting the identity provider.
    async fn username_status(&self, candidate: &str) -> Result<UsernameStatus, Error>;
}

//! Username availability service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::identity_errors::map_identity_error;
use crate::domain::ports::{IdentityDirectory, UsernameQuery};
use crate::domain::{Error, ReservedUsernames, Username, UsernameStatus};

/// Checks handles against the reserved list, then the handle format, then
/// the identity provider.
#[derive(Clone)]
pub struct UsernameService<I> {
    identities: Arc<I>,
    reserved: Arc<ReservedUsernames>,
}

impl<I> UsernameService<I> {
    /// Create a service using `reserved` as the blocked handle set.
    pub fn new(identities: Arc<I>, reserved: ReservedUsernames) -> Self {
        Self {
            identities,
            reserved: Arc::new(reserved),
        }
    }
}

#[async_trait]
impl<I> UsernameQuery for UsernameService<I>
where
    I: IdentityDirectory,
{
    async fn username_status(&self, candidate: &str) -> Result<UsernameStatus, Error> {
        if self.reserved.contains(candidate) {
            return Ok(UsernameStatus::Reserved);
        }
        let username = match Username::new(candidate) {
            Ok(username) => username,
            Err(error) => {
                debug!(%error, "username candidate is malformed");
                return Ok(UsernameStatus::Invalid);
            }
        };
        let registered = self
            .identities
            .username_registered(&username)
            .await
            .map_err(map_identity_error)?;
        Ok(if registered {
            UsernameStatus::Taken
        } else {
            UsernameStatus::Available
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{IdentityDirectoryError, MockIdentityDirectory};
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn reserved_handle_skips_identity_provider() {
        let mut identities = MockIdentityDirectory::new();
        identities.expect_username_registered().never();

        let service = UsernameService::new(Arc::new(identities), ReservedUsernames::default());
        let status = service
            .username_status("admin")
            .await
            .expect("status");
        assert_eq!(status, UsernameStatus::Reserved);
        assert!(status.exists());
    }

    #[rstest]
    #[case(true, UsernameStatus::Taken)]
    #[case(false, UsernameStatus::Available)]
    #[tokio::test]
    async fn provider_answer_decides_status(
        #[case] registered: bool,
        #[case] expected: UsernameStatus,
    ) {
        let mut identities = MockIdentityDirectory::new();
        identities
            .expect_username_registered()
            .times(1)
            .return_once(move |_| Ok(registered));

        let service = UsernameService::new(Arc::new(identities), ReservedUsernames::default());
        let status = service
            .username_status("juan")
            .await
            .expect("status");
        assert_eq!(status, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn provider_outage_is_unavailable() {
        let mut identities = MockIdentityDirectory::new();
        identities
            .expect_username_registered()
            .return_once(|_| Err(IdentityDirectoryError::transport("timeout")));

        let service = UsernameService::new(Arc::new(identities), ReservedUsernames::default());
        let error = service
            .username_status("juan")
            .await
            .expect_err("outage");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[case("juan dela cruz")]
    #[case("")]
    #[case("emoji🙂")]
    #[tokio::test]
    async fn malformed_candidate_is_invalid_without_provider_call(#[case] candidate: &str) {
        let mut identities = MockIdentityDirectory::new();
        identities.expect_username_registered().never();

        let service = UsernameService::new(Arc::new(identities), ReservedUsernames::default());
        let status = service
            .username_status(candidate)
            .await
            .expect("status");
        assert_eq!(status, UsernameStatus::Invalid);
        assert!(!status.exists());
    }

    #[rstest]
    #[tokio::test]
    async fn reserved_check_is_case_sensitive() {
        let mut identities = MockIdentityDirectory::new();
        identities
            .expect_username_registered()
            .withf(|username| username.as_ref() == "Admin")
            .times(1)
            .return_once(|_| Ok(false));

        let service = UsernameService::new(Arc::new(identities), ReservedUsernames::default());
        let status = service
            .username_status("Admin")
            .await
            .expect("status");
        assert_eq!(status, UsernameStatus::Available);
    }
}

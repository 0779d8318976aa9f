//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use backend::domain::ReservedUsernames;
use backend::outbound::identity::HttpIdentityDirectory;
use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) identity: Arc<HttpIdentityDirectory>,
    pub(crate) reserved_usernames: ReservedUsernames,
}

impl ServerConfig {
    /// Construct a server configuration from its required adapters.
    #[must_use]
    pub fn new(
        key: Key,
        bind_addr: SocketAddr,
        db_pool: DbPool,
        identity: HttpIdentityDirectory,
    ) -> Self {
        Self {
            key,
            cookie_secure: true,
            same_site: SameSite::Lax,
            bind_addr,
            db_pool,
            identity: Arc::new(identity),
            reserved_usernames: ReservedUsernames::default(),
        }
    }

    /// Set the session cookie `Secure` flag and `SameSite` policy.
    #[must_use]
    pub fn with_cookie_policy(mut self, cookie_secure: bool, same_site: SameSite) -> Self {
        self.cookie_secure = cookie_secure;
        self.same_site = same_site;
        self
    }

    /// Replace the reserved username set.
    #[must_use]
    pub fn with_reserved_usernames(mut self, reserved: ReservedUsernames) -> Self {
        self.reserved_usernames = reserved;
        self
    }
}

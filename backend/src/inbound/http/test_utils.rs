//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
///
/// # Panics
/// Panics when the response did not set the cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

#[cfg(test)]
pub(crate) use self::mocks::MockPorts;

#[cfg(test)]
mod mocks {
    use std::sync::Arc;

    use crate::domain::ports::{
        MockAccountCommand, MockOrgHierarchyQuery, MockRelationshipCommand,
        MockRelationshipQuery, MockSessionAuthenticator, MockUserProfileQuery, MockUsernameQuery,
    };
    use crate::inbound::http::state::HttpState;

    /// Mock for every port in [`HttpState`]. Tests set expectations on the
    /// ports they exercise; the rest panic if called.
    #[derive(Default)]
    pub(crate) struct MockPorts {
        pub relationships: MockRelationshipCommand,
        pub relationships_query: MockRelationshipQuery,
        pub accounts: MockAccountCommand,
        pub profiles: MockUserProfileQuery,
        pub usernames: MockUsernameQuery,
        pub org: MockOrgHierarchyQuery,
        pub sessions: MockSessionAuthenticator,
    }

    impl MockPorts {
        pub(crate) fn into_state(self) -> HttpState {
            HttpState {
                relationships: Arc::new(self.relationships),
                relationships_query: Arc::new(self.relationships_query),
                accounts: Arc::new(self.accounts),
                profiles: Arc::new(self.profiles),
                usernames: Arc::new(self.usernames),
                org: Arc::new(self.org),
                sessions: Arc::new(self.sessions),
            }
        }
    }
}

#[cfg(test)]
pub(crate) use self::login::{login_request, test_login_resource};

#[cfg(test)]
mod login {
    use actix_web::{HttpResponse, Resource, test::TestRequest, web};

    use crate::domain::{Error, UserId};
    use crate::inbound::http::session::SessionContext;

    /// Route that stores `{id}` as the session user, standing in for
    /// `POST /api/v1/session` without an identity provider.
    pub(crate) fn test_login_resource() -> Resource {
        web::resource("/__test/login/{id}").route(web::post().to(
            |session: SessionContext, id: web::Path<String>| async move {
                let id = UserId::new(id.into_inner())
                    .map_err(|err| Error::invalid_request(err.to_string()))?;
                session.persist_user(&id)?;
                Ok::<_, Error>(HttpResponse::NoContent().finish())
            },
        ))
    }

    /// Request hitting [`test_login_resource`] for `user`.
    pub(crate) fn login_request(user: &str) -> TestRequest {
        TestRequest::post().uri(&format!("/__test/login/{user}"))
    }
}

//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, OrgHierarchyQuery, RelationshipCommand, RelationshipQuery,
    SessionAuthenticator, UserProfileQuery, UsernameQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use backend::domain::ports::{
///     AccountCommand, OrgHierarchyQuery, RelationshipCommand, RelationshipQuery,
///     SessionAuthenticator, UserProfileQuery, UsernameQuery,
/// };
/// use backend::inbound::http::state::HttpState;
///
/// fn build(
///     relationships: Arc<dyn RelationshipCommand>,
///     relationships_query: Arc<dyn RelationshipQuery>,
///     accounts: Arc<dyn AccountCommand>,
///     profiles: Arc<dyn UserProfileQuery>,
///     usernames: Arc<dyn UsernameQuery>,
///     org: Arc<dyn OrgHierarchyQuery>,
///     sessions: Arc<dyn SessionAuthenticator>,
/// ) -> HttpState {
///     HttpState {
///         relationships,
///         relationships_query,
///         accounts,
///         profiles,
///         usernames,
///         org,
///         sessions,
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Follow and unfollow.
    pub relationships: Arc<dyn RelationshipCommand>,
    /// Follower listings and edge checks.
    pub relationships_query: Arc<dyn RelationshipQuery>,
    /// Sign-up and bio edits.
    pub accounts: Arc<dyn AccountCommand>,
    /// Profile reads.
    pub profiles: Arc<dyn UserProfileQuery>,
    /// Username availability.
    pub usernames: Arc<dyn UsernameQuery>,
    /// Campus, college and program listing.
    pub org: Arc<dyn OrgHierarchyQuery>,
    /// Provider token exchange.
    pub sessions: Arc<dyn SessionAuthenticator>,
}

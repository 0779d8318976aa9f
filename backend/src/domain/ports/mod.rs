//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, `SessionAuthenticator`) are called by
//! inbound adapters and return the domain [`Error`](crate::domain::Error).
//! Driven ports (`*Repository`, `IdentityDirectory`) are implemented by
//! outbound adapters and return their own `define_port_error!` enums.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod identity_directory;
mod org_hierarchy_query;
mod relationship_command;
mod relationship_query;
mod relationship_repository;
mod session_authenticator;
mod user_profile_query;
mod user_repository;
mod username_query;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, SignUpRequest};
#[cfg(test)]
pub use identity_directory::MockIdentityDirectory;
pub use identity_directory::{IdentityDirectory, IdentityDirectoryError, IdentityRecord};
#[cfg(test)]
pub use org_hierarchy_query::MockOrgHierarchyQuery;
pub use org_hierarchy_query::{FixtureOrgHierarchyQuery, OrgHierarchyQuery};
#[cfg(test)]
pub use relationship_command::MockRelationshipCommand;
pub use relationship_command::RelationshipCommand;
#[cfg(test)]
pub use relationship_query::MockRelationshipQuery;
pub use relationship_query::RelationshipQuery;
#[cfg(test)]
pub use relationship_repository::MockRelationshipRepository;
pub use relationship_repository::{RelationshipRepository, RelationshipRepositoryError};
#[cfg(test)]
pub use session_authenticator::MockSessionAuthenticator;
pub use session_authenticator::SessionAuthenticator;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use username_query::MockUsernameQuery;
pub use username_query::UsernameQuery;

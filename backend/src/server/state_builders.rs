//! Builds the HTTP port bundle from the database pool and identity adapter.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{
    AccountCommand, RelationshipCommand, RelationshipQuery, UserProfileQuery,
};
use backend::domain::{
    AccountService, IdentitySessionAuthenticator, RelationshipService, UsernameService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselOrgHierarchyQuery, DieselRelationshipRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Wire domain services over the Diesel repositories and identity adapter.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let identity = config.identity.clone();

    let relationship_repo = Arc::new(DieselRelationshipRepository::new(config.db_pool.clone()));
    let relationship_service = Arc::new(RelationshipService::new(
        relationship_repo,
        identity.clone(),
    ));
    let relationships: Arc<dyn RelationshipCommand> = relationship_service.clone();
    let relationships_query: Arc<dyn RelationshipQuery> = relationship_service;

    let user_repo = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let account_service = Arc::new(AccountService::new(user_repo));
    let accounts: Arc<dyn AccountCommand> = account_service.clone();
    let profiles: Arc<dyn UserProfileQuery> = account_service;

    web::Data::new(HttpState {
        relationships,
        relationships_query,
        accounts,
        profiles,
        usernames: Arc::new(UsernameService::new(
            identity.clone(),
            config.reserved_usernames.clone(),
        )),
        org: Arc::new(DieselOrgHierarchyQuery::new(config.db_pool.clone())),
        sessions: Arc::new(IdentitySessionAuthenticator::new(identity)),
    })
}

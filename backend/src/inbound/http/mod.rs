//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod health;
pub mod org;
pub mod relationships;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Callers wrap the enclosing scope in session middleware and provide
/// [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::create_session)
        .service(auth::delete_session)
        .service(org::list_programs)
        .service(relationships::follow)
        .service(relationships::unfollow)
        .service(relationships::list_followers)
        .service(relationships::list_followees)
        .service(relationships::is_following)
        .service(users::sign_up)
        .service(users::username_exists)
        .service(users::update_bio)
        .service(users::get_profile);
}

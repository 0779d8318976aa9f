//! Backend entry-point: loads settings, applies migrations, and serves the
//! REST API with OpenAPI docs.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ReservedUsernames;
use backend::inbound::http::health::HealthState;
use backend::outbound::identity::{HttpIdentityDirectory, IdentityProviderSecret};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server, load_session_key};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;

    let database_url = settings.database_url()?;
    let applied = run_pending_migrations(database_url)
        .await
        .wrap_err("database migrations failed")?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to build database pool")?;

    let identity = HttpIdentityDirectory::new(
        settings.identity_base_url()?,
        IdentityProviderSecret::new(settings.identity_secret_key()?),
        settings.identity_timeout(),
    )
    .wrap_err("failed to build identity provider client")?;

    let key = load_session_key(
        &settings.session_key_file(),
        cfg!(debug_assertions) || settings.session_allow_ephemeral,
    )?;
    let config = ServerConfig::new(key, settings.bind_addr()?, pool, identity)
        .with_cookie_policy(settings.cookie_secure, settings.cookie_same_site()?)
        .with_reserved_usernames(ReservedUsernames::with_extra(settings.reserved_usernames()));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(bind_addr = %settings.bind_addr()?, "listening");
    server.await?;
    Ok(())
}

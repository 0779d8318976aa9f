//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `KABSU_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::SameSite;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A required value was not supplied.
    #[error("missing required setting `{name}`")]
    Missing {
        /// Setting name.
        name: &'static str,
    },
    /// A value was supplied but could not be parsed.
    #[error("invalid value for `{name}`: {message}")]
    Invalid {
        /// Setting name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

/// Configuration for the HTTP server and its outbound adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KABSU")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Base URL of the identity provider REST API.
    pub identity_base_url: Option<String>,
    /// Secret key sent as a bearer token to the identity provider.
    pub identity_secret_key: Option<String>,
    /// Identity provider request timeout in seconds.
    pub identity_timeout_secs: Option<u64>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Session cookie `SameSite` policy: `lax`, `strict` or `none`.
    pub cookie_same_site: Option<String>,
    /// Comma-separated usernames reserved in addition to the defaults.
    pub reserved_usernames: Option<String>,
}

impl ServerSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
            name: "bind_addr",
            message: err.to_string(),
        })
    }

    /// Database URL; required.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_deref(), "database_url")
    }

    /// Pool size, defaulting to 10.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE).max(1)
    }

    /// Identity provider base URL; required.
    pub fn identity_base_url(&self) -> Result<reqwest::Url, SettingsError> {
        let raw = required(self.identity_base_url.as_deref(), "identity_base_url")?;
        reqwest::Url::parse(raw).map_err(|err| SettingsError::Invalid {
            name: "identity_base_url",
            message: err.to_string(),
        })
    }

    /// Identity provider secret; required.
    pub fn identity_secret_key(&self) -> Result<&str, SettingsError> {
        required(self.identity_secret_key.as_deref(), "identity_secret_key")
    }

    /// Identity provider timeout, defaulting to ten seconds.
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(
            self.identity_timeout_secs
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Path of the session key file.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Cookie `SameSite` policy, defaulting to `Lax`.
    pub fn cookie_same_site(&self) -> Result<SameSite, SettingsError> {
        match self
            .cookie_same_site
            .as_deref()
            .map(|raw| raw.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("lax") => Ok(SameSite::Lax),
            Some("strict") => Ok(SameSite::Strict),
            Some("none") => Ok(SameSite::None),
            Some(other) => Err(SettingsError::Invalid {
                name: "cookie_same_site",
                message: format!("expected lax, strict or none, got `{other}`"),
            }),
        }
    }

    /// Extra reserved usernames, split on commas.
    pub fn reserved_usernames(&self) -> Vec<String> {
        self.reserved_usernames
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { name })
}

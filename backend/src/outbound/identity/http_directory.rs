//! Reqwest-backed identity provider adapter.
//!
//! Owns transport details only: URL building, bearer authentication, timeout
//! and status mapping, and decoding provider JSON into domain records.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

use super::dto::{IdentityUserDto, VerifySessionRequestDto, VerifySessionResponseDto};
use crate::domain::ports::{IdentityDirectory, IdentityDirectoryError, IdentityRecord};
use crate::domain::{SessionToken, UserId, Username};

/// Provider API secret, wiped on drop and never printed.
#[derive(Clone)]
pub struct IdentityProviderSecret(Zeroizing<String>);

impl IdentityProviderSecret {
    /// Wrap the raw provider secret key.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for IdentityProviderSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityProviderSecret(<redacted>)")
    }
}

/// Identity directory that calls the provider's REST API.
pub struct HttpIdentityDirectory {
    client: Client,
    base_url: Url,
    secret: IdentityProviderSecret,
}

impl HttpIdentityDirectory {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        secret: IdentityProviderSecret,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            secret,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, IdentityDirectoryError> {
        build_endpoint(&self.base_url, segments)
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(self.secret.expose())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send `request`; `Ok(None)` when the status is one of `absent`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        absent: &[StatusCode],
    ) -> Result<Option<T>, IdentityDirectoryError> {
        let response = self
            .authorised(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if absent.contains(&status) {
            return Ok(None);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(body.as_ref()).map(Some)
    }
}

#[async_trait]
impl IdentityDirectory for HttpIdentityDirectory {
    async fn find_user(
        &self,
        id: &UserId,
    ) -> Result<Option<IdentityRecord>, IdentityDirectoryError> {
        let url = self.endpoint(&["users", id.as_ref()])?;
        let dto: Option<IdentityUserDto> = self
            .fetch(self.client.get(url), &[StatusCode::NOT_FOUND])
            .await?;
        dto.map(|dto| dto.into_record().map_err(IdentityDirectoryError::decode))
            .transpose()
    }

    async fn username_registered(
        &self,
        username: &Username,
    ) -> Result<bool, IdentityDirectoryError> {
        let url = self.endpoint(&["users"])?;
        let request = self
            .client
            .get(url)
            .query(&[("username", username.as_ref())]);
        let users: Option<Vec<IdentityUserDto>> = self.fetch(request, &[]).await?;
        Ok(users.is_some_and(|users| !users.is_empty()))
    }

    async fn verify_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<UserId>, IdentityDirectoryError> {
        let url = self.endpoint(&["sessions", "verify"])?;
        let request = self.client.post(url).json(&VerifySessionRequestDto {
            token: token.expose(),
        });
        let verified: Option<VerifySessionResponseDto> = self
            .fetch(request, &[StatusCode::UNAUTHORIZED, StatusCode::NOT_FOUND])
            .await?;
        verified
            .map(|dto| {
                UserId::new(dto.user_id)
                    .map_err(|err| IdentityDirectoryError::decode(format!("user id: {err}")))
            })
            .transpose()
    }
}

fn build_endpoint(base: &Url, segments: &[&str]) -> Result<Url, IdentityDirectoryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            IdentityDirectoryError::transport(format!("identity base url {base} cannot be a base"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, IdentityDirectoryError> {
    serde_json::from_slice(body).map_err(|error| {
        IdentityDirectoryError::decode(format!("invalid identity provider JSON: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityDirectoryError {
    if error.is_timeout() {
        IdentityDirectoryError::transport(format!("timed out: {error}"))
    } else {
        IdentityDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityDirectoryError {
    IdentityDirectoryError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

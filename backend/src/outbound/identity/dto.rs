//! Wire DTOs for the identity provider REST API.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ports::IdentityRecord;
use crate::domain::{UserId, Username};

#[derive(Debug, Deserialize)]
pub(super) struct IdentityUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) username: Option<String>,
}

impl IdentityUserDto {
    pub(super) fn into_record(self) -> Result<IdentityRecord, String> {
        let id = UserId::new(self.id).map_err(|err| format!("user id: {err}"))?;
        // The provider applies its own username rules; anything we cannot
        // represent is treated as "no username" rather than failing the call.
        let username = self.username.and_then(|raw| match Username::new(raw) {
            Ok(username) => Some(username),
            Err(err) => {
                warn!(user_id = %id, error = %err, "ignoring unrepresentable username");
                None
            }
        });
        Ok(IdentityRecord { id, username })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct VerifySessionRequestDto<'a> {
    pub(super) token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VerifySessionResponseDto {
    pub(super) user_id: String,
}

//! Mapping from identity provider failures to domain errors.

use crate::domain::Error;
use crate::domain::ports::IdentityDirectoryError;

/// Translate an identity directory failure into a transport-agnostic error.
///
/// Provider outages (transport failures and 5xx answers) become
/// `service_unavailable`; anything else the provider sends that the adapter
/// cannot use is an `internal_error`.
pub(crate) fn map_identity_error(error: IdentityDirectoryError) -> Error {
    match error {
        IdentityDirectoryError::Transport { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityDirectoryError::Status { status, message } if status >= 500 => {
            Error::service_unavailable(format!("identity provider returned {status}: {message}"))
        }
        IdentityDirectoryError::Status { status, message } => {
            Error::internal(format!("identity provider returned {status}: {message}"))
        }
        IdentityDirectoryError::Decode { message } => {
            Error::internal(format!("identity provider response invalid: {message}"))
        }
    }
}

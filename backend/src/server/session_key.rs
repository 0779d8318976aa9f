//! Session cookie key loading.

use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use thiserror::Error;
use tracing::warn;
use zeroize::Zeroize;

/// Minimum key material length accepted from the key file.
const SESSION_KEY_MIN_LEN: usize = 64;

/// Errors raised while loading the session key.
#[derive(Debug, Error)]
pub enum SessionKeyError {
    /// The key file could not be read and no fallback is allowed.
    #[error("failed to read session key at {path}: {source}")]
    Read {
        /// Configured key file.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The key file holds too little material.
    #[error("session key at {path} is {length} bytes; need at least {min_len}")]
    TooShort {
        /// Configured key file.
        path: PathBuf,
        /// Bytes found.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
}

/// Derive the cookie key from `path`.
///
/// When the file is unreadable a random key is used if `allow_ephemeral`
/// is set; sessions then do not survive a restart.
pub fn load_session_key(path: &Path, allow_ephemeral: bool) -> Result<Key, SessionKeyError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionKeyError::TooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionKeyError::Read {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

//! Identity provider outbound adapter.
//!
//! A thin reqwest implementation of the `IdentityDirectory` port against the
//! provider's REST API.

mod dto;
mod http_directory;

pub use http_directory::{HttpIdentityDirectory, IdentityProviderSecret};

//! Wire types for the xStation streaming API.
//!
//! ## Organization
//!
//! - [`login`] — Credentials and the `login` command envelope
//! - [`reply`] — Classification of inbound server messages

pub mod login;
pub mod reply;

pub use login::{Credentials, LoginRequest};
pub use reply::ServerMessage;

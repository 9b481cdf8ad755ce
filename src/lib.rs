//! # xtb-relay
//!
//! A small client for the [xStation](https://developers.xstation.com/)
//! streaming API. It opens a WebSocket, logs in, prints the server's
//! acknowledgment, and then relays operator-typed lines to the socket while
//! printing everything the server sends back.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xtb_relay::ws::relay::SessionRelay;
//!
//! #[tokio::main]
//! async fn main() -> xtb_relay::error::Result<()> {
//!     // Reads stdin, writes stdout, runs until the server closes.
//!     SessionRelay::connect("user123", "password123", "wss://ws.xtb.com/demo").await?;
//!     Ok(())
//! }
//! ```

pub mod constants;
pub mod error;
pub mod input;
pub mod types;
pub mod ws;

/// Re-export the relay type at crate root for convenience.
pub use ws::relay::SessionRelay;
/// Re-export the error type and Result alias.
pub use error::{RelayError, Result};

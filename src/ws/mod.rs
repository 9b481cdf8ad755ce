//! WebSocket session handling.
//!
//! ## [`relay`]: Session Relay
//!
//! Connects to an xStation streaming endpoint (`wss://ws.xtb.com/demo` or
//! `wss://ws.xtb.com/real`), sends the `login` command once the handshake
//! completes, and then relays operator lines to the socket while printing
//! every server reply as either
//!
//! - `Connection established! StreamSessionId: <id>`, or
//! - `Error: {<errorDescr>}`.
//!
//! There is no reconnect and no framing beyond one line per text frame.

pub mod relay;

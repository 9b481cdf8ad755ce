//! Constants for the xStation streaming API.
//!
//! Contains the well-known WebSocket endpoints and the fixed values that go
//! into the login handshake.

// ---------------------------------------------------------------------------
// WebSocket URLs
// ---------------------------------------------------------------------------

/// WebSocket endpoint for demo accounts.
pub const WS_DEMO_URL: &str = "wss://ws.xtb.com/demo";

/// WebSocket endpoint for real-money accounts.
pub const WS_REAL_URL: &str = "wss://ws.xtb.com/real";

// ---------------------------------------------------------------------------
// Login handshake
// ---------------------------------------------------------------------------

/// Command name of the login request.
pub const LOGIN_COMMAND: &str = "login";

/// Application tag sent with every login request.
pub const APP_NAME: &str = "web";

// ---------------------------------------------------------------------------
// Reply fields
// ---------------------------------------------------------------------------

/// Reply field holding the request outcome flag.
pub const FIELD_STATUS: &str = "status";

/// Reply field whose presence marks a successful login.
pub const FIELD_STREAM_SESSION_ID: &str = "streamSessionId";

/// Reply field carrying the server's error description.
pub const FIELD_ERROR_DESCR: &str = "errorDescr";

//! Login handshake types: credentials and the login request envelope.

use std::fmt;

use serde::Serialize;

use crate::constants::{APP_NAME, LOGIN_COMMAND};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Account credentials used for the login handshake.
///
/// Supplied once at startup and never mutated. The `Debug` output masks the
/// password so credentials can be passed to `tracing` fields safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    password: String,
}

impl Credentials {
    /// Create credentials from an account identifier and its password.
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// Returns the account identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Build the login request for these credentials.
    pub fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            command: LOGIN_COMMAND,
            arguments: LoginArguments {
                user_id: &self.user_id,
                password: &self.password,
                app_name: APP_NAME,
            },
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Login request
// ---------------------------------------------------------------------------

/// The `login` command sent as the first frame on every connection.
///
/// Serializes to
/// `{"command":"login","arguments":{"userId":..,"password":..,"appName":"web"}}`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Always `"login"`.
    pub command: &'a str,
    /// Credential payload.
    pub arguments: LoginArguments<'a>,
}

/// Arguments of the login command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginArguments<'a> {
    pub user_id: &'a str,
    pub password: &'a str,
    /// Always `"web"`.
    pub app_name: &'a str,
}

impl LoginRequest<'_> {
    /// Serialize to the JSON text sent on the wire.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

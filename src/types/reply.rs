//! Inbound server message classification.
//!
//! The relay only understands two shapes: a successful login acknowledgment
//! and "everything else", which is reported through the `errorDescr` field.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::constants::{FIELD_ERROR_DESCR, FIELD_STATUS, FIELD_STREAM_SESSION_ID};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Server message
// ---------------------------------------------------------------------------

/// A classified inbound message.
///
/// `Display` renders the human-readable line printed for the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// `status` was truthy and a `streamSessionId` key was present.
    Authenticated {
        /// Value under `streamSessionId`; may be `Value::Null`.
        stream_session_id: Value,
    },
    /// Any other shape, including explicit API error replies.
    Failed {
        /// Value under `errorDescr`, or `Value::Null` when absent.
        error_descr: Value,
    },
}

impl ServerMessage {
    /// Parse a raw frame payload and classify it.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(payload)?;
        Ok(Self::classify(&value))
    }

    /// Classify an already-decoded JSON value.
    ///
    /// Success is gated on key presence, not value: `{"status": true,
    /// "streamSessionId": null}` is still an acknowledgment.
    pub fn classify(value: &Value) -> Self {
        let authenticated = is_truthy(value.get(FIELD_STATUS))
            && value
                .as_object()
                .is_some_and(|obj| obj.contains_key(FIELD_STREAM_SESSION_ID));

        if authenticated {
            Self::Authenticated {
                stream_session_id: value[FIELD_STREAM_SESSION_ID].clone(),
            }
        } else {
            Self::Failed {
                error_descr: value.get(FIELD_ERROR_DESCR).cloned().unwrap_or(Value::Null),
            }
        }
    }

    /// Returns `true` for a login acknowledgment.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated { stream_session_id } => write!(
                f,
                "Connection established! StreamSessionId: {}",
                display_field(stream_session_id)
            ),
            Self::Failed { error_descr } => write!(f, "Error: {{{}}}", display_field(error_descr)),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Only a missing field, `null` and `false` are falsy.
fn is_truthy(field: Option<&Value>) -> bool {
    !matches!(field, None | Some(Value::Null) | Some(Value::Bool(false)))
}

/// Strings print without quotes, null prints empty, anything else as compact JSON.
fn display_field(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

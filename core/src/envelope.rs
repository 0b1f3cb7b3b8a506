//! Response envelope decoding.
//!
//! Every reply from the dating API is one JSON object that carries two
//! things at once: flat `code`/`message` status fields, and a payload under
//! a field whose name depends on what was requested. Both halves are read
//! from a single parse, and each is allowed to fail without affecting the
//! other.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::locator::PayloadKind;
use crate::response::StatusCode;

/// The `code`/`message` half of an envelope. The server sends `code` as a
/// string, e.g. `"200"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBlock {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl StatusBlock {
    /// Numeric value of `code`, if it parses.
    pub fn code_number(&self) -> Option<u16> {
        self.code.as_deref().and_then(|code| code.trim().parse().ok())
    }

    /// Classify `code`. A missing or non-numeric code counts as 400.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::classify(self.code_number().unwrap_or(400))
    }
}

/// Both projections of a decoded envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status: Option<StatusBlock>,
    pub payload: Option<T>,
}

/// Decode `bytes` as an envelope carrying a `T` at `kind`'s location.
///
/// Returns `None` only if `bytes` is not JSON. Otherwise the status and the
/// payload are decoded independently, and each comes back `None` on its own
/// if it is missing or malformed.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], kind: PayloadKind) -> Option<Envelope<T>> {
    let root: Value = match serde_json::from_slice(bytes) {
        Ok(root) => root,
        Err(e) => {
            tracing::debug!(error = %e, "response body is not JSON");
            return None;
        }
    };

    Some(Envelope {
        status: decode_status(&root),
        payload: decode_payload(&root, kind),
    })
}

fn decode_status(root: &Value) -> Option<StatusBlock> {
    let object = root.as_object()?;
    let code = object.get("code").and_then(Value::as_str).map(str::to_owned);
    let message = object.get("message").and_then(Value::as_str).map(str::to_owned);
    if code.is_none() && message.is_none() {
        tracing::debug!("envelope has no status fields");
        return None;
    }
    Some(StatusBlock { code, message })
}

fn decode_payload<T: DeserializeOwned>(root: &Value, kind: PayloadKind) -> Option<T> {
    let value = match kind.key() {
        Some(key) => match root.get(key) {
            Some(value) => value,
            None => {
                tracing::debug!(key, "payload key missing from envelope");
                return None;
            }
        },
        None => root,
    };

    match T::deserialize(value) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::debug!(key = kind.key(), error = %e, "payload failed to decode");
            None
        }
    }
}

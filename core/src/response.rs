//! Typed result of an executed request.

use bytes::Bytes;

use crate::envelope::{Envelope, StatusBlock};

/// Binary classification of an HTTP (or envelope) status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    BadRequest,
}

impl StatusCode {
    /// Exactly 200 is `Ok`. Everything else, redirects and server errors
    /// included, is `BadRequest`.
    pub fn classify(raw: u16) -> Self {
        if raw == 200 {
            StatusCode::Ok
        } else {
            StatusCode::BadRequest
        }
    }

    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }
}

/// A delivered HTTP response, decoded as far as it would go.
///
/// `raw_bytes` is always the exact body the server sent, even when
/// `envelope` is `None`.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub status_code: StatusCode,
    pub raw_status: u16,
    pub envelope: Option<Envelope<T>>,
    pub raw_bytes: Bytes,
}

impl<T> Response<T> {
    pub fn status(&self) -> Option<&StatusBlock> {
        self.envelope.as_ref()?.status.as_ref()
    }

    pub fn payload(&self) -> Option<&T> {
        self.envelope.as_ref()?.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.envelope?.payload
    }

    /// Re-parse the raw body as untyped JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.raw_bytes).ok()
    }
}

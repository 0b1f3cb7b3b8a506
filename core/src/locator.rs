//! Payload locator: which envelope field holds a response's payload.

use serde::de::DeserializeOwned;

/// Closed registry of payload shapes the dating API returns.
///
/// Each kind names the envelope field its data is nested under. `Root`
/// covers every type without a registered key: its payload is the whole
/// response body, object or array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Users,
    Chats,
    Messages,
    /// Wall posts. The server calls them `items`.
    Posts,
    Profile,
    AccessToken,
    /// No payload expected. Looked up under the literal key `"null"`, which
    /// the server never sends, so the payload always comes back absent.
    Nothing,
    Root,
}

impl PayloadKind {
    /// The envelope field name, or `None` to decode from the root value.
    pub fn key(self) -> Option<&'static str> {
        match self {
            PayloadKind::Users => Some("users"),
            PayloadKind::Chats => Some("chats"),
            PayloadKind::Messages => Some("messages"),
            PayloadKind::Posts => Some("items"),
            PayloadKind::Profile => Some("profile"),
            PayloadKind::AccessToken => Some("access_token"),
            PayloadKind::Nothing => Some("null"),
            PayloadKind::Root => None,
        }
    }
}

/// A response payload type with a known location in the envelope.
///
/// Types that don't override `KIND` are decoded from the root value.
pub trait Fetchable: DeserializeOwned {
    const KIND: PayloadKind = PayloadKind::Root;
}

impl Fetchable for serde_json::Value {}

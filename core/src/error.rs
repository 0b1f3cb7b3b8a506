//! Error types for the request pipeline.
//!
//! # Design
//! Failures are split by the stage that produces them. `InvalidUrl` only
//! appears while a `RequestSpec` is being constructed. `EncodingError` is
//! raised before any network traffic happens. `TransportError` is what a
//! caller of `Client::execute` sees. Response decoding has no error type at
//! all: a projection that fails to decode is simply absent from the
//! `Envelope`.

use thiserror::Error;

/// The URL handed to `RequestSpec::try_new` is not a valid absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid URL {input:?}: {reason}")]
pub struct InvalidUrl {
    pub input: String,
    pub reason: String,
}

/// A request body could not be turned into wire bytes.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// serde_json refused the body.
    #[error("failed to serialize body: {0}")]
    Json(#[from] serde_json::Error),

    /// Flattened encodings need a struct or map at the top level.
    #[error("body does not flatten into named fields")]
    NotAnObject,

    /// The field holds an array or object, which multipart cannot carry.
    #[error("field {0:?} is not representable as a string")]
    UnrepresentableField(String),

    /// The field name has characters outside the requested charset.
    #[error("field name {0:?} cannot be represented in the requested charset")]
    Name(String),

    /// The value of the named field has characters outside the requested charset.
    #[error("value of field {0:?} cannot be represented in the requested charset")]
    Value(String),
}

/// Errors delivered by `Client::execute`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The body failed to encode; no request was sent.
    #[error("request encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// The request could not be assembled, for example a header value with
    /// a newline in it. Nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// DNS, connection, timeout or body read failure. Nothing was decoded.
    #[error("network failure: {0}")]
    Network(String),
}

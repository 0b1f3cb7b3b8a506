//! Network pipeline for the dating service client.
//!
//! # Overview
//! One generic code path issues every request the app makes and decodes
//! every reply. Replies share an envelope shape: flat `code`/`message`
//! status fields plus a payload under a field whose name depends on the
//! payload type. The `PayloadKind` of the expected type tells the decoder
//! which field to read.
//!
//! # Design
//! - `RequestSpec` describes a request; `Client` executes it through a
//!   pluggable `Transport`.
//! - `encoder` turns bodies into JSON, flattened `key=value` pairs, or
//!   `multipart/form-data`.
//! - `envelope` decodes status and payload independently, so a reply that is
//!   half malformed still yields the other half.
//! - `Response` always keeps the raw body for ad-hoc inspection.

pub mod client;
pub mod config;
pub mod encoder;
pub mod envelope;
pub mod error;
pub mod http;
pub mod locator;
pub mod notification;
pub mod request;
pub mod response;
pub mod routes;
pub mod transport;
pub mod types;

pub use client::Client;
pub use config::ClientConfig;
pub use encoder::{BodyEncoding, Charset, EncodedBody};
pub use envelope::{Envelope, StatusBlock};
pub use error::{EncodingError, InvalidUrl, TransportError};
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use locator::{Fetchable, PayloadKind};
pub use notification::send_notification;
pub use request::RequestSpec;
pub use response::{Response, StatusCode};
pub use routes::Route;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    AccessToken, Chat, FetchUsersParams, Message, Null, Profile, SignIn, SignUp, UpdateStatus,
    User, WallPost,
};

//! Request body encoding.
//!
//! # Design
//! Three strategies turn a `Serialize` body into wire bytes:
//!
//! - `Json` writes the whole object graph. It does not pick a content type;
//!   callers that need `application/json` add the header themselves.
//! - `QueryString` flattens the body into named fields and joins them as
//!   `key=value&key=value`. Keys and values are emitted verbatim, with no
//!   percent-encoding, which is what the server currently parses.
//! - `Multipart` flattens the same way and lays the fields out as
//!   `multipart/form-data` under a random boundary. It is the only strategy
//!   that supplies its own content type, because the boundary is generated
//!   here.
//!
//! Flattening goes through `serde_json::Value` with `preserve_order`, so
//! struct fields come out in declaration order.

use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::error::EncodingError;

/// Character set used for multipart field names and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    UsAscii,
    Iso8859_1,
}

impl Charset {
    /// IANA name as it appears in the `charset=` parameter.
    pub fn iana_name(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::UsAscii => "us-ascii",
            Charset::Iso8859_1 => "iso-8859-1",
        }
    }

    /// Encode `text`, or `None` if any character falls outside the charset.
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            Charset::Utf8 => Some(text.as_bytes().to_vec()),
            Charset::UsAscii => text.is_ascii().then(|| text.as_bytes().to_vec()),
            Charset::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
        }
    }
}

/// How a request body goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    #[default]
    None,
    Json,
    QueryString,
    /// Flattened fields sent as `multipart/form-data`.
    Multipart(Charset),
}

/// Encoded body bytes plus the content type the encoding requires, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// A single flattened field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A string, number or boolean rendered as text.
    Scalar(String),
    /// An array or object.
    Compound(Value),
}

impl FieldValue {
    /// Text form used by the query-string encoding. Compound values render
    /// as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Scalar(text) => text.clone(),
            FieldValue::Compound(value) => value.to_string(),
        }
    }
}

/// Encode `body` with the given strategy. `BodyEncoding::None` yields no body.
pub fn encode<B: Serialize + ?Sized>(
    body: &B,
    encoding: BodyEncoding,
) -> Result<Option<EncodedBody>, EncodingError> {
    let encoded = match encoding {
        BodyEncoding::None => return Ok(None),
        BodyEncoding::Json => EncodedBody {
            bytes: serde_json::to_vec(body)?,
            content_type: None,
        },
        BodyEncoding::QueryString => EncodedBody {
            bytes: query_string(body)?.into_bytes(),
            content_type: None,
        },
        BodyEncoding::Multipart(charset) => multipart(flatten(body)?, charset)?,
    };
    Ok(Some(encoded))
}

/// Flatten `body` into an ordered list of named fields.
///
/// `null` fields are dropped, and a `null` body has no fields at all.
pub fn flatten<B: Serialize + ?Sized>(body: &B) -> Result<Vec<(String, FieldValue)>, EncodingError> {
    match serde_json::to_value(body)? {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(name, value)| field_value(value).map(|value| (name, value)))
            .collect()),
        _ => Err(EncodingError::NotAnObject),
    }
}

fn field_value(value: Value) -> Option<FieldValue> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(FieldValue::Scalar(text)),
        Value::Number(number) => Some(FieldValue::Scalar(number.to_string())),
        Value::Bool(flag) => Some(FieldValue::Scalar(flag.to_string())),
        compound => Some(FieldValue::Compound(compound)),
    }
}

/// Render `body` as `key=value&key=value`, without percent-encoding.
///
/// Used for POST/PUT bodies and for GET query strings alike.
pub fn query_string<B: Serialize + ?Sized>(body: &B) -> Result<String, EncodingError> {
    let segments: Vec<String> = flatten(body)?
        .iter()
        .map(|(name, value)| format!("{name}={}", value.to_text()))
        .collect();
    Ok(segments.join("&"))
}

/// Random boundary: 24 dashes followed by two 8-digit hex words.
pub fn new_boundary() -> String {
    let mut rng = rand::rng();
    format!(
        "------------------------{:08X}{:08X}",
        rng.random::<u32>(),
        rng.random::<u32>()
    )
}

fn multipart(
    fields: Vec<(String, FieldValue)>,
    charset: Charset,
) -> Result<EncodedBody, EncodingError> {
    multipart_with_boundary(fields, charset, &new_boundary())
}

fn multipart_with_boundary(
    fields: Vec<(String, FieldValue)>,
    charset: Charset,
    boundary: &str,
) -> Result<EncodedBody, EncodingError> {
    let params = fields
        .into_iter()
        .map(|(name, value)| match value {
            FieldValue::Scalar(text) => Ok((name, text)),
            FieldValue::Compound(_) => Err(EncodingError::UnrepresentableField(name)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut body = Vec::new();
    for (name, value) in &params {
        if !body.is_empty() {
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());

        let disposition = format!("Content-Disposition: form-data; name=\"{name}\"\r\n");
        let disposition = charset
            .encode(&disposition)
            .ok_or_else(|| EncodingError::Name(name.clone()))?;
        body.extend_from_slice(&disposition);
        body.extend_from_slice(b"\r\n");

        let value = charset
            .encode(value)
            .ok_or_else(|| EncodingError::Value(name.clone()))?;
        body.extend_from_slice(&value);
    }
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Ok(EncodedBody {
        bytes: body,
        content_type: Some(format!(
            "multipart/form-data; charset={}; boundary={boundary}",
            charset.iana_name()
        )),
    })
}

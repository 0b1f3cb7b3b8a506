//! Immutable description of one request.

use reqwest::Url;
use serde::Serialize;

use crate::encoder::BodyEncoding;
use crate::error::InvalidUrl;
use crate::http::{Headers, HttpMethod};
use crate::types::Null;

/// Everything `Client::execute` needs to issue one request.
///
/// Built with consuming builder methods and then handed to the client by
/// reference. A GET spec never carries a body: `with_body` on a GET leaves
/// it body-less.
#[derive(Debug, Clone)]
pub struct RequestSpec<B = Null> {
    url: Url,
    method: HttpMethod,
    headers: Headers,
    encoding: BodyEncoding,
    body: Option<B>,
}

impl RequestSpec<Null> {
    /// `None` if `url` is not a valid absolute URL.
    pub fn new(url: &str, method: HttpMethod) -> Option<Self> {
        match Self::try_new(url, method) {
            Ok(spec) => Some(spec),
            Err(e) => {
                tracing::debug!(error = %e, "rejected request URL");
                None
            }
        }
    }

    pub fn try_new(url: &str, method: HttpMethod) -> Result<Self, InvalidUrl> {
        let url = Url::parse(url).map_err(|e| InvalidUrl {
            input: url.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(InvalidUrl {
                input: url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        Ok(Self {
            url,
            method,
            headers: Headers::new(),
            encoding: BodyEncoding::None,
            body: None,
        })
    }
}

impl<B> RequestSpec<B> {
    /// Attach `body`, sent with `encoding`. Ignored for GET.
    pub fn with_body<C: Serialize>(self, body: C, encoding: BodyEncoding) -> RequestSpec<C> {
        let (encoding, body) = if self.method == HttpMethod::Get {
            tracing::debug!(url = %self.url, "dropping body attached to GET request");
            (BodyEncoding::None, None)
        } else {
            (encoding, Some(body))
        };
        RequestSpec {
            url: self.url,
            method: self.method,
            headers: self.headers,
            encoding,
            body,
        }
    }

    /// Set a header. A later value for the same name replaces the earlier one.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn encoding(&self) -> BodyEncoding {
        self.encoding
    }

    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }
}

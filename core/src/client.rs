//! Request executor for the dating API.
//!
//! # Design
//! `Client` holds an immutable `ClientConfig` and a shared `Transport`, and
//! nothing else, so clones are cheap and concurrent requests never touch
//! common mutable state. Each request runs through three steps that are
//! also public on their own:
//!
//! 1. `build_request` assembles headers and encodes the body. Encoding
//!    errors stop here, before anything reaches the network.
//! 2. The transport performs the round-trip.
//! 3. `parse_response` classifies the status and decodes the envelope. It
//!    cannot fail: whatever did not decode is simply absent, and the raw
//!    body is always kept.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::encoder;
use crate::envelope;
use crate::error::{EncodingError, TransportError};
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};
use crate::locator::{Fetchable, PayloadKind};
use crate::request::RequestSpec;
use crate::response::{Response, StatusCode};
use crate::routes::Route;
use crate::transport::{ReqwestTransport, Transport};

#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Client using a default `ReqwestTransport`.
    pub fn with_reqwest(config: ClientConfig) -> Self {
        Self::new(config, ReqwestTransport::new())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `RequestSpec` for `route` under the configured base URL, or `None` if the
    /// resulting URL is invalid. Exactly one `/` separates the two, however
    /// the base URL was written.
    pub fn route(&self, route: &Route, method: HttpMethod) -> Option<RequestSpec> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            route.path().trim_start_matches('/')
        );
        RequestSpec::new(&url, method)
    }

    /// Turn `spec` into wire form: configured headers first, then the request's
    /// own, then the body for anything that is not a GET.
    pub fn build_request<B: Serialize>(
        &self,
        spec: &RequestSpec<B>,
    ) -> Result<HttpRequest, EncodingError> {
        let mut headers: Headers = self.config.headers.iter().cloned().collect();
        headers.extend(spec.headers().iter());

        let mut body = None;
        if spec.method() != HttpMethod::Get {
            if let Some(value) = spec.body() {
                if let Some(encoded) = encoder::encode(value, spec.encoding())? {
                    if let Some(content_type) = encoded.content_type {
                        headers.set("Content-Type", content_type);
                    }
                    body = Some(encoded.bytes);
                }
            }
        }

        Ok(HttpRequest {
            method: spec.method(),
            url: spec.url().to_string(),
            headers,
            body,
        })
    }

    /// Classify and decode a delivered response. `kind` says where the
    /// payload lives in the envelope.
    pub fn parse_response<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
        kind: PayloadKind,
    ) -> Response<T> {
        let status_code = StatusCode::classify(response.status);
        let envelope = envelope::decode(&response.body, kind);
        tracing::debug!(
            status = response.status,
            content_type = response.headers.get("content-type").unwrap_or("-"),
            decoded = envelope.is_some(),
            "response received"
        );
        Response {
            status_code,
            raw_status: response.status,
            envelope,
            raw_bytes: response.body,
        }
    }

    /// Execute `spec`, locating the payload by `T`'s registered kind.
    pub async fn execute<B, T>(&self, spec: &RequestSpec<B>) -> Result<Response<T>, TransportError>
    where
        B: Serialize,
        T: Fetchable,
    {
        self.execute_as(spec, T::KIND).await
    }

    /// Execute `spec`, locating the payload by an explicit `kind`.
    pub async fn execute_as<B, T>(
        &self,
        spec: &RequestSpec<B>,
        kind: PayloadKind,
    ) -> Result<Response<T>, TransportError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self.build_request(spec).map_err(|e| {
            tracing::warn!(url = %spec.url(), error = %e, "request body failed to encode");
            TransportError::Encoding(e)
        })?;

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(url = %spec.url(), error = %e, "request failed");
            e
        })?;

        Ok(self.parse_response(response, kind))
    }

    /// Run `spec` as its own task on the current runtime and hand the outcome
    /// to `on_complete`, exactly once.
    pub fn dispatch<B, T, F>(&self, spec: RequestSpec<B>, on_complete: F) -> JoinHandle<()>
    where
        B: Serialize + Send + Sync + 'static,
        T: Fetchable + Send + 'static,
        F: FnOnce(Result<Response<T>, TransportError>) + Send + 'static,
    {
        self.dispatch_on(&Handle::current(), spec, on_complete)
    }

    /// Like `dispatch`, but the request and `on_complete` run on the runtime
    /// behind `handle`. Callers that need every completion in one place hand
    /// in the handle of a dedicated callback runtime.
    pub fn dispatch_on<B, T, F>(
        &self,
        handle: &Handle,
        spec: RequestSpec<B>,
        on_complete: F,
    ) -> JoinHandle<()>
    where
        B: Serialize + Send + Sync + 'static,
        T: Fetchable + Send + 'static,
        F: FnOnce(Result<Response<T>, TransportError>) + Send + 'static,
    {
        let client = self.clone();
        handle.spawn(async move {
            let result = client.execute::<B, T>(&spec).await;
            on_complete(result);
        })
    }
}

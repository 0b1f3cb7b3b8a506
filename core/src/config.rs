//! Client configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://iramml.com/test/dating/";
pub const DEFAULT_FCM_URL: &str = "https://fcm.googleapis.com/fcm/send";

/// Immutable settings shared by every request a `Client` issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for `Route` paths. `with_base_url` stores it with one trailing
    /// `/`; `Client::route` joins either way.
    pub base_url: String,

    /// Sent with every request, before the request's own headers.
    pub headers: Vec<(String, String)>,

    /// Push notification endpoint.
    pub fcm_url: String,

    /// Server key for the push endpoint. Without one, notifications are
    /// not sent.
    pub fcm_server_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: Vec::new(),
            fcm_url: DEFAULT_FCM_URL.to_string(),
            fcm_server_key: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `DATING_API_BASE_URL`, `DATING_FCM_URL` and
    /// `DATING_FCM_SERVER_KEY` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("DATING_API_BASE_URL") {
            config = config.with_base_url(&base_url);
        }
        if let Ok(fcm_url) = std::env::var("DATING_FCM_URL") {
            config.fcm_url = fcm_url;
        }
        if let Ok(key) = std::env::var("DATING_FCM_SERVER_KEY") {
            config.fcm_server_key = Some(key);
        }
        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = format!("{}/", base_url.trim_end_matches('/'));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_fcm_url(mut self, fcm_url: impl Into<String>) -> Self {
        self.fcm_url = fcm_url.into();
        self
    }

    pub fn with_fcm_server_key(mut self, key: impl Into<String>) -> Self {
        self.fcm_server_key = Some(key.into());
        self
    }
}

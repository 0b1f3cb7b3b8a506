//! Endpoint catalog for the dating API.

use serde::Serialize;

use crate::encoder;
use crate::error::EncodingError;

/// A server endpoint, relative to `ClientConfig::base_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn,
    SignUp,
    UpdateStatus,
    /// Carries the access token.
    FetchProfile(String),
    /// Carries the image file name.
    FetchImage(String),
    /// Carries the already flattened query string.
    FetchUsers(String),
}

impl Route {
    /// Meeting search with `params` flattened into the query string.
    pub fn fetch_users<P: Serialize + ?Sized>(params: &P) -> Result<Self, EncodingError> {
        Ok(Route::FetchUsers(encoder::query_string(params)?))
    }

    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "api/client/sign/in/index.php".to_string(),
            Route::SignUp => "api/client/sign/up/index.php".to_string(),
            Route::UpdateStatus => "api/client/status/connected/index.php".to_string(),
            Route::FetchProfile(token) => {
                format!("api/client/profile/get/index.php?token={token}")
            }
            Route::FetchImage(name) => format!("uploads/profile/images/{name}"),
            Route::FetchUsers(query) => format!("api/client/meeting/get/index.php?{query}"),
        }
    }
}

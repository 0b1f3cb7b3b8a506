//! Push notifications through the FCM legacy HTTP endpoint.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::encoder::BodyEncoding;
use crate::http::HttpMethod;
use crate::locator::Fetchable;
use crate::request::RequestSpec;
use crate::types::Null;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FcmNotification {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FcmMessage<D> {
    pub to: String,
    pub data: D,
    pub notification: FcmNotification,
}

/// FCM's reply. `success` counts the devices the message reached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FcmResponse {
    #[serde(default)]
    pub success: i64,
}

impl Fetchable for FcmResponse {}

/// Send a notification to `address_token`.
///
/// Returns `true` only if FCM answers 200 and reports at least one
/// successful delivery. Anything else yields `false`.
pub async fn send_notification(
    client: &Client,
    address_token: Option<&str>,
    title: &str,
    body: &str,
) -> bool {
    let Some(address_token) = address_token else {
        return false;
    };
    let Some(server_key) = client.config().fcm_server_key.as_deref() else {
        tracing::warn!("no FCM server key configured, notification not sent");
        return false;
    };
    let Some(spec) = RequestSpec::new(&client.config().fcm_url, HttpMethod::Post) else {
        tracing::warn!(url = %client.config().fcm_url, "invalid FCM URL");
        return false;
    };

    let message = FcmMessage {
        to: address_token.to_string(),
        data: Null {},
        notification: FcmNotification {
            title: title.to_string(),
            text: body.to_string(),
        },
    };
    let spec = spec
        .with_header("Authorization", format!("key={server_key}"))
        .with_header("Content-Type", "application/json")
        .with_body(message, BodyEncoding::Json);

    match client.execute::<_, FcmResponse>(&spec).await {
        Ok(response) => {
            response.status_code.is_ok()
                && response.payload().is_some_and(|reply| reply.success != 0)
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn message_wire_shape() {
        let message = FcmMessage {
            to: "device".to_string(),
            data: Null {},
            notification: FcmNotification {
                title: "Hi".to_string(),
                text: "New match".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({
                "to": "device",
                "data": {},
                "notification": {"title": "Hi", "text": "New match"}
            })
        );
    }

    #[tokio::test]
    async fn missing_token_short_circuits() {
        let client = Client::with_reqwest(ClientConfig::default().with_fcm_server_key("k"));
        assert!(!send_notification(&client, None, "t", "b").await);
    }

    #[tokio::test]
    async fn missing_server_key_short_circuits() {
        let client = Client::with_reqwest(ClientConfig::default());
        assert!(!send_notification(&client, Some("device"), "t", "b").await);
    }
}

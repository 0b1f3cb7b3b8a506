//! `ReqwestTransport` and `Client` against stub HTTP servers.

use dating_core::{
    send_notification, BodyEncoding, Charset, Client, ClientConfig, HttpMethod, PayloadKind,
    RequestSpec, Response, StatusCode, TransportError, User,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::with_reqwest(
        ClientConfig::default()
            .with_base_url(&server.uri())
            .with_header("Accept", "application/json"),
    )
}

#[tokio::test]
async fn non_200_statuses_classify_as_bad_request() {
    let cases: [(u16, &str); 3] = [(201, "/created"), (404, "/missing"), (500, "/boom")];
    let server = MockServer::start().await;
    for (status, route) in cases {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
            .mount(&server)
            .await;
    }
    let client = client_for(&server);

    for (status, route) in cases {
        let spec = RequestSpec::new(&format!("{}{route}", server.uri()), HttpMethod::Get).unwrap();
        let response: Response<Value> = client.execute(&spec).await.unwrap();
        assert_eq!(response.status_code, StatusCode::BadRequest, "{route}");
        assert_eq!(response.raw_status, status, "{route}");
    }
}

#[tokio::test]
async fn envelope_with_bad_http_status_still_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"code":"400","message":"bad","users":[{"id":1}]}"#),
        )
        .mount(&server)
        .await;

    let spec = RequestSpec::new(&format!("{}/users", server.uri()), HttpMethod::Get).unwrap();
    let response: Response<Vec<User>> = client_for(&server).execute(&spec).await.unwrap();

    assert_eq!(response.status_code, StatusCode::BadRequest);
    assert_eq!(response.status().unwrap().code_number(), Some(400));
    assert_eq!(response.status().unwrap().message.as_deref(), Some("bad"));
    assert_eq!(response.payload().unwrap()[0].id, 1);
}

#[tokio::test]
async fn raw_bytes_survive_failed_decoding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"chats":"oops","extra":[1,2]}"#))
        .mount(&server)
        .await;

    let spec = RequestSpec::new(&format!("{}/chats", server.uri()), HttpMethod::Get).unwrap();
    let response: Response<Vec<dating_core::Chat>> =
        client_for(&server).execute(&spec).await.unwrap();

    assert_eq!(response.status_code, StatusCode::Ok);
    assert!(response.status().is_none());
    assert!(response.payload().is_none());
    assert_eq!(response.json().unwrap()["extra"], json!([1, 2]));
}

#[tokio::test]
async fn root_payload_decodes_top_level_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":4},{"id":5}]"#))
        .mount(&server)
        .await;

    let spec = RequestSpec::new(&format!("{}/feed", server.uri()), HttpMethod::Get).unwrap();
    let response = client_for(&server)
        .execute_as::<_, Vec<dating_core::WallPost>>(&spec, PayloadKind::Root)
        .await
        .unwrap();

    let ids: Vec<i64> = response.payload().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![4, 5]);
}

#[tokio::test]
async fn headers_and_query_string_body_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/form"))
        .and(header("Accept", "application/json"))
        .and(header("X-Client", "ios"))
        .and(body_string("name=a b&note=x=y"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":"200","message":"OK"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::new(&format!("{}/form", server.uri()), HttpMethod::Post)
        .unwrap()
        .with_header("X-Client", "android")
        .with_header("X-Client", "ios")
        .with_body(json!({"name": "a b", "note": "x=y"}), BodyEncoding::QueryString);
    let response: Response<Value> = client_for(&server).execute(&spec).await.unwrap();

    assert_eq!(response.status_code, StatusCode::Ok);
}

#[tokio::test]
async fn multipart_body_matches_its_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let spec = RequestSpec::new(&format!("{}/upload", server.uri()), HttpMethod::Put)
        .unwrap()
        .with_body(json!({"name": "alice", "age": "30"}), BodyEncoding::Multipart(Charset::Utf8));
    let _: Response<Value> = client_for(&server).execute(&spec).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let content_type = requests[0].headers["content-type"].to_str().unwrap().to_string();
    let boundary = content_type.rsplit("boundary=").next().unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();

    assert!(body.starts_with(&format!("--{boundary}\r\n")));
    assert!(body.ends_with(&format!("\r\n--{boundary}--\r\n")));
    assert!(body.contains("Content-Disposition: form-data; name=\"name\"\r\n\r\nalice"));
    assert!(body.contains("Content-Disposition: form-data; name=\"age\"\r\n\r\n30"));
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = Client::with_reqwest(ClientConfig::default());
    let spec = RequestSpec::new(&format!("http://127.0.0.1:{port}/"), HttpMethod::Get).unwrap();

    let err = client.execute::<_, Value>(&spec).await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn notification_is_posted_with_explicit_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fcm/send"))
        .and(header("Authorization", "key=server-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "to": "device-token",
            "data": {},
            "notification": {"title": "New match", "text": "Say hi"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":1,"failure":0}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_reqwest(
        ClientConfig::default()
            .with_fcm_url(format!("{}/fcm/send", server.uri()))
            .with_fcm_server_key("server-key"),
    );

    assert!(send_notification(&client, Some("device-token"), "New match", "Say hi").await);
}

#[tokio::test]
async fn notification_with_zero_successes_reports_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fcm/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":0,"failure":1}"#))
        .mount(&server)
        .await;

    let client = Client::with_reqwest(
        ClientConfig::default()
            .with_fcm_url(format!("{}/fcm/send", server.uri()))
            .with_fcm_server_key("server-key"),
    );

    assert!(!send_notification(&client, Some("device-token"), "t", "b").await);
}

#[tokio::test]
async fn malformed_header_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let spec = RequestSpec::new(&format!("{}/x", server.uri()), HttpMethod::Get)
        .unwrap()
        .with_header("X-Note", "line one\nline two");
    let err = client_for(&server)
        .execute::<_, Value>(&spec)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::InvalidRequest(_)));
}

#[tokio::test]
async fn notification_rejected_by_status_reports_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fcm/send"))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"success":1,"failure":0}"#))
        .mount(&server)
        .await;

    let client = Client::with_reqwest(
        ClientConfig::default()
            .with_fcm_url(format!("{}/fcm/send", server.uri()))
            .with_fcm_server_key("server-key"),
    );

    assert!(!send_notification(&client, Some("device-token"), "t", "b").await);
}

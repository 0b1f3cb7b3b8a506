//! Full member lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every route through
//! `Client` over real HTTP with `ReqwestTransport`. Each body encoding is
//! exercised by the route the server expects it on: multipart for sign-up,
//! query-string form for sign-in, JSON for status updates.

use dating_core::{
    AccessToken, BodyEncoding, Charset, Client, ClientConfig, FetchUsersParams, HttpMethod, Null,
    PayloadKind, Profile, Response, Route, SignIn, SignUp, StatusCode, UpdateStatus, User,
};

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[tokio::test]
async fn member_lifecycle() {
    // Step 1: start mock server on a random port.
    let addr = start_mock_server();
    let client = Client::with_reqwest(ClientConfig::default().with_base_url(&format!("http://{addr}")));

    // Step 2: sign up with a multipart form.
    let sign_up = SignUp {
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        password: "pw".to_string(),
        age: Some(29),
    };
    let spec = client
        .route(&Route::SignUp, HttpMethod::Post)
        .unwrap()
        .with_body(sign_up, BodyEncoding::Multipart(Charset::Utf8));
    let response: Response<AccessToken> = client.execute(&spec).await.unwrap();
    assert_eq!(response.status_code, StatusCode::Ok);
    assert_eq!(response.status().unwrap().message.as_deref(), Some("Signed up"));
    let AccessToken(token) = response.into_payload().unwrap();

    // Step 3: fetch the profile with the new token.
    let spec = client
        .route(&Route::FetchProfile(token.clone()), HttpMethod::Get)
        .unwrap();
    let response = client
        .execute_as::<_, Profile>(&spec, PayloadKind::Profile)
        .await
        .unwrap();
    assert_eq!(response.status_code, StatusCode::Ok);
    let profile = response.into_payload().unwrap();
    assert_eq!(profile.name, "Dana");
    assert_eq!(profile.email, "dana@example.com");
    assert_eq!(profile.age, Some(29));

    // Step 4: go online with a JSON body; content type is the caller's job.
    let spec = client
        .route(&Route::UpdateStatus, HttpMethod::Put)
        .unwrap()
        .with_header("Content-Type", "application/json")
        .with_body(
            UpdateStatus {
                token: token.clone(),
                connected: true,
            },
            BodyEncoding::Json,
        );
    let response: Response<Null> = client.execute(&spec).await.unwrap();
    assert_eq!(response.status_code, StatusCode::Ok);
    assert_eq!(response.status().unwrap().status_code(), StatusCode::Ok);
    assert!(response.payload().is_none());

    // Step 5: meeting search with the params in the query string.
    let route = Route::fetch_users(&FetchUsersParams {
        token: token.clone(),
        latitude: 32.1,
        longitude: 34.8,
        radius: Some(10),
    })
    .unwrap();
    let spec = client.route(&route, HttpMethod::Get).unwrap();
    let response: Response<Vec<User>> = client.execute(&spec).await.unwrap();
    let users = response.payload().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.id != profile.id));

    // Step 6: sign in with a flattened form body.
    let spec = client
        .route(&Route::SignIn, HttpMethod::Post)
        .unwrap()
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .with_body(
            SignIn {
                email: "dana@example.com".to_string(),
                password: "pw".to_string(),
            },
            BodyEncoding::QueryString,
        );
    let response: Response<AccessToken> = client.execute(&spec).await.unwrap();
    assert_eq!(response.status_code, StatusCode::Ok);
    assert!(response.payload().is_some());

    // Step 7: a wrong password is a delivered response, not an error.
    let spec = client
        .route(&Route::SignIn, HttpMethod::Post)
        .unwrap()
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .with_body(
            SignIn {
                email: "dana@example.com".to_string(),
                password: "wrong".to_string(),
            },
            BodyEncoding::QueryString,
        );
    let response: Response<AccessToken> = client.execute(&spec).await.unwrap();
    assert_eq!(response.status_code, StatusCode::BadRequest);
    assert_eq!(response.raw_status, 400);
    assert_eq!(response.status().unwrap().code_number(), Some(400));
    assert!(response.payload().is_none());

    // Step 8: images come back as raw bytes with no envelope.
    let spec = client
        .route(&Route::FetchImage("1.jpg".to_string()), HttpMethod::Get)
        .unwrap();
    let response: Response<Null> = client.execute(&spec).await.unwrap();
    assert_eq!(response.status_code, StatusCode::Ok);
    assert!(response.envelope.is_none());
    assert_eq!(&response.raw_bytes[..], mock_server::IMAGE_BYTES);

    // Step 9: a missing image is a 404 with its plain-text body kept.
    let spec = client
        .route(&Route::FetchImage("missing.png".to_string()), HttpMethod::Get)
        .unwrap();
    let response: Response<Null> = client.execute(&spec).await.unwrap();
    assert_eq!(response.status_code, StatusCode::BadRequest);
    assert_eq!(&response.raw_bytes[..], b"not found");
    assert!(response.json().is_none());
}

#[tokio::test]
async fn stale_token_keeps_status_without_payload() {
    let addr = start_mock_server();
    let client = Client::with_reqwest(ClientConfig::default().with_base_url(&format!("http://{addr}")));

    let spec = client
        .route(
            &Route::FetchProfile("00000000-0000-0000-0000-000000000000".to_string()),
            HttpMethod::Get,
        )
        .unwrap();
    let response: Response<Profile> = client.execute(&spec).await.unwrap();

    assert_eq!(response.status_code, StatusCode::BadRequest);
    let status = response.status().unwrap();
    assert_eq!(status.code.as_deref(), Some("400"));
    assert_eq!(status.message.as_deref(), Some("Invalid token"));
    assert!(response.payload().is_none());
}

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Bytes served for every `.jpg` under `/uploads/profile/images/`.
pub const IMAGE_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0xFF, 0xD9];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub age: Option<u32>,
    pub image: Option<String>,
    pub connected: bool,
}

#[derive(Debug, Default)]
pub struct Db {
    pub members: Vec<Member>,
    pub tokens: HashMap<Uuid, i64>,
}

impl Db {
    fn member_for(&self, token: &str) -> Option<&Member> {
        let token = Uuid::parse_str(token).ok()?;
        let id = self.tokens.get(&token)?;
        self.members.iter().find(|m| m.id == *id)
    }

    fn issue_token(&mut self, id: i64) -> Uuid {
        let token = Uuid::new_v4();
        self.tokens.insert(token, id);
        token
    }
}

pub type SharedDb = Arc<RwLock<Db>>;

#[derive(Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub token: String,
    pub connected: bool,
}

#[derive(Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

#[derive(Deserialize)]
pub struct MeetingQuery {
    pub token: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: Option<u32>,
}

/// Router with two members already registered.
pub fn app() -> Router {
    let db = Db {
        members: vec![
            seed_member(1, "Noa", 27),
            seed_member(2, "Yael", 31),
        ],
        tokens: HashMap::new(),
    };
    Router::new()
        .route("/api/client/sign/up/index.php", post(sign_up))
        .route("/api/client/sign/in/index.php", post(sign_in))
        .route("/api/client/status/connected/index.php", put(update_status))
        .route("/api/client/profile/get/index.php", get(fetch_profile))
        .route("/api/client/meeting/get/index.php", get(fetch_users))
        .route("/uploads/profile/images/{name}", get(fetch_image))
        .with_state(Arc::new(RwLock::new(db)))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn seed_member(id: i64, name: &str, age: u32) -> Member {
    Member {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password: "secret".to_string(),
        age: Some(age),
        image: Some(format!("{id}.jpg")),
        connected: false,
    }
}

/// Envelope with only the status fields.
pub fn status(code: StatusCode, message: &str) -> Value {
    json!({ "code": code.as_u16().to_string(), "message": message })
}

fn reply(code: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (code, Json(status(code, message)))
}

fn reply_with(message: &str, key: &str, payload: Value) -> (StatusCode, Json<Value>) {
    let mut body = status(StatusCode::OK, message);
    body[key] = payload;
    (StatusCode::OK, Json(body))
}

async fn sign_up(State(db): State<SharedDb>, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    let mut fields = HashMap::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                match field.text().await {
                    Ok(text) => {
                        fields.insert(name, text);
                    }
                    Err(_) => return reply(StatusCode::BAD_REQUEST, "Malformed form"),
                }
            }
            Ok(None) => break,
            Err(_) => return reply(StatusCode::BAD_REQUEST, "Malformed form"),
        }
    }

    let (Some(name), Some(email), Some(password)) =
        (fields.remove("name"), fields.remove("email"), fields.remove("password"))
    else {
        return reply(StatusCode::BAD_REQUEST, "Missing fields");
    };

    let mut db = db.write().await;
    if db.members.iter().any(|m| m.email == email) {
        return reply(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let id = db.members.iter().map(|m| m.id).max().unwrap_or(0) + 1;
    db.members.push(Member {
        id,
        name,
        email,
        password,
        age: fields.get("age").and_then(|age| age.parse().ok()),
        image: None,
        connected: false,
    });
    let token = db.issue_token(id);
    tracing::info!(id, "member signed up");
    reply_with("Signed up", "access_token", json!(token))
}

async fn sign_in(State(db): State<SharedDb>, Form(input): Form<SignInForm>) -> (StatusCode, Json<Value>) {
    let mut db = db.write().await;
    let Some(id) = db
        .members
        .iter()
        .find(|m| m.email == input.email && m.password == input.password)
        .map(|m| m.id)
    else {
        return reply(StatusCode::BAD_REQUEST, "Wrong email or password");
    };
    let token = db.issue_token(id);
    tracing::info!(id, "member signed in");
    reply_with("Signed in", "access_token", json!(token))
}

async fn update_status(State(db): State<SharedDb>, Json(input): Json<StatusBody>) -> (StatusCode, Json<Value>) {
    let mut db = db.write().await;
    let Some(id) = db.member_for(&input.token).map(|m| m.id) else {
        return reply(StatusCode::BAD_REQUEST, "Invalid token");
    };
    if let Some(member) = db.members.iter_mut().find(|m| m.id == id) {
        member.connected = input.connected;
    }
    reply(StatusCode::OK, "Status updated")
}

async fn fetch_profile(State(db): State<SharedDb>, Query(query): Query<TokenQuery>) -> (StatusCode, Json<Value>) {
    let db = db.read().await;
    match db.member_for(&query.token) {
        Some(member) => reply_with(
            "OK",
            "profile",
            json!({
                "id": member.id,
                "name": member.name,
                "email": member.email,
                "age": member.age,
                "images": member.image.iter().collect::<Vec<_>>(),
            }),
        ),
        None => reply(StatusCode::BAD_REQUEST, "Invalid token"),
    }
}

async fn fetch_users(State(db): State<SharedDb>, Query(query): Query<MeetingQuery>) -> (StatusCode, Json<Value>) {
    let db = db.read().await;
    let Some(me) = db.member_for(&query.token).map(|m| m.id) else {
        return reply(StatusCode::BAD_REQUEST, "Invalid token");
    };
    tracing::info!(
        latitude = query.latitude,
        longitude = query.longitude,
        radius = query.radius,
        "meeting search"
    );
    let users: Vec<Value> = db
        .members
        .iter()
        .filter(|m| m.id != me)
        .map(|m| {
            json!({
                "id": m.id,
                "name": m.name,
                "age": m.age,
                "image": m.image,
                "connected": m.connected,
            })
        })
        .collect();
    reply_with("OK", "users", Value::Array(users))
}

async fn fetch_image(Path(name): Path<String>) -> impl IntoResponse {
    if name.ends_with(".jpg") {
        (StatusCode::OK, [(header::CONTENT_TYPE, "image/jpeg")], IMAGE_BYTES.to_vec())
    } else {
        (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            b"not found".to_vec(),
        )
    }
}

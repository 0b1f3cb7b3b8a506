//! Domain DTOs for the dating API.
//!
//! # Design
//! Response types are lenient: apart from `id`, every field defaults when the
//! server leaves it out, so one missing column does not erase a whole list
//! through the envelope decoder. Request types serialize in declaration
//! order, which is the order the flattened encodings emit their fields in.

use serde::{Deserialize, Serialize};

use crate::locator::{Fetchable, PayloadKind};

/// Another member, as returned by the meeting search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub connected: bool,
}

/// The signed-in member's own profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chat {
    pub id: i64,
    #[serde(default)]
    pub participants: Vec<i64>,
    #[serde(default)]
    pub last_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: i64,
    #[serde(default)]
    pub chat_id: i64,
    #[serde(default)]
    pub sender_id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sent_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WallPost {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Session token handed out by sign-in and sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccessToken(pub String);

/// Placeholder for "no object": an empty request body, or a response whose
/// payload is never read.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Null {}

impl Fetchable for Vec<User> {
    const KIND: PayloadKind = PayloadKind::Users;
}

impl Fetchable for Vec<Chat> {
    const KIND: PayloadKind = PayloadKind::Chats;
}

impl Fetchable for Vec<Message> {
    const KIND: PayloadKind = PayloadKind::Messages;
}

impl Fetchable for Vec<WallPost> {
    const KIND: PayloadKind = PayloadKind::Posts;
}

impl Fetchable for Profile {
    const KIND: PayloadKind = PayloadKind::Profile;
}

impl Fetchable for AccessToken {
    const KIND: PayloadKind = PayloadKind::AccessToken;
}

impl Fetchable for Null {
    const KIND: PayloadKind = PayloadKind::Nothing;
}

// Request bodies.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub token: String,
    pub connected: bool,
}

/// Query parameters for the meeting search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchUsersParams {
    pub token: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
}

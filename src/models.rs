use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::validation::FieldError;

// --- Stored Records (Mapped to Database) ---

/// UserRecord
///
/// A row of the `users` table. Carries the password hash, so it is never
/// serialized; responses use `User`.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// AdminRecord
///
/// A row of the `admins` table. Same disclosure rule as `UserRecord`.
#[derive(Debug, Clone, FromRow)]
pub struct AdminRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Recipe
///
/// A row of the `recipes` table. `ingredients` and `instructions` are stored as
/// TEXT[] and keep the order they were submitted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

// --- Public Projections (Output Schemas) ---

/// User
///
/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

/// Admin
///
/// Public view of an administrator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<AdminRecord> for Admin {
    fn from(record: AdminRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

/// Role
///
/// Which account table a token subject belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    User,
    Admin,
}

// --- Request Payloads (Input Schemas) ---
//
// Every field is optional at the deserialization layer so that a missing field is
// reported by `Validate` with a readable message.

/// RegisterUserRequest
///
/// Body of `POST /adduser`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterUserRequest {
    #[schema(example = "ana")]
    pub username: Option<String>,
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// LoginRequest
///
/// Body of `POST /login` and `POST /admin/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns the normalized email and the password, or `None` when either is
    /// missing or blank.
    pub fn credentials(self) -> Option<(String, String)> {
        let email = self.email.map(|e| crate::validation::normalize_email(&e))?;
        let password = self.password?;
        (!email.is_empty() && !password.is_empty()).then_some((email, password))
    }
}

/// CreateRecipeRequest
///
/// Body of `POST /addrecipes`. The frontend also sends an `author` field, which
/// is accepted and discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    /// Data URL or link. An empty string is stored as absent.
    pub image: Option<String>,
}

/// RegisterAdminRequest
///
/// Body of `POST /admin/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterAdminRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// --- Validated Inputs ---

/// A user registration that passed validation. The password is still plaintext
/// and is hashed by the handler before it reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image: Option<String>,
}

// --- Response Envelopes ---

/// UserListResponse
///
/// Envelope of `GET /user`. `status` is the string "200", as the frontend expects.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserListResponse {
    pub status: String,
    pub data: Vec<User>,
}

/// RecipeListResponse
///
/// Envelope of `GET /getrecipe`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RecipeListResponse {
    pub status: String,
    pub data: Vec<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// CreatedResponse
///
/// Returned with 201 by every insert endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreatedResponse {
    pub message: String,
    pub id: Uuid,
}

/// LoginResponse
///
/// Successful login. `token` is a signed JWT valid for `expires_in` seconds.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub token_type: String,
    #[ts(type = "number")]
    pub expires_in: u64,
}

/// Identity
///
/// Output of `GET /me`. `name` is the username for users and the display name
/// for admins.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Identity {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub role: Role,
    pub name: String,
    pub email: String,
}

/// ErrorResponse
///
/// Body of every failed request. `errors` is only present for validation failures.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub errors: Option<Vec<FieldError>>,
}

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use super::{hash_password, parse_id, verify_password};
use crate::{
    AppState,
    auth::issue_token,
    error::AppError,
    models::{
        CreatedResponse, ErrorResponse, LoginRequest, LoginResponse, MessageResponse,
        RegisterUserRequest, Role, User, UserListResponse, UserRecord,
    },
    repository::RepositoryError,
    validation::ValidatedJson,
};

const INVALID_LOGIN: &str = "Invalid email or password";

/// list_users
///
/// Returns every registered user. Password hashes are not part of `User`.
#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = UserListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, AppError> {
    let users = state.repo.list_users().await?;
    Ok(Json(UserListResponse {
        status: "200".to_string(),
        data: users.into_iter().map(User::from).collect(),
    }))
}

/// register_user
///
/// Validates the payload, hashes the password and inserts. A taken email is
/// detected by the store's unique constraint, not by a lookup beforehand.
#[utoipa::path(
    post,
    path = "/adduser",
    tag = "users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = CreatedResponse),
        (status = 400, description = "Validation failure or email taken", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(new_user): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let password_hash = hash_password(new_user.password).await?;

    let record = UserRecord {
        id: Uuid::new_v4(),
        username: new_user.username,
        email: new_user.email,
        password_hash,
        created_at: Utc::now(),
    };

    let created = match state.repo.create_user(record).await {
        Ok(user) => user,
        Err(RepositoryError::Conflict) => return Err(AppError::Conflict("User already exists")),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %created.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "User registered successfully".to_string(),
            id: created.id,
        }),
    ))
}

/// login_user
///
/// Checks the password hash and issues a signed token. Unknown email and wrong
/// password produce the same response.
#[utoipa::path(
    post,
    path = "/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn login_user(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let (email, password) = payload
        .ok()
        .and_then(|Json(req)| req.credentials())
        .ok_or(AppError::InvalidCredentials("Email and password are required"))?;

    let user = state
        .repo
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials(INVALID_LOGIN))?;

    if !verify_password(password, user.password_hash).await? {
        tracing::debug!(user_id = %user.id, "password mismatch");
        return Err(AppError::InvalidCredentials(INVALID_LOGIN));
    }

    let token = issue_token(&state.config, user.id, Role::User)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.token_ttl.as_secs(),
    }))
}

/// delete_user
///
/// Removes a user by id. Recipes are not touched.
#[utoipa::path(
    delete,
    path = "/deleteuser/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "User not found")?;

    if !state.repo.delete_user(id).await? {
        return Err(AppError::NotFound("User not found"));
    }

    tracing::info!(user_id = %id, "user deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

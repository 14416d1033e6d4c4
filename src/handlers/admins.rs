use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use super::{hash_password, verify_password};
use crate::{
    AppState,
    auth::issue_token,
    error::AppError,
    models::{
        Admin, AdminRecord, CreatedResponse, ErrorResponse, LoginRequest, LoginResponse,
        RegisterAdminRequest, Role,
    },
    repository::RepositoryError,
    validation::ValidatedJson,
};

const INVALID_LOGIN: &str = "Invalid credentials!";

/// list_admins
///
/// Unlike the user list, this responds with a bare array.
#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    responses(
        (status = 200, description = "All admins", body = [Admin]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_admins(State(state): State<AppState>) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = state.repo.list_admins().await?;
    Ok(Json(admins.into_iter().map(Admin::from).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/register",
    tag = "admin",
    request_body = RegisterAdminRequest,
    responses(
        (status = 201, description = "Admin registered", body = CreatedResponse),
        (status = 400, description = "Validation failure or email taken", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn register_admin(
    State(state): State<AppState>,
    ValidatedJson(new_admin): ValidatedJson<RegisterAdminRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let password_hash = hash_password(new_admin.password).await?;

    let record = AdminRecord {
        id: Uuid::new_v4(),
        name: new_admin.name,
        email: new_admin.email,
        password_hash,
        created_at: Utc::now(),
    };

    let created = match state.repo.create_admin(record).await {
        Ok(admin) => admin,
        Err(RepositoryError::Conflict) => return Err(AppError::Conflict("Email already exists!")),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(admin_id = %created.id, "admin registered");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Registration successful!".to_string(),
            id: created.id,
        }),
    ))
}

/// login_admin
///
/// Every failure, including a missing field, is a 401 with one message.
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn login_admin(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let (email, password) = payload
        .ok()
        .and_then(|Json(req)| req.credentials())
        .ok_or(AppError::Unauthorized(INVALID_LOGIN))?;

    let admin = state
        .repo
        .find_admin_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized(INVALID_LOGIN))?;

    if !verify_password(password, admin.password_hash).await? {
        return Err(AppError::Unauthorized(INVALID_LOGIN));
    }

    let token = issue_token(&state.config, admin.id, Role::Admin)?;
    tracing::info!(admin_id = %admin.id, "admin logged in");

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.token_ttl.as_secs(),
    }))
}

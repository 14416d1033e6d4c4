use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::AppError,
    models::Role,
    repository::RepositoryState,
};

/// Claims
///
/// Payload of the HS256 token issued on a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the id of the user or admin account.
    pub sub: Uuid,
    /// Which table `sub` refers to.
    pub role: Role,
    /// Expiration Time (exp), seconds since the epoch.
    pub exp: usize,
    /// Issued At (iat), seconds since the epoch.
    pub iat: usize,
}

/// Signs a token for `id` that expires after the configured TTL. An expiry
/// that does not fit the claim type is an internal error.
pub fn issue_token(config: &AppConfig, id: Uuid, role: Role) -> Result<String, AppError> {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
    let (iat, exp) = now
        .checked_add(config.token_ttl.as_secs())
        .and_then(|exp| Some((usize::try_from(now).ok()?, usize::try_from(exp).ok()?)))
        .ok_or_else(|| AppError::Internal("token expiry overflows the exp claim".into()))?;

    let claims = Claims {
        sub: id,
        role,
        iat,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Verifies signature and expiry and returns the claims.
pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired"),
        _ => AppError::Unauthorized("Invalid token"),
    })
}

/// AuthUser
///
/// The resolved identity behind a bearer token. The account is re-read from the
/// repository, so a token for a deleted account is rejected.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
    pub name: String,
    pub email: String,
}

/// Rejects with 401 when the header is missing or malformed, the token does not
/// verify, or the account no longer exists.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized("Missing bearer token"))?;

        let claims = verify_token(&config, token.trim())?;

        let resolved = match claims.role {
            Role::User => repo
                .find_user_by_id(claims.sub)
                .await?
                .map(|user| (user.username, user.email)),
            Role::Admin => repo
                .find_admin_by_id(claims.sub)
                .await?
                .map(|admin| (admin.name, admin.email)),
        };

        let (name, email) = resolved.ok_or(AppError::Unauthorized("Account no longer exists"))?;

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
            name,
            email,
        })
    }
}

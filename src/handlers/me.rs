use axum::Json;

use crate::{
    auth::AuthUser,
    models::{ErrorResponse, Identity},
};

/// get_me
///
/// Echoes the identity resolved by the `AuthUser` extractor.
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    responses(
        (status = 200, description = "Caller identity", body = Identity),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_me(user: AuthUser) -> Json<Identity> {
    Json(Identity {
        id: user.id,
        role: user.role,
        name: user.name,
        email: user.email,
    })
}

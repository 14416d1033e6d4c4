use crate::{AppState, handlers::users};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// User Router
///
/// The paths are fixed by the existing frontend and are not REST-shaped.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        // GET /user
        // Full listing, wrapped in `{status, data}`. No password hashes.
        .route("/user", get(users::list_users))
        // POST /adduser
        .route("/adduser", post(users::register_user))
        // POST /login
        // Returns a signed bearer token on success.
        .route("/login", post(users::login_user))
        // DELETE /deleteuser/{id}
        .route("/deleteuser/{id}", delete(users::delete_user))
}

use crate::{AppState, handlers::admins};
use axum::{
    Router,
    routing::{get, post},
};

/// Admin Router
///
/// The admin account lives in its own table and its login failures answer 401
/// rather than 400.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin
        // Bare array of admins, no envelope.
        .route("/admin", get(admins::list_admins))
        // POST /admin/register
        .route("/admin/register", post(admins::register_admin))
        // POST /admin/login
        .route("/admin/login", post(admins::login_admin))
}

use crate::{AppState, handlers::me};
use axum::{Router, routing::get};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe. Does not touch the store.
        .route("/health", get(|| async { "ok" }))
        // GET /me
        // Resolves the bearer token issued by either login endpoint.
        .route("/me", get(me::get_me))
}

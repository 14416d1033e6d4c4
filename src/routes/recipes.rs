use crate::{AppState, handlers::recipes};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

/// Request body cap for `/addrecipes`. Images arrive inline as data URLs.
pub const RECIPE_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        // GET /getrecipe
        .route("/getrecipe", get(recipes::list_recipes))
        // POST /addrecipes
        // Title, ingredients and instructions are required. `author` is ignored.
        .route(
            "/addrecipes",
            post(recipes::create_recipe).layer(DefaultBodyLimit::max(RECIPE_BODY_LIMIT)),
        )
        // DELETE /deleterecipe/{id}
        .route("/deleterecipe/{id}", delete(recipes::delete_recipe))
}

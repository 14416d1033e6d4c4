use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use super::parse_id;
use crate::{
    AppState,
    error::AppError,
    models::{
        CreateRecipeRequest, CreatedResponse, ErrorResponse, MessageResponse, Recipe,
        RecipeListResponse,
    },
    validation::ValidatedJson,
};

#[utoipa::path(
    get,
    path = "/getrecipe",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes", body = RecipeListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<RecipeListResponse>, AppError> {
    let recipes = state.repo.list_recipes().await?;
    Ok(Json(RecipeListResponse {
        status: "200".to_string(),
        data: recipes,
    }))
}

/// create_recipe
///
/// Stores a recipe. Title, ingredients and instructions are required; no author
/// is recorded.
#[utoipa::path(
    post,
    path = "/addrecipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe added", body = CreatedResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    ValidatedJson(new_recipe): ValidatedJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let recipe = Recipe {
        id: Uuid::new_v4(),
        title: new_recipe.title,
        ingredients: new_recipe.ingredients,
        instructions: new_recipe.instructions,
        image: new_recipe.image,
        created_at: Utc::now(),
    };

    let created = state.repo.create_recipe(recipe).await?;
    tracing::info!(recipe_id = %created.id, "recipe added");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Recipe added successfully".to_string(),
            id: created.id,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/deleterecipe/{id}",
    tag = "recipes",
    params(("id" = String, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "Recipe not found")?;

    if !state.repo.delete_recipe(id).await? {
        return Err(AppError::NotFound("Recipe not found"));
    }

    Ok(Json(MessageResponse::new("Recipe deleted successfully")))
}

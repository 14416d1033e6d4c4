use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod validation;

pub mod routes;
use routes::{admin, recipes, session, users};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::AppError;
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for every route, served at `/api-docs/openapi.json` and
/// browsable at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::users::list_users, handlers::users::register_user,
        handlers::users::login_user, handlers::users::delete_user,
        handlers::recipes::list_recipes, handlers::recipes::create_recipe,
        handlers::recipes::delete_recipe,
        handlers::admins::list_admins, handlers::admins::register_admin,
        handlers::admins::login_admin,
        handlers::me::get_me,
    ),
    components(
        schemas(
            models::User, models::Admin, models::Recipe, models::Role,
            models::RegisterUserRequest, models::LoginRequest, models::CreateRecipeRequest,
            models::RegisterAdminRequest, models::UserListResponse, models::RecipeListResponse,
            models::MessageResponse, models::CreatedResponse, models::LoginResponse,
            models::Identity, models::ErrorResponse, validation::FieldError,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "User accounts"),
        (name = "recipes", description = "Recipe submissions"),
        (name = "admin", description = "Administrator accounts"),
        (name = "auth", description = "Token introspection")
    )
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// AppState
///
/// Everything a handler may touch: the store handle and the immutable
/// configuration. Cloned per request; both fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryState,
    pub config: AppConfig,
}

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Merges the resource routers, mounts the documentation, and wraps everything
/// in request-id, tracing and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(users::user_routes())
        .merge(recipes::recipe_routes())
        .merge(admin::admin_routes())
        .merge(session::session_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// Builds the per-request span so every log line carries the request id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}

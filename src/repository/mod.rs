use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AdminRecord, Recipe, UserRecord};

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;

/// RepositoryError
///
/// `Conflict` is raised only from a unique-constraint violation on insert; the
/// handler decides which message the client sees.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unique constraint violated")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository
///
/// Persistence contract for the three collections. Handlers only ever see
/// `Arc<dyn Repository>`, so the Postgres store and the in-memory store are
/// interchangeable.
///
/// Lists return records ordered by creation time, oldest first.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepositoryError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;
    /// Fails with `Conflict` if the email is taken.
    async fn create_user(&self, user: UserRecord) -> Result<UserRecord, RepositoryError>;
    /// Returns false when no row matched.
    async fn delete_user(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Recipes ---
    async fn list_recipes(&self) -> Result<Vec<Recipe>, RepositoryError>;
    async fn create_recipe(&self, recipe: Recipe) -> Result<Recipe, RepositoryError>;
    async fn delete_recipe(&self, id: Uuid) -> Result<bool, RepositoryError>;

    // --- Admins ---
    async fn list_admins(&self) -> Result<Vec<AdminRecord>, RepositoryError>;
    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<AdminRecord>, RepositoryError>;
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, RepositoryError>;
    /// Fails with `Conflict` if the email is taken.
    async fn create_admin(&self, admin: AdminRecord) -> Result<AdminRecord, RepositoryError>;
}

/// RepositoryState
///
/// The shared handle stored in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Repository, RepositoryError};
use crate::models::{AdminRecord, Recipe, UserRecord};

/// PostgresRepository
///
/// `Repository` backed by a sqlx connection pool. Queries are checked at runtime
/// so the crate builds without a live database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-index violation to `Conflict`; every other failure is passed on.
fn map_insert_error(err: sqlx::Error) -> RepositoryError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => RepositoryError::Conflict,
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let users = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, email, password_hash, created_at FROM users ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepositoryError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// The `users_email_key` index decides uniqueness; there is no pre-check.
    async fn create_user(&self, user: UserRecord) -> Result<UserRecord, RepositoryError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, RepositoryError> {
        let recipes = sqlx::query_as::<_, Recipe>(
            "SELECT id, title, ingredients, instructions, image, created_at FROM recipes ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(recipes)
    }

    async fn create_recipe(&self, recipe: Recipe) -> Result<Recipe, RepositoryError> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (id, title, ingredients, instructions, image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, ingredients, instructions, image, created_at
            "#,
        )
        .bind(recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(&recipe.image)
        .bind(recipe.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_admins(&self) -> Result<Vec<AdminRecord>, RepositoryError> {
        let admins = sqlx::query_as::<_, AdminRecord>(
            "SELECT id, name, email, password_hash, created_at FROM admins ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(admins)
    }

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<AdminRecord>, RepositoryError> {
        let admin = sqlx::query_as::<_, AdminRecord>(
            "SELECT id, name, email, password_hash, created_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>, RepositoryError> {
        let admin = sqlx::query_as::<_, AdminRecord>(
            "SELECT id, name, email, password_hash, created_at FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn create_admin(&self, admin: AdminRecord) -> Result<AdminRecord, RepositoryError> {
        sqlx::query_as::<_, AdminRecord>(
            r#"
            INSERT INTO admins (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(admin.id)
        .bind(&admin.name)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }
}
